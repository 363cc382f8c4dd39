/// Distance to the target below which a damped value snaps onto it.
pub const DAMP_EPSILON: f32 = 0.001;

/// A damped scalar: the current value and its velocity.
///
/// The velocity carries over between frames, which is what keeps the motion
/// continuous when the target or the frame time changes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DampState {
    pub value: f32,
    pub velocity: f32,
}

impl DampState {
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
        }
    }

    #[must_use]
    pub fn is_settled_at(&self, target: f32) -> bool {
        (self.value - target).abs() <= DAMP_EPSILON
    }
}

/// Polynomial approximation of `e^-x` used by the damping step.
#[inline]
fn decay(x: f32) -> f32 {
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}

/// Moves `state` toward `target` with a critically damped spring.
///
/// `smooth_time` is roughly the time to reach the target (higher is slower)
/// and `delta` the frame time in seconds. The step never overshoots the
/// target. Returns `false` once the value has settled.
pub fn damp(state: &mut DampState, target: f32, smooth_time: f32, delta: f32) -> bool {
    if (state.value - target).abs() <= DAMP_EPSILON {
        state.value = target;
        state.velocity = 0.0;
        return false;
    }
    if delta <= 0.0 {
        return true;
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let t = decay(omega * delta);

    let change = state.value - target;
    let temp = (state.velocity + omega * change) * delta;
    state.velocity = (state.velocity - omega * temp) * t;
    let mut output = target + (change + temp) * t;

    // Clamp if the step would cross the target
    if (target - state.value > 0.0) == (output > target) {
        output = target;
        state.velocity = 0.0;
    }

    state.value = output;
    true
}
