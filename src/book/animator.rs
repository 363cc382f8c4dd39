//! Page turn animation
//!
//! Each frame every page computes where its hinge and bones should be and
//! eases toward it:
//!
//! ```text
//! target   = (opened ? -PI/2 : PI/2) + (closed ? 0 : radians(number * stagger))
//! curve(i) = i < curve_bones ? sin(i * 0.2 + 0.25) : 0
//! bone(i)  = closed ? (i == 0 ? target : 0) : curve(i) * strength * target
//! ```
//!
//! Bone 0's angle drives the page group (the hinge); bones 1.. bend the page.

use std::f32::consts::FRAC_PI_2;

use crate::animation::{DampState, damp};
use crate::book::config::TurnSettings;
use crate::book::page::Page;

/// What a page is doing, derived from the displayed page each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PagePose {
    /// The page has been turned over to the left side.
    pub opened: bool,
    /// The book shows its front or back cover.
    pub book_closed: bool,
}

impl PagePose {
    #[must_use]
    pub fn for_page(number: usize, displayed: usize, page_count: usize) -> Self {
        Self {
            opened: number < displayed,
            book_closed: displayed == 0 || displayed == page_count,
        }
    }
}

/// Whole-page rotation target for page `number`.
#[must_use]
pub fn target_rotation(pose: PagePose, number: usize, settings: &TurnSettings) -> f32 {
    let base = if pose.opened { -FRAC_PI_2 } else { FRAC_PI_2 };
    if pose.book_closed {
        base
    } else {
        base + (number as f32 * settings.stagger_degrees).to_radians()
    }
}

#[must_use]
pub fn inside_curve_intensity(bone: usize, settings: &TurnSettings) -> f32 {
    if bone < settings.inside_curve_bones {
        (bone as f32 * 0.2 + 0.25).sin()
    } else {
        0.0
    }
}

/// Rotation target of bone `bone` given the whole-page target.
#[must_use]
pub fn bone_target(bone: usize, target: f32, pose: PagePose, settings: &TurnSettings) -> f32 {
    if pose.book_closed {
        return if bone == 0 { target } else { 0.0 };
    }
    inside_curve_intensity(bone, settings) * settings.inside_curve_strength * target
}

/// Rotation targets of all `bone_count` bones for one frame.
#[must_use]
pub fn bone_targets(
    pose: PagePose,
    number: usize,
    bone_count: usize,
    settings: &TurnSettings,
) -> Vec<f32> {
    let target = target_rotation(pose, number, settings);
    (0..bone_count)
        .map(|bone| bone_target(bone, target, pose, settings))
        .collect()
}

/// Advances one page by `delta` seconds.
///
/// Returns `false` without touching anything when the page has no mesh yet.
pub fn animate_page(page: &mut Page, pose: PagePose, settings: &TurnSettings, delta: f32) -> bool {
    let number = page.number();
    let Some(mesh) = page.mesh.as_mut() else {
        log::trace!("Page {number} not assembled, skipping frame");
        return false;
    };

    let target = target_rotation(pose, number, settings);
    let smooth_time = settings.easing_factor;

    // Bone 0 rotates the page group rather than the bone itself
    let hinge = bone_target(0, target, pose, settings);
    damp(&mut page.group_rotation, hinge, smooth_time, delta);
    page.group.set_rotation_y(page.group_rotation.value);
    page.group.update_local_matrix();

    let velocities = &mut page.bone_velocities;
    for (index, velocity) in velocities.iter_mut().enumerate().skip(1) {
        let Some(bone) = mesh.skeleton.bone_mut(index) else {
            break;
        };
        let mut state = DampState {
            value: bone.rotation,
            velocity: *velocity,
        };
        damp(
            &mut state,
            bone_target(index, target, pose, settings),
            smooth_time,
            delta,
        );
        bone.rotation = state.value;
        *velocity = state.velocity;
    }

    true
}
