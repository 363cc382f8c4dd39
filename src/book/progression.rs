//! Page progression
//!
//! The displayed page chases the requested page one page at a time. Each
//! step waits a delay that depends on the remaining gap: short while far
//! behind, longer for the final pages. At most one step is pending; a new
//! request replaces it.

use std::time::Duration;

use crate::book::config::ProgressionSettings;

/// The single scheduled step of a chase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingStep {
    /// Time left before the step fires.
    pub remaining: Duration,
    /// Delay the step was scheduled with.
    pub delay: Duration,
    /// `true` to move forward, `false` to move back.
    pub forward: bool,
}

#[derive(Debug, Clone)]
pub struct PageProgression {
    requested: usize,
    displayed: usize,
    pending: Option<PendingStep>,
    settings: ProgressionSettings,
}

impl PageProgression {
    /// Starts settled on `page`.
    #[must_use]
    pub fn new(page: usize, settings: ProgressionSettings) -> Self {
        Self {
            requested: page,
            displayed: page,
            pending: None,
            settings,
        }
    }

    #[inline]
    #[must_use]
    pub fn requested(&self) -> usize {
        self.requested
    }

    #[inline]
    #[must_use]
    pub fn displayed(&self) -> usize {
        self.displayed
    }

    #[inline]
    #[must_use]
    pub fn pending(&self) -> Option<&PendingStep> {
        self.pending.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.displayed == self.requested
    }

    /// Sets a new requested page and restarts the chase.
    ///
    /// The caller guarantees `page` is within the book.
    pub fn request(&mut self, page: usize) {
        if self.cancel() {
            log::trace!("Pending page step cancelled by request for page {page}");
        }
        self.requested = page;
        self.restart_chase();
    }

    /// Drops the pending step, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Schedules the next step toward the requested page.
    ///
    /// Does nothing when the displayed page already matches.
    pub fn restart_chase(&mut self) {
        if self.displayed == self.requested {
            self.pending = None;
            return;
        }

        let gap = self.displayed.abs_diff(self.requested);
        let delay = self.settings.delay_for_gap(gap);
        self.pending = Some(PendingStep {
            remaining: delay,
            delay,
            forward: self.requested > self.displayed,
        });
    }

    /// Lets `elapsed` time pass, firing every step that comes due.
    ///
    /// Time left over after a step counts toward the next one. Returns the
    /// number of steps taken.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let mut budget = elapsed;
        let mut steps = 0;

        while let Some(step) = self.pending.as_mut() {
            if step.remaining > budget {
                step.remaining -= budget;
                break;
            }
            budget -= step.remaining;

            let forward = step.forward;
            self.pending = None;
            self.step(forward);
            steps += 1;
            self.restart_chase();
        }

        steps
    }

    fn step(&mut self, forward: bool) {
        if forward {
            self.displayed += 1;
        } else {
            self.displayed = self.displayed.saturating_sub(1);
        }
        log::trace!(
            "Displayed page -> {} (requested {})",
            self.displayed,
            self.requested
        );
    }
}
