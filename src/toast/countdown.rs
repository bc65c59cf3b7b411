// SPDX-License-Identifier: MPL-2.0
//! Per-toast countdown state machine.
//!
//! ```text
//! Suppressed --arm--> CountingDown --tick x100 / close--> Closed
//!      ^                   |
//!      +-----suppress------+
//! ```
//!
//! The machine is clock-free: the presenter feeds it ticks at
//! `duration / 100` and acts on the transitions it reports.

use super::record::ToastDuration;
use crate::config::PROGRESS_STEPS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Delay flag observed; not rendered, not counting.
    Suppressed,
    CountingDown,
    /// Terminal.
    Closed,
}

/// Why a countdown closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Expired,
    Dismissed,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    phase: Phase,
    progress: u8,
    hovered: bool,
    step: u8,
}

impl Countdown {
    /// Starts suppressed when `delayed`, otherwise already counting down.
    #[must_use]
    pub fn new(duration: ToastDuration, delayed: bool) -> Self {
        Self {
            phase: if delayed {
                Phase::Suppressed
            } else {
                Phase::CountingDown
            },
            progress: 0,
            hovered: false,
            // zero lifetime expires on the first tick
            step: if duration.is_zero() { PROGRESS_STEPS } else { 1 },
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Progress in `0..=100`.
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.phase == Phase::CountingDown
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    /// `Suppressed -> CountingDown`. Returns whether the transition happened.
    pub fn arm(&mut self) -> bool {
        if self.phase == Phase::Suppressed {
            self.phase = Phase::CountingDown;
            true
        } else {
            false
        }
    }

    /// `CountingDown -> Suppressed`, keeping progress.
    pub fn suppress(&mut self) -> bool {
        if self.phase == Phase::CountingDown {
            self.phase = Phase::Suppressed;
            true
        } else {
            false
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Pointer enter and leave both flip the flag.
    pub fn toggle_hover(&mut self) {
        self.hovered = !self.hovered;
    }

    /// Advances one tick.
    ///
    /// Hovered or suppressed ticks are skipped. Returns
    /// `Some(CloseReason::Expired)` exactly once, on the tick that brings
    /// progress to 100.
    pub fn tick(&mut self) -> Option<CloseReason> {
        if self.phase != Phase::CountingDown || self.hovered {
            return None;
        }

        self.progress = self.progress.saturating_add(self.step).min(PROGRESS_STEPS);
        if self.progress == PROGRESS_STEPS {
            self.phase = Phase::Closed;
            Some(CloseReason::Expired)
        } else {
            None
        }
    }

    /// Closes from any live phase. Returns `false` if already closed.
    pub fn close(&mut self) -> bool {
        if self.phase == Phase::Closed {
            false
        } else {
            self.phase = Phase::Closed;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(ms: u64) -> Countdown {
        Countdown::new(ToastDuration::from_millis(ms), false)
    }

    #[test]
    fn expires_after_exactly_one_hundred_ticks() {
        let mut countdown = counting(5_000);
        for _ in 0..99 {
            assert_eq!(countdown.tick(), None);
        }
        assert_eq!(countdown.progress(), 99);
        assert_eq!(countdown.tick(), Some(CloseReason::Expired));
        assert!(countdown.is_closed());
    }

    #[test]
    fn ticks_after_close_do_nothing() {
        let mut countdown = counting(5_000);
        for _ in 0..100 {
            countdown.tick();
        }
        assert_eq!(countdown.tick(), None);
        assert_eq!(countdown.progress(), 100);
    }

    #[test]
    fn hovered_ticks_are_skipped() {
        let mut countdown = counting(5_000);
        countdown.tick();
        countdown.set_hovered(true);
        for _ in 0..500 {
            assert_eq!(countdown.tick(), None);
        }
        assert_eq!(countdown.progress(), 1);

        countdown.toggle_hover();
        assert!(!countdown.is_hovered());
        countdown.tick();
        assert_eq!(countdown.progress(), 2);
    }

    #[test]
    fn zero_duration_closes_on_first_tick() {
        let mut countdown = counting(0);
        assert_eq!(countdown.tick(), Some(CloseReason::Expired));
        assert_eq!(countdown.tick(), None);
        assert!(!countdown.close());
    }

    #[test]
    fn delayed_start_is_suppressed_until_armed() {
        let mut countdown = Countdown::new(ToastDuration::default(), true);
        assert_eq!(countdown.phase(), Phase::Suppressed);
        assert!(!countdown.is_visible());
        assert_eq!(countdown.tick(), None);
        assert_eq!(countdown.progress(), 0);

        assert!(countdown.arm());
        assert!(!countdown.arm());
        assert!(countdown.is_visible());
    }

    #[test]
    fn suppress_keeps_progress() {
        let mut countdown = counting(5_000);
        for _ in 0..10 {
            countdown.tick();
        }
        assert!(countdown.suppress());
        countdown.tick();
        assert!(countdown.arm());
        assert_eq!(countdown.progress(), 10);
    }

    #[test]
    fn manual_close_is_idempotent() {
        let mut countdown = counting(5_000);
        assert!(countdown.close());
        assert!(!countdown.close());
        assert!(!countdown.arm());
        assert!(!countdown.suppress());
    }
}
