//! Spin lifecycle events and the observer seam.
//!
//! The engine never talks to a rendering environment directly. Anything
//! that wants to react to a spin (button row, status line, tests)
//! implements [`SpinObserver`] and is handed to the session calls that can
//! emit events.

use spindle_types::SliceId;

/// Callbacks raised over the life of one spin.
///
/// All methods default to no-ops so observers implement only what they
/// consume. Completion events arrive in a fixed order: pointer settle,
/// spinner rest, then spin complete.
pub trait SpinObserver {
    fn on_spin_start(&mut self, winning_slice: SliceId) {
        let _ = winning_slice;
    }

    /// The needle's final resting deviation from neutral, degrees.
    fn on_pointer_settle(&mut self, offset_degrees: f64) {
        let _ = offset_degrees;
    }

    /// The wheel's absolute resting angle after mod-360 housekeeping.
    fn on_spinner_rest(&mut self, absolute_angle_degrees: f64) {
        let _ = absolute_angle_degrees;
    }

    fn on_spin_complete(&mut self) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SpinObserver for NullObserver {}

/// A spin lifecycle event, as recorded by [`EventQueue`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinEvent {
    Started { winning_slice: SliceId },
    PointerSettled { offset_degrees: f64 },
    SpinnerRested { absolute_angle_degrees: f64 },
    Completed,
}

/// Observer that queues events for later draining.
///
/// The frame loop hands this to the session each tick and drains it after,
/// so rendering sees events in order without the engine knowing about
/// frames.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<SpinEvent>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all pending events, clearing the queue.
    pub fn take(&mut self) -> Vec<SpinEvent> {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl SpinObserver for EventQueue {
    fn on_spin_start(&mut self, winning_slice: SliceId) {
        self.pending.push(SpinEvent::Started { winning_slice });
    }

    fn on_pointer_settle(&mut self, offset_degrees: f64) {
        self.pending.push(SpinEvent::PointerSettled { offset_degrees });
    }

    fn on_spinner_rest(&mut self, absolute_angle_degrees: f64) {
        self.pending.push(SpinEvent::SpinnerRested {
            absolute_angle_degrees,
        });
    }

    fn on_spin_complete(&mut self) {
        self.pending.push(SpinEvent::Completed);
    }
}
