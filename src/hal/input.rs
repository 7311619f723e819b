//! Input sources: rotary encoder and confirm button.
//!
//! The traits mirror the firmware's two inputs. `Debounce` wraps any raw
//! button with a two-sample filter: a press
//! fires only after two consecutive pressed samples and then latches until
//! two consecutive released samples, so contact bounce can never double-fire.
//!
//! The queue-backed implementations feed scripted input to the simulator and
//! to tests; they are `Clone` so a producer thread and the poll loop can
//! share one queue.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

pub trait RotaryEncoder {
    /// Net detent movement since the last call, clockwise positive.
    fn take_delta(&mut self) -> i8;
}

pub trait ConfirmButton {
    /// One raw level sample; `true` is pressed.
    fn sample(&mut self) -> bool;
}

/// Two-sample debounce with press latching.
#[derive(Debug, Default)]
pub struct Debounce {
    pressed_streak: u8,
    released_streak: u8,
    latched: bool,
}

impl Debounce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw sample; returns `true` on the edge that confirms a press.
    pub fn update(&mut self, raw: bool) -> bool {
        if raw {
            self.released_streak = 0;
            self.pressed_streak = self.pressed_streak.saturating_add(1);
            if self.pressed_streak >= 2 && !self.latched {
                self.latched = true;
                return true;
            }
        } else {
            self.pressed_streak = 0;
            self.released_streak = self.released_streak.saturating_add(1);
            if self.released_streak >= 2 {
                self.latched = false;
            }
        }
        false
    }
}

/// Scripted encoder: a shared queue of deltas drained one per poll.
#[derive(Debug, Clone, Default)]
pub struct QueueEncoder {
    deltas: Arc<Mutex<VecDeque<i8>>>,
}

impl QueueEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, delta: i8) {
        self.deltas
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(delta);
    }
}

impl RotaryEncoder for QueueEncoder {
    fn take_delta(&mut self) -> i8 {
        self.deltas
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(0)
    }
}

/// Scripted button: a shared queue of raw levels, released once drained.
#[derive(Debug, Clone, Default)]
pub struct QueueButton {
    samples: Arc<Mutex<VecDeque<bool>>>,
}

impl QueueButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, level: bool) {
        self.samples
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(level);
    }

    /// Queue a clean press: two pressed samples, two released.
    pub fn push_press(&self) {
        for level in [true, true, false, false] {
            self.push(level);
        }
    }
}

impl ConfirmButton for QueueButton {
    fn sample(&mut self) -> bool {
        self.samples
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfirmButton, Debounce, QueueButton, QueueEncoder, RotaryEncoder};

    #[test]
    fn debounce_needs_two_consecutive_pressed_samples() {
        let mut filter = Debounce::new();
        assert!(!filter.update(true));
        assert!(filter.update(true));
    }

    #[test]
    fn a_bouncing_contact_fires_once() {
        let mut filter = Debounce::new();
        let samples = [true, false, true, true, false, true, true, false];
        let fires = samples.iter().filter(|&&s| filter.update(s)).count();
        assert_eq!(fires, 1);
    }

    #[test]
    fn release_for_two_samples_rearms_the_press() {
        let mut filter = Debounce::new();
        assert!(!filter.update(true));
        assert!(filter.update(true));
        filter.update(false);
        filter.update(false);
        assert!(!filter.update(true));
        assert!(filter.update(true));
    }

    #[test]
    fn queue_encoder_drains_one_delta_per_poll() {
        let producer = QueueEncoder::new();
        let mut consumer = producer.clone();
        producer.push(2);
        producer.push(-1);
        assert_eq!(consumer.take_delta(), 2);
        assert_eq!(consumer.take_delta(), -1);
        assert_eq!(consumer.take_delta(), 0);
    }

    #[test]
    fn queue_button_reads_released_when_empty() {
        let mut button = QueueButton::new();
        assert!(!button.sample());
    }
}
