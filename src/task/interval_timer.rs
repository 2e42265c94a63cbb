use crate::support::{elapsed, MillisDuration, MillisInstant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskState {
    Active,
    Inactive,
}

impl TaskState {
    pub fn toggled(self) -> Self {
        match self {
            TaskState::Active => TaskState::Inactive,
            TaskState::Inactive => TaskState::Active,
        }
    }

    pub fn is_active(self) -> bool {
        self == TaskState::Active
    }
}

/// Software timer flipping between two states without blocking.
///
/// The timer stays [`TaskState::Active`] for `high` and [`TaskState::Inactive`]
/// for `low`. Each [`IntervalTimer::poll`] compares the time since the last
/// flip with the duration of the current state and flips at most once, so
/// a late poll does not replay the transitions it missed.
///
/// A zero duration means "flip on the next poll".
#[derive(Clone, Debug)]
pub struct IntervalTimer {
    high: MillisDuration,
    low: MillisDuration,
    state: TaskState,
    last_transition: MillisInstant,
}

impl IntervalTimer {
    pub const fn new() -> Self {
        Self {
            high: MillisDuration::from_ticks(0),
            low: MillisDuration::from_ticks(0),
            state: TaskState::Inactive,
            last_transition: MillisInstant::from_ticks(0),
        }
    }

    /// Sets both durations and restarts from [`TaskState::Inactive`].
    /// The last transition timestamp is kept.
    pub fn configure(&mut self, high: MillisDuration, low: MillisDuration) {
        self.high = high;
        self.low = low;
        self.state = TaskState::Inactive;
    }

    /// Returns the new state if the timer flipped.
    pub fn poll(&mut self, now: MillisInstant) -> Option<TaskState> {
        let hold = match self.state {
            TaskState::Active => self.high,
            TaskState::Inactive => self.low,
        };

        if elapsed(self.last_transition, now).ticks() < hold.ticks() {
            return None;
        }

        self.state = self.state.toggled();
        self.last_transition = now;
        trace!("timer -> {} at {=u32}ms", self.state, now.ticks());

        Some(self.state)
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn high(&self) -> MillisDuration {
        self.high
    }

    pub fn low(&self) -> MillisDuration {
        self.low
    }

    pub fn last_transition(&self) -> MillisInstant {
        self.last_transition
    }
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new()
    }
}
