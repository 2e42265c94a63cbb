use fugit_timer::{TimerDurationU32, TimerInstantU32};

use crate::config::MILLIS_HZ;

pub type MillisInstant = TimerInstantU32<MILLIS_HZ>;
pub type MillisDuration = TimerDurationU32<MILLIS_HZ>;

/// Free running millisecond counter, allowed to wrap at `u32::MAX`.
pub trait MillisClock {
    fn now(&mut self) -> MillisInstant;
}

/// Adapts any raw tick source, e.g. an RTIC monotonic or a board `millis()`.
pub struct FnClock<F>(pub F);

impl<F> MillisClock for FnClock<F>
where
    F: FnMut() -> u32,
{
    fn now(&mut self) -> MillisInstant {
        MillisInstant::from_ticks((self.0)())
    }
}

/// Time passed from `since` to `now`, correct across a single counter wrap.
pub fn elapsed(since: MillisInstant, now: MillisInstant) -> MillisDuration {
    MillisDuration::from_ticks(now.ticks().wrapping_sub(since.ticks()))
}
