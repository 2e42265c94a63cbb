mod clock;
pub use clock::{elapsed, FnClock, MillisClock, MillisDuration, MillisInstant};

#[cfg(test)]
pub(crate) mod mock;
