#![cfg_attr(not(test), no_std)]

//! Drivers for 74'4511 BCD-to-7-segment displays and cooperative
//! (non-preemptive) LED blink tasks on top of `embedded-hal`.

#[macro_use]
mod fmt;

pub mod config;
pub mod display;
pub mod task;

mod error;
mod support;

pub use display::{
    encode_frame, DecimalPoints, Digit, DigitCount, DigitPlan, ParallelDisplay, SerialDisplay,
};
pub use error::Error;
pub use support::{elapsed, FnClock, MillisClock, MillisDuration, MillisInstant};
pub use task::{IntervalTimer, LedTask, TaskSet, TaskState};

// Re-exported so callers can write `500.millis()` without naming fugit.
pub use fugit_timer::ExtU32;
