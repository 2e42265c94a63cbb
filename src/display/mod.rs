//! 74'4511 BCD to 7-segment drivers.

mod digit;
pub use digit::{DecimalPoints, Digit, DigitCount, DigitPlan};

mod lines;

mod parallel;
pub use parallel::ParallelDisplay;

mod serial;
pub use serial::{encode_frame, SerialDisplay};
