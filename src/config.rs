pub const MCU_XTAL_HZ: u32 = 8_000_000;

//-----------------------------------------------------------------------------

pub const SYSTICK_RATE_HZ: u32 = 1_000;

/// Tick rate of every [`crate::MillisInstant`].
pub const MILLIS_HZ: u32 = 1_000;

//-----------------------------------------------------------------------------

/// Per 74'4511 datasheet, BCD 10 -> all segments off.
pub const BLANK_DIGIT: u8 = 10;

/// Clock pulses per digit; the 74HC164 is 8 stages deep.
pub const BITS_PER_DIGIT: u8 = 8;

pub const MS_DECIMAL_POINT_BIT: u8 = 4;
pub const LS_DECIMAL_POINT_BIT: u8 = 5;

//-----------------------------------------------------------------------------

pub const MAX_LED_TASKS: usize = 4;

/// (on, off) in milliseconds
pub const LED_TIMINGS_MS: [(u32, u32); MAX_LED_TASKS] =
    [(100, 400), (350, 350), (125, 250), (500, 400)];

pub const COUNTER_PERIOD_MS: u32 = 500;
