use crate::config::BLANK_DIGIT;

/// One position of a 74'4511 display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Digit {
    /// Always `0..=9`
    Numeral(u8),
    /// All segments off
    Blank,
}

impl Digit {
    /// Lowest decimal digit of a non-negative value.
    pub const fn ones_of(value: u32) -> Self {
        Digit::Numeral((value % 10) as u8)
    }

    /// Code on the 74'4511 BCD inputs.
    pub const fn bcd(self) -> u8 {
        match self {
            Digit::Numeral(n) => n,
            Digit::Blank => BLANK_DIGIT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitCount {
    One,
    Two,
}

/// Decimal point flags sent with every serial frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecimalPoints {
    pub most_significant: bool,
    pub least_significant: bool,
}

/// What each display position shows for a value.
///
/// Two digits:
/// - `10..=99` shows normally
/// - `0..=9` gets a blank leading digit
/// - `>= 100` keeps the last two digits, so 105 shows "05"
/// - negative values blank the whole display
///
/// One digit shows `value % 10`, or blank for negative values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitPlan {
    /// `None` on single digit displays
    pub tens: Option<Digit>,
    pub ones: Digit,
}

impl DigitPlan {
    pub fn new(value: i32, count: DigitCount) -> Self {
        let tens = match count {
            DigitCount::One => None,
            DigitCount::Two => Some(match value {
                10..=99 => Digit::Numeral((value / 10) as u8),
                i32::MIN..=9 => Digit::Blank,
                _ => Digit::ones_of(value as u32 / 10),
            }),
        };

        let ones = if value < 0 {
            Digit::Blank
        } else {
            Digit::ones_of(value as u32)
        };

        Self { tens, ones }
    }

    /// Digits in transmit order: tens first.
    pub fn digits(&self) -> impl Iterator<Item = Digit> {
        self.tens.into_iter().chain(core::iter::once(self.ones))
    }
}
