use embedded_hal::digital::v2::{OutputPin, PinState};

use super::lines::{pulse, ControlLine, Latches};
use super::{DecimalPoints, Digit, DigitCount, DigitPlan};
use crate::config::{BITS_PER_DIGIT, LS_DECIMAL_POINT_BIT, MS_DECIMAL_POINT_BIT};
use crate::Error;

/// Frame shifted into the 74HC164 for one digit, bit 0 goes out first.
///
/// ```text
/// bit  0..=3  BCD code        -> QH..QE -> 74'4511 D0..D3
/// bit  4      MS decimal point -> QD
/// bit  5      LS decimal point -> QC
/// bit  6..=7  always 0         -> QB, QA (not connected)
/// ```
pub fn encode_frame(digit: Digit, decimal_points: DecimalPoints) -> u8 {
    let mut frame = digit.bcd() & 0x0F;
    if decimal_points.most_significant {
        frame |= 1 << MS_DECIMAL_POINT_BIT;
    }
    if decimal_points.least_significant {
        frame |= 1 << LS_DECIMAL_POINT_BIT;
    }
    frame
}

/// One or two 74'4511 fed through a single 74HC164 shift register.
///
/// Both digits share the BCD outputs of the shift register; each digit has
/// its own latch so the tens digit is shifted and latched before the ones.
pub struct SerialDisplay<P> {
    clk: P,
    din: P,
    latches: Latches<P>,
    lamp_test: ControlLine<P>,
    blank: ControlLine<P>,
    clear: ControlLine<P>,
    decimal_points: DecimalPoints,
}

impl<P, E> SerialDisplay<P>
where
    P: OutputPin<Error = E>,
{
    pub fn single(clk: P, din: P, latch: P) -> Result<Self, Error<E>> {
        let latches = Latches::single(latch)?;
        Ok(Self::with_latches(clk, din, latches))
    }

    pub fn dual(clk: P, din: P, latch_tens: P, latch_ones: P) -> Result<Self, Error<E>> {
        let latches = Latches::dual(latch_tens, latch_ones)?;
        Ok(Self::with_latches(clk, din, latches))
    }

    fn with_latches(clk: P, din: P, latches: Latches<P>) -> Self {
        Self {
            clk,
            din,
            latches,
            lamp_test: ControlLine::none(),
            blank: ControlLine::none(),
            clear: ControlLine::none(),
            decimal_points: DecimalPoints::default(),
        }
    }

    /// Attaches the shared 74'4511 /LT line.
    pub fn with_lamp_test(mut self, pin: P) -> Result<Self, Error<E>> {
        self.lamp_test.attach(pin)?;
        Ok(self)
    }

    /// Attaches the shared 74'4511 /BL line.
    pub fn with_blank(mut self, pin: P) -> Result<Self, Error<E>> {
        self.blank.attach(pin)?;
        Ok(self)
    }

    /// Attaches the 74HC164 /CLR line.
    pub fn with_clear(mut self, pin: P) -> Result<Self, Error<E>> {
        self.clear.attach(pin)?;
        Ok(self)
    }

    pub fn digit_count(&self) -> DigitCount {
        self.latches.count()
    }

    pub fn decimal_points(&self) -> DecimalPoints {
        self.decimal_points
    }

    /// Takes effect with the next [`SerialDisplay::write_bcd`].
    pub fn set_decimal_points(&mut self, most_significant: bool, least_significant: bool) {
        self.decimal_points = DecimalPoints {
            most_significant,
            least_significant,
        };
    }

    pub fn write_bcd(&mut self, value: i32) -> Result<(), Error<E>> {
        let plan = DigitPlan::new(value, self.digit_count());
        debug!("display {=i32} -> {}", value, plan);

        if let Some(tens) = plan.tens {
            self.shift(encode_frame(tens, self.decimal_points))?;
            if let Some(latch) = self.latches.tens() {
                pulse(latch)?;
            }
        }

        self.shift(encode_frame(plan.ones, self.decimal_points))?;
        pulse(self.latches.ones())
    }

    /// Lights every segment while `on`.
    pub fn lamp_test(&mut self, on: bool) -> Result<(), Error<E>> {
        self.lamp_test.set(on)
    }

    /// Turns every segment off while `on`.
    pub fn blank_display(&mut self, on: bool) -> Result<(), Error<E>> {
        self.blank.set(on)
    }

    /// Holds the shift register cleared while `on`.
    pub fn clear_shift_register(&mut self, on: bool) -> Result<(), Error<E>> {
        self.clear.set(on)
    }

    fn shift(&mut self, frame: u8) -> Result<(), Error<E>> {
        trace!("shift {=u8:b}", frame);
        for bit in 0..BITS_PER_DIGIT {
            let level = PinState::from(frame & (1 << bit) != 0);
            self.din.set_state(level).map_err(Error::Pin)?;
            pulse(&mut self.clk)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::mock::{MockError, MockPin, Wire};

    fn dual(wire: &Wire) -> SerialDisplay<MockPin> {
        let display =
            SerialDisplay::dual(wire.pin("clk"), wire.pin("din"), wire.pin("le1"), wire.pin("le0"))
                .unwrap();
        wire.clear();
        display
    }

    /// Rebuilds the shifted frames and which latch fired after each one.
    fn decode(wire: &Wire) -> Vec<(u8, &'static str)> {
        let mut frames = Vec::new();
        let mut din = false;
        let mut bits = Vec::new();
        let mut clk = true;
        let mut latch_low = None;

        for (line, level) in wire.events() {
            match (line, level) {
                ("din", level) => din = level,
                ("clk", false) => clk = false,
                ("clk", true) => {
                    assert!(!clk, "clock rose without falling first");
                    clk = true;
                    bits.push(din);
                }
                (latch, false) => latch_low = Some(latch),
                (latch, true) => {
                    assert_eq!(latch_low.take(), Some(latch));
                    assert_eq!(bits.len(), 8, "latched a partial frame");
                    let frame = bits
                        .drain(..)
                        .enumerate()
                        .fold(0u8, |acc, (i, bit)| acc | ((bit as u8) << i));
                    frames.push((frame, latch));
                }
            }
        }

        assert!(bits.is_empty());
        frames
    }

    #[test]
    fn frame_layout() {
        let none = DecimalPoints::default();
        let both = DecimalPoints {
            most_significant: true,
            least_significant: true,
        };
        let ls = DecimalPoints {
            most_significant: false,
            least_significant: true,
        };

        assert_eq!(encode_frame(Digit::Numeral(7), none), 0b0000_0111);
        assert_eq!(encode_frame(Digit::Blank, none), 0b0000_1010);
        assert_eq!(encode_frame(Digit::Numeral(9), both), 0b0011_1001);
        assert_eq!(encode_frame(Digit::Numeral(0), ls), 0b0010_0000);
    }

    #[test]
    fn construction_disables_latches() {
        let wire = Wire::new();
        let _display =
            SerialDisplay::dual(wire.pin("clk"), wire.pin("din"), wire.pin("le1"), wire.pin("le0"))
                .unwrap()
                .with_lamp_test(wire.pin("lt"))
                .unwrap()
                .with_blank(wire.pin("bl"))
                .unwrap()
                .with_clear(wire.pin("clr"))
                .unwrap();

        assert_eq!(
            wire.events(),
            [
                ("le1", true),
                ("le0", true),
                ("lt", true),
                ("bl", true),
                ("clr", true)
            ]
        );
    }

    #[test]
    fn seven_with_blank_tens() {
        let wire = Wire::new();
        let mut display = dual(&wire);
        display.set_decimal_points(true, false);

        display.write_bcd(7).unwrap();

        assert_eq!(decode(&wire), [(0b0001_1010, "le1"), (0b0001_0111, "le0")]);
    }

    #[test]
    fn each_digit_is_eight_clocks() {
        let wire = Wire::new();
        let mut display = dual(&wire);

        display.write_bcd(42).unwrap();

        assert_eq!(wire.levels("clk").len(), 2 * 8 * 2);
        assert_eq!(wire.levels("din").len(), 2 * 8);
        assert_eq!(wire.levels("le1"), [false, true]);
        assert_eq!(wire.levels("le0"), [false, true]);
        assert_eq!(decode(&wire), [(4, "le1"), (2, "le0")]);
    }

    #[test]
    fn filler_bits_are_zero() {
        let wire = Wire::new();
        let mut display = dual(&wire);
        display.set_decimal_points(true, true);

        display.write_bcd(99).unwrap();

        for (frame, _) in decode(&wire) {
            assert_eq!(frame & 0b1100_0000, 0);
            assert_eq!(frame & 0b0011_0000, 0b0011_0000);
        }
    }

    #[test]
    fn values_out_of_range() {
        let wire = Wire::new();
        let mut display = dual(&wire);

        display.write_bcd(-5).unwrap();
        assert_eq!(decode(&wire), [(10, "le1"), (10, "le0")]);

        wire.clear();
        display.write_bcd(105).unwrap();
        assert_eq!(decode(&wire), [(0, "le1"), (5, "le0")]);
    }

    #[test]
    fn single_digit_only_shifts_ones() {
        let wire = Wire::new();
        let mut display = SerialDisplay::single(wire.pin("clk"), wire.pin("din"), wire.pin("le0"))
            .unwrap();
        wire.clear();

        assert_eq!(display.digit_count(), DigitCount::One);

        display.write_bcd(38).unwrap();
        assert_eq!(decode(&wire), [(8, "le0")]);

        wire.clear();
        display.write_bcd(-1).unwrap();
        assert_eq!(decode(&wire), [(10, "le0")]);
    }

    #[test]
    fn control_lines_are_active_low() {
        let wire = Wire::new();
        let mut display = dual(&wire)
            .with_lamp_test(wire.pin("lt"))
            .unwrap()
            .with_blank(wire.pin("bl"))
            .unwrap()
            .with_clear(wire.pin("clr"))
            .unwrap();
        wire.clear();

        display.lamp_test(true).unwrap();
        display.lamp_test(false).unwrap();
        display.blank_display(true).unwrap();
        display.clear_shift_register(true).unwrap();
        display.clear_shift_register(false).unwrap();

        assert_eq!(
            wire.events(),
            [
                ("lt", false),
                ("lt", true),
                ("bl", false),
                ("clr", false),
                ("clr", true)
            ]
        );
    }

    #[test]
    fn missing_control_lines_are_ignored() {
        let wire = Wire::new();
        let mut display = dual(&wire);

        display.lamp_test(true).unwrap();
        display.blank_display(true).unwrap();
        display.clear_shift_register(true).unwrap();

        assert!(wire.events().is_empty());
    }

    #[test]
    fn pin_error_stops_transfer() {
        let wire = Wire::new();
        let mut display =
            SerialDisplay::single(wire.broken_pin("clk"), wire.pin("din"), wire.pin("le0")).unwrap();
        wire.clear();

        assert_eq!(display.write_bcd(3), Err(Error::Pin(MockError("clk"))));
        assert_eq!(wire.events(), [("din", true)]);
    }

    #[test]
    fn broken_latch_fails_construction() {
        let wire = Wire::new();
        let result = SerialDisplay::dual(
            wire.pin("clk"),
            wire.pin("din"),
            wire.pin("le1"),
            wire.broken_pin("le0"),
        );

        assert!(matches!(result, Err(Error::Pin(MockError("le0")))));
    }
}
