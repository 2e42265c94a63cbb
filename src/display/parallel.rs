use embedded_hal::digital::v2::{OutputPin, PinState};

use super::lines::{pulse, ControlLine, Latches};
use super::{Digit, DigitCount, DigitPlan};
use crate::Error;

/// One or two 74'4511 sharing four BCD lines driven directly by the MCU.
pub struct ParallelDisplay<P> {
    /// D3, D2, D1, D0
    bcd: [P; 4],
    latches: Latches<P>,
    lamp_test: ControlLine<P>,
    blank: ControlLine<P>,
}

impl<P, E> ParallelDisplay<P>
where
    P: OutputPin<Error = E>,
{
    /// `bcd` is ordered most significant bit first.
    pub fn single(bcd: [P; 4], latch: P) -> Result<Self, Error<E>> {
        let latches = Latches::single(latch)?;
        Ok(Self::with_latches(bcd, latches))
    }

    pub fn dual(bcd: [P; 4], latch_tens: P, latch_ones: P) -> Result<Self, Error<E>> {
        let latches = Latches::dual(latch_tens, latch_ones)?;
        Ok(Self::with_latches(bcd, latches))
    }

    fn with_latches(bcd: [P; 4], latches: Latches<P>) -> Self {
        Self {
            bcd,
            latches,
            lamp_test: ControlLine::none(),
            blank: ControlLine::none(),
        }
    }

    pub fn with_lamp_test(mut self, pin: P) -> Result<Self, Error<E>> {
        self.lamp_test.attach(pin)?;
        Ok(self)
    }

    pub fn with_blank(mut self, pin: P) -> Result<Self, Error<E>> {
        self.blank.attach(pin)?;
        Ok(self)
    }

    pub fn digit_count(&self) -> DigitCount {
        self.latches.count()
    }

    pub fn write_bcd(&mut self, value: i32) -> Result<(), Error<E>> {
        let plan = DigitPlan::new(value, self.digit_count());
        debug!("display {=i32} -> {}", value, plan);

        if let Some(tens) = plan.tens {
            self.put(tens)?;
            if let Some(latch) = self.latches.tens() {
                pulse(latch)?;
            }
        }

        self.put(plan.ones)?;
        pulse(self.latches.ones())
    }

    pub fn lamp_test(&mut self, on: bool) -> Result<(), Error<E>> {
        self.lamp_test.set(on)
    }

    pub fn blank_display(&mut self, on: bool) -> Result<(), Error<E>> {
        self.blank.set(on)
    }

    fn put(&mut self, digit: Digit) -> Result<(), Error<E>> {
        let code = digit.bcd();
        for (pin, bit) in self.bcd.iter_mut().zip((0..4).rev()) {
            pin.set_state(PinState::from(code & (1 << bit) != 0))
                .map_err(Error::Pin)?;
        }
        Ok(())
    }
}
