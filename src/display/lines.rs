use embedded_hal::digital::v2::OutputPin;

use super::DigitCount;
use crate::Error;

/// Latch enable (/LE) line of each 74'4511.
pub(crate) enum Latches<P> {
    Single(P),
    Dual { tens: P, ones: P },
}

impl<P, E> Latches<P>
where
    P: OutputPin<Error = E>,
{
    /// Latches start disabled so nothing reaches the segments yet.
    pub(crate) fn single(mut latch: P) -> Result<Self, Error<E>> {
        latch.set_high().map_err(Error::Pin)?;
        Ok(Latches::Single(latch))
    }

    pub(crate) fn dual(mut tens: P, mut ones: P) -> Result<Self, Error<E>> {
        tens.set_high().map_err(Error::Pin)?;
        ones.set_high().map_err(Error::Pin)?;
        Ok(Latches::Dual { tens, ones })
    }

    pub(crate) fn count(&self) -> DigitCount {
        match self {
            Latches::Single(_) => DigitCount::One,
            Latches::Dual { .. } => DigitCount::Two,
        }
    }

    /// Only dual displays have a tens latch.
    pub(crate) fn tens(&mut self) -> Option<&mut P> {
        match self {
            Latches::Single(_) => None,
            Latches::Dual { tens, .. } => Some(tens),
        }
    }

    pub(crate) fn ones(&mut self) -> &mut P {
        match self {
            Latches::Single(ones) | Latches::Dual { ones, .. } => ones,
        }
    }
}

/// Optional active-low control input, idle high.
pub(crate) struct ControlLine<P>(Option<P>);

impl<P, E> ControlLine<P>
where
    P: OutputPin<Error = E>,
{
    pub(crate) fn none() -> Self {
        Self(None)
    }

    pub(crate) fn attach(&mut self, mut pin: P) -> Result<(), Error<E>> {
        pin.set_high().map_err(Error::Pin)?;
        self.0 = Some(pin);
        Ok(())
    }

    /// `assert` pulls the line low. Does nothing if no pin is attached.
    pub(crate) fn set(&mut self, assert: bool) -> Result<(), Error<E>> {
        match self.0.as_mut() {
            Some(pin) if assert => pin.set_low().map_err(Error::Pin),
            Some(pin) => pin.set_high().map_err(Error::Pin),
            None => Ok(()),
        }
    }
}

/// Low-then-high edge; clocks the 74HC164 and latches the 74'4511.
pub(crate) fn pulse<P, E>(pin: &mut P) -> Result<(), Error<E>>
where
    P: OutputPin<Error = E>,
{
    pin.set_low().map_err(Error::Pin)?;
    pin.set_high().map_err(Error::Pin)
}
