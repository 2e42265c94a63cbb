use embedded_hal::digital::v2::{OutputPin, PinState};

use super::{IntervalTimer, TaskState};
use crate::support::{MillisClock, MillisDuration, MillisInstant};
use crate::Error;

/// A LED blinking on its own schedule, driven from the main loop.
///
/// ```ignore
/// let mut led = LedTask::new(pin);
/// led.begin(100.millis(), 400.millis())?;
/// loop {
///     led.update_with(&mut clock)?;
/// }
/// ```
pub struct LedTask<P> {
    pin: P,
    timer: IntervalTimer,
}

impl<P, E> LedTask<P>
where
    P: OutputPin<Error = E>,
{
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            timer: IntervalTimer::new(),
        }
    }

    /// Sets on/off times and switches the LED off.
    pub fn begin(&mut self, on: MillisDuration, off: MillisDuration) -> Result<(), Error<E>> {
        self.timer.configure(on, off);
        self.pin.set_low().map_err(Error::Pin)
    }

    /// The new state is only kept once the pin shows it, a failed write is
    /// retried on the next poll.
    pub fn update(&mut self, now: MillisInstant) -> Result<Option<TaskState>, Error<E>> {
        let mut timer = self.timer.clone();
        let Some(state) = timer.poll(now) else {
            return Ok(None);
        };

        self.pin
            .set_state(PinState::from(state.is_active()))
            .map_err(Error::Pin)?;

        self.timer = timer;
        Ok(Some(state))
    }

    pub fn update_with<C: MillisClock>(
        &mut self,
        clock: &mut C,
    ) -> Result<Option<TaskState>, Error<E>> {
        let now = clock.now();
        self.update(now)
    }

    pub fn state(&self) -> TaskState {
        self.timer.state()
    }

    pub fn timer(&self) -> &IntervalTimer {
        &self.timer
    }

    /// Switches the LED off and gives the pin back, also when that fails.
    pub fn release(mut self) -> Result<P, (Error<E>, P)> {
        match self.pin.set_low() {
            Ok(()) => Ok(self.pin),
            Err(e) => Err((Error::Pin(e), self.pin)),
        }
    }
}
