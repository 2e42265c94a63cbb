use embedded_hal::digital::v2::OutputPin;
use heapless::Vec;

use super::LedTask;
use crate::support::{MillisClock, MillisInstant};
use crate::Error;

/// Fixed number of [`LedTask`]s polled together, in insertion order.
pub struct TaskSet<P, const N: usize> {
    tasks: Vec<LedTask<P>, N>,
}

impl<P, E, const N: usize> TaskSet<P, N>
where
    P: OutputPin<Error = E>,
{
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Hands the task back if the set is full.
    pub fn push(&mut self, task: LedTask<P>) -> Result<(), LedTask<P>> {
        self.tasks.push(task)
    }

    /// Polls every task once, returns how many of them changed state.
    ///
    /// A failing task does not hold back the others; the first error is
    /// returned after all tasks were polled.
    pub fn poll_all(&mut self, now: MillisInstant) -> Result<usize, Error<E>> {
        let mut changed = 0;
        let mut failed = None;
        for task in self.tasks.iter_mut() {
            match task.update(now) {
                Ok(Some(_)) => changed += 1,
                Ok(None) => {}
                Err(e) => {
                    failed.get_or_insert(e);
                }
            }
        }
        match failed {
            Some(e) => Err(e),
            None => Ok(changed),
        }
    }

    pub fn poll_all_with<C: MillisClock>(&mut self, clock: &mut C) -> Result<usize, Error<E>> {
        let now = clock.now();
        self.poll_all(now)
    }

    pub fn get(&self, index: usize) -> Option<&LedTask<P>> {
        self.tasks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut LedTask<P>> {
        self.tasks.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedTask<P>> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Switches every LED off and returns the pins in insertion order.
    /// All pins come back even if some could not be switched off.
    pub fn release(self) -> Result<Vec<P, N>, (Error<E>, Vec<P, N>)> {
        let mut pins = Vec::new();
        let mut failed = None;
        for task in self.tasks {
            let pin = match task.release() {
                Ok(pin) => pin,
                Err((e, pin)) => {
                    failed.get_or_insert(e);
                    pin
                }
            };
            if pins.push(pin).is_err() {
                unreachable!();
            }
        }
        match failed {
            Some(e) => Err((e, pins)),
            None => Ok(pins),
        }
    }
}

impl<P, E, const N: usize> Default for TaskSet<P, N>
where
    P: OutputPin<Error = E>,
{
    fn default() -> Self {
        Self::new()
    }
}
