//! Recording output pins for host tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::v2::OutputPin;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockError(pub &'static str);

/// Ordered log of every level written by every pin created from it.
#[derive(Clone, Debug, Default)]
pub struct Wire(Rc<RefCell<Vec<(&'static str, bool)>>>);

impl Wire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, name: &'static str) -> MockPin {
        MockPin {
            name,
            wire: self.clone(),
            broken: false,
        }
    }

    /// A pin whose every write fails.
    pub fn broken_pin(&self, name: &'static str) -> MockPin {
        MockPin {
            broken: true,
            ..self.pin(name)
        }
    }

    pub fn events(&self) -> Vec<(&'static str, bool)> {
        self.0.borrow().clone()
    }

    /// Levels written to one line, in order.
    pub fn levels(&self, name: &str) -> Vec<bool> {
        self.0
            .borrow()
            .iter()
            .filter(|(line, _)| *line == name)
            .map(|(_, level)| *level)
            .collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

#[derive(Debug)]
pub struct MockPin {
    name: &'static str,
    wire: Wire,
    broken: bool,
}

impl MockPin {
    fn write(&mut self, level: bool) -> Result<(), MockError> {
        if self.broken {
            return Err(MockError(self.name));
        }
        self.wire.0.borrow_mut().push((self.name, level));
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl OutputPin for MockPin {
    type Error = MockError;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}
