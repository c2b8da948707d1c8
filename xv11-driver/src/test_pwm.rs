//! Recording PWM stub shared by the motor and lifecycle tests.

use std::sync::{Arc, Mutex};

use crate::error::Xv11Error;
use crate::motor::PwmOutput;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PwmEvent {
    OutputMode,
    Frequency(u32),
    SetRange(i32),
    Duty(i32),
    InputMode,
}

pub(crate) struct MockPwm {
    real_range: i32,
    range: i32,
    events: Arc<Mutex<Vec<PwmEvent>>>,
}

impl MockPwm {
    /// `real_range` is what the hardware reports it can resolve, `range`
    /// the configured range before any `set_range` call.
    pub(crate) fn new(real_range: i32, range: i32) -> (MockPwm, Arc<Mutex<Vec<PwmEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let pwm = MockPwm {
            real_range,
            range,
            events: Arc::clone(&events),
        };
        (pwm, events)
    }

    fn record(&self, event: PwmEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl PwmOutput for MockPwm {
    fn set_output_mode(&mut self) -> Result<(), Xv11Error> {
        self.record(PwmEvent::OutputMode);
        Ok(())
    }

    fn set_frequency(&mut self, frequency_hz: u32) -> Result<(), Xv11Error> {
        self.record(PwmEvent::Frequency(frequency_hz));
        Ok(())
    }

    fn real_range(&mut self) -> Result<i32, Xv11Error> {
        Ok(self.real_range)
    }

    fn set_range(&mut self, range: i32) -> Result<(), Xv11Error> {
        self.record(PwmEvent::SetRange(range));
        self.range = range;
        Ok(())
    }

    fn range(&mut self) -> Result<i32, Xv11Error> {
        Ok(self.range)
    }

    fn write_duty(&mut self, duty: i32) -> Result<(), Xv11Error> {
        self.record(PwmEvent::Duty(duty));
        Ok(())
    }

    fn restore_input_mode(&mut self) -> Result<(), Xv11Error> {
        self.record(PwmEvent::InputMode);
        Ok(())
    }
}
