use crate::constants::{MIN_PWM_RANGE, RPM_GAIN};
use crate::error::Xv11Error;

/// Collaborator interface to the PWM output driving the spin motor.
///
/// Implementations own whatever process-wide hardware state their backend
/// needs (a pigpio-style library initializes per process, not per channel);
/// the driver only demands output-mode setup on construction and input-mode
/// restore on teardown, so one owning handle exists per controller lifetime.
pub trait PwmOutput: Send {
    fn set_output_mode(&mut self) -> Result<(), Xv11Error>;
    fn set_frequency(&mut self, frequency_hz: u32) -> Result<(), Xv11Error>;
    /// Range the hardware can actually resolve at the configured frequency.
    fn real_range(&mut self) -> Result<i32, Xv11Error>;
    fn set_range(&mut self, range: i32) -> Result<(), Xv11Error>;
    /// Currently configured range; negative values are failure sentinels.
    fn range(&mut self) -> Result<i32, Xv11Error>;
    fn write_duty(&mut self, duty: i32) -> Result<(), Xv11Error>;
    fn restore_input_mode(&mut self) -> Result<(), Xv11Error>;
}

/// Proportional feedback loop pulling the measured rotation speed toward
/// the desired one, one correction per completed revolution.
pub(crate) struct SpeedController {
    pwm: Box<dyn PwmOutput>,
    drive: i32,
    range: i32,
    max_pwm: i32,
}

impl SpeedController {
    /// Brings up the PWM output and presets the drive to half the ceiling
    /// so the motor spins before the first measurement exists. Range
    /// problems are fatal configuration errors.
    pub(crate) fn new(
        mut pwm: Box<dyn PwmOutput>,
        frequency_hz: u32,
    ) -> Result<SpeedController, Xv11Error> {
        pwm.set_output_mode()?;
        pwm.set_frequency(frequency_hz)?;

        let real_range = pwm.real_range()?;
        if real_range > 255 && real_range < 20000 {
            pwm.set_range(real_range)?;
        }
        let range = pwm.range()?;
        if range < MIN_PWM_RANGE {
            // Partial bring-up: hand the channel back before failing.
            let _ = pwm.restore_input_mode();
            return Err(Xv11Error::PwmRangeUnavailable(range));
        }

        let max_pwm = range / 2;
        let mut controller = SpeedController {
            pwm,
            drive: 0,
            range,
            max_pwm,
        };
        controller.apply(max_pwm / 2)?;
        Ok(controller)
    }

    /// Proportional update, `drive += round((desired - measured) * gain * range)`.
    /// `f32::round` breaks ties away from zero, so an error worth exactly
    /// half a duty step still nudges the motor.
    pub(crate) fn adjust(&mut self, desired_rpm: f32, measured_rpm: f32) -> Result<(), Xv11Error> {
        let correction = ((desired_rpm - measured_rpm) * RPM_GAIN * self.range as f32).round() as i32;
        self.apply(self.drive + correction)
    }

    fn apply(&mut self, drive: i32) -> Result<(), Xv11Error> {
        self.drive = drive.clamp(0, self.max_pwm);
        self.pwm.write_duty(self.drive)
    }

    /// Drives the motor to zero and releases the output mode.
    pub(crate) fn stop(&mut self) -> Result<(), Xv11Error> {
        self.apply(0)?;
        self.pwm.restore_input_mode()
    }

    pub(crate) fn range(&self) -> i32 {
        self.range
    }

    #[cfg(test)]
    pub(crate) fn drive(&self) -> i32 {
        self.drive
    }
}
