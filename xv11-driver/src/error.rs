use std::error::Error;
use std::fmt::{Debug, Display};
use std::{fmt, io};

#[derive(Debug)]
pub enum Xv11Error {
    /// A packet's stored checksum did not match the computed one.
    /// Fields are (expected, calculated).
    ChecksumMismatch(u16, u16),
    /// The PWM collaborator reported no usable range for the motor channel.
    PwmRangeUnavailable(i32),
    /// The PWM collaborator failed while driving the motor.
    PwmFault(String),
    SerialError(serialport::Error),
    IoError(io::Error),
}

impl fmt::Display for Xv11Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Xv11Error::ChecksumMismatch(expected, calculated) => write!(
                f,
                "Checksum mismatched. Calculated = {:04X}, expected = {:04X}.",
                calculated, expected
            ),
            Xv11Error::PwmRangeUnavailable(range) => write!(
                f,
                "Fatal GPIO error: could not get a usable PWM range (reported {}).",
                range
            ),
            Xv11Error::PwmFault(message) => write!(f, "PWM fault: {}", message),
            Xv11Error::IoError(err) => Display::fmt(&err, f),
            Xv11Error::SerialError(err) => Display::fmt(&err, f),
        }
    }
}

impl Error for Xv11Error {}

impl From<io::Error> for Xv11Error {
    fn from(err: io::Error) -> Self {
        Xv11Error::IoError(err)
    }
}

impl From<serialport::Error> for Xv11Error {
    fn from(err: serialport::Error) -> Self {
        Xv11Error::SerialError(err)
    }
}
