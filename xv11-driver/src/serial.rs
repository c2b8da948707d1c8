use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::constants::{BAUD_RATE, READ_TIMEOUT_MS};
use crate::error::Xv11Error;

/// Opens the sensor's serial port at 115200 baud, 8N1, no flow control.
/// The read timeout bounds the worker's blocking wait so a stop request is
/// honored even on an idle line.
pub(crate) fn open_port(port_name: &str) -> Result<Box<dyn SerialPort>, Xv11Error> {
    let port = serialport::new(port_name, BAUD_RATE)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(Duration::from_millis(READ_TIMEOUT_MS))
        .open()?;
    Ok(port)
}
