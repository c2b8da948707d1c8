use std::sync::{Arc, Mutex};

mod buffer;
mod constants;
mod decode;
mod driver_threads;
mod error;
mod frame;
mod motor;
mod numeric;
mod serial;
#[cfg(test)]
mod test_frames;
#[cfg(test)]
mod test_pwm;

use crate::buffer::ScanBuffers;
use crate::constants::{DEFAULT_PWM_FREQUENCY, DEFAULT_RPM, DEFAULT_SERIAL_PORT};
use crate::driver_threads::{acquire_scans, AcquisitionContext};
use crate::motor::SpeedController;
use crossbeam_channel::bounded;

pub use crate::driver_threads::{join, DriverThreads};
pub use crate::error::Xv11Error;
pub use crate::motor::PwmOutput;
pub use xv11_data::{Scan, ScanPoint, N_DISTANCES};

/// Consumer callback, invoked synchronously from the acquisition worker
/// once per completed, validated revolution. A handler that blocks stalls
/// acquisition.
pub trait ScanHandler: Send {
    fn on_scan(&mut self, rpm: f32, scan: &Scan);
}

/// Driver configuration. Protocol constants (baud rate, frame layout,
/// proportional gain) are fixed and not configurable.
pub struct Xv11Config {
    /// Serial port the sensor talks on.
    pub port: String,
    /// Rotation speed the motor loop regulates toward. The motor runs
    /// roughly between 200 and 300 RPM.
    pub target_rpm: f32,
    /// PWM frequency for the motor output.
    pub pwm_frequency: u32,
}

impl Default for Xv11Config {
    fn default() -> Xv11Config {
        Xv11Config {
            port: DEFAULT_SERIAL_PORT.to_string(),
            target_rpm: DEFAULT_RPM,
            pwm_frequency: DEFAULT_PWM_FREQUENCY,
        }
    }
}

/// Continuously acquires scans from the XV11 LIDAR.
///
/// `start` brings up the serial transport and the motor PWM and hands both
/// to a single background worker; foreground threads may poll [`Xv11::snapshot`]
/// and [`Xv11::rpm`] concurrently at any time.
pub struct Xv11 {
    config: Xv11Config,
    buffers: Arc<ScanBuffers>,
    current_rpm: Arc<Mutex<f32>>,
    pwm_range: Option<i32>,
    handler: Option<Box<dyn ScanHandler>>,
    threads: Option<DriverThreads>,
}

impl Xv11 {
    pub fn new(config: Xv11Config) -> Xv11 {
        Xv11 {
            config,
            buffers: Arc::new(ScanBuffers::new()),
            current_rpm: Arc::new(Mutex::new(0.0)),
            pwm_range: None,
            handler: None,
            threads: None,
        }
    }

    /// Register the consumer to receive each completed revolution. Takes
    /// effect at the next `start`; the handler survives stop/start cycles.
    pub fn register_handler(&mut self, handler: Box<dyn ScanHandler>) {
        self.handler = Some(handler);
    }

    /// Starts the acquisition: opens the serial port, brings up the motor
    /// PWM with a preset drive, and spawns the worker. Fatal configuration
    /// errors (port open failure, unusable PWM range) are returned before
    /// any data is read. Calling `start` while running is a no-op.
    pub fn start(&mut self, pwm: Box<dyn PwmOutput>) -> Result<(), Xv11Error> {
        if self.threads.is_some() {
            return Ok(());
        }

        let port = serial::open_port(&self.config.port)?;
        let controller = SpeedController::new(pwm, self.config.pwm_frequency)?;
        self.pwm_range = Some(controller.range());

        // Fresh buffers per acquisition run; only configuration survives
        // a stop/start cycle.
        self.buffers = Arc::new(ScanBuffers::new());
        *self.current_rpm.lock().unwrap() = 0.0;

        let (terminator_tx, terminator_rx) = bounded(10);
        let context = AcquisitionContext {
            port,
            controller,
            buffers: Arc::clone(&self.buffers),
            current_rpm: Arc::clone(&self.current_rpm),
            handler: self.handler.take(),
            desired_rpm: self.config.target_rpm,
        };
        let worker_thread = Some(std::thread::spawn(move || {
            acquire_scans(context, terminator_rx)
        }));

        self.threads = Some(DriverThreads {
            terminator_tx,
            worker_thread,
        });
        Ok(())
    }

    /// Signals the worker to exit after its current iteration and waits for
    /// it. The worker's exit path drives the motor to zero, restores the
    /// PWM input mode, and closes the transport. Idempotent: stopping while
    /// idle is a no-op.
    pub fn stop(&mut self) {
        if let Some(mut threads) = self.threads.take() {
            let handler = join(&mut threads);
            // Keep a handler registered in the meantime over the returned one.
            if self.handler.is_none() {
                self.handler = handler;
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.threads.is_some()
    }

    /// Copy of the most recently published revolution. Before the first
    /// revolution completes, every point is invalid.
    pub fn snapshot(&self) -> Scan {
        self.buffers.snapshot()
    }

    /// Rotation speed averaged over the last revolution's packets.
    pub fn rpm(&self) -> f32 {
        *self.current_rpm.lock().unwrap()
    }

    /// The PWM range in effect, available after a successful start.
    pub fn pwm_range(&self) -> Option<i32> {
        self.pwm_range
    }
}

impl Drop for Xv11 {
    fn drop(&mut self) {
        self.stop();
    }
}
