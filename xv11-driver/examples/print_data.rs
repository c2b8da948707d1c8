//! Prints every valid scan point as tab-separated x, y, r, phi, strength.
//! Press enter to stop.

use clap::Parser;
use xv11_driver::{PwmOutput, Scan, ScanHandler, Xv11, Xv11Config, Xv11Error};

#[derive(Parser)]
#[command(about = "Reads scan data from an XV11 LIDAR.")]
struct Args {
    /// The device path to a serial port
    #[arg(default_value = "/dev/serial0")]
    port: String,
    /// Target rotation speed in RPM
    #[arg(long, default_value_t = 250.0)]
    rpm: f32,
}

/// Stand-in for the motor PWM. A deployment on real hardware implements
/// `PwmOutput` over its GPIO library (the reference wiring drives BCM pin
/// 18); this stub accepts every command so the demo runs anywhere.
struct NullPwm;

impl PwmOutput for NullPwm {
    fn set_output_mode(&mut self) -> Result<(), Xv11Error> {
        Ok(())
    }
    fn set_frequency(&mut self, _frequency_hz: u32) -> Result<(), Xv11Error> {
        Ok(())
    }
    fn real_range(&mut self) -> Result<i32, Xv11Error> {
        Ok(1024)
    }
    fn set_range(&mut self, _range: i32) -> Result<(), Xv11Error> {
        Ok(())
    }
    fn range(&mut self) -> Result<i32, Xv11Error> {
        Ok(1024)
    }
    fn write_duty(&mut self, _duty: i32) -> Result<(), Xv11Error> {
        Ok(())
    }
    fn restore_input_mode(&mut self) -> Result<(), Xv11Error> {
        Ok(())
    }
}

struct StdoutHandler;

impl ScanHandler for StdoutHandler {
    fn on_scan(&mut self, _rpm: f32, scan: &Scan) {
        for point in scan.valid_points() {
            println!(
                "{:e}\t{:e}\t{:e}\t{:e}\t{:e}",
                point.x, point.y, point.r, point.phi, point.signal_strength
            );
        }
        eprint!(".");
    }
}

fn main() {
    let args = Args::parse();

    eprintln!("Data format: x <tab> y <tab> r <tab> phi <tab> strength");
    eprintln!("Press enter to stop.");

    let mut lidar = Xv11::new(Xv11Config {
        port: args.port,
        target_rpm: args.rpm,
        ..Xv11Config::default()
    });
    lidar.register_handler(Box::new(StdoutHandler));
    if let Err(e) = lidar.start(Box::new(NullPwm)) {
        eprintln!("Failed to start the LIDAR: {e}");
        std::process::exit(1);
    }

    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);

    lidar.stop();
    eprintln!();
}
