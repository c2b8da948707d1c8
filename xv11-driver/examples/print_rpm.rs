//! Prints the measured rotation speed ten times a second while the motor
//! loop settles onto its target. Press enter to stop.

use std::time::Duration;

use clap::Parser;
use xv11_driver::{PwmOutput, Xv11, Xv11Config, Xv11Error};

#[derive(Parser)]
#[command(about = "Prints the rotation speed of an XV11 LIDAR.")]
struct Args {
    /// The device path to a serial port
    #[arg(default_value = "/dev/serial0")]
    port: String,
    /// Target rotation speed in RPM
    #[arg(long, default_value_t = 250.0)]
    rpm: f32,
}

/// Stand-in for the motor PWM; see `print_data.rs`.
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

fn main() {
    let args = Args::parse();
    eprintln!("Press enter to stop.");

    let mut lidar = Xv11::new(Xv11Config {
        port: args.port,
        target_rpm: args.rpm,
        ..Xv11Config::default()
    });
    if let Err(e) = lidar.start(Box::new(NullPwm)) {
        eprintln!("Failed to start the LIDAR: {e}");
        std::process::exit(1);
    }
    eprintln!("PWM range = {:?}", lidar.pwm_range());

    let (stop_tx, stop_rx) = crossbeam_channel::bounded(1);
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        let _ = stop_tx.send(true);
    });

    while stop_rx.try_recv().is_err() {
        eprint!(">");
        println!("{}", lidar.rpm());
        std::thread::sleep(Duration::from_millis(100));
    }

    eprintln!("Stopping the LIDAR.");
    lidar.stop();
    eprintln!("All shut down.");
}
