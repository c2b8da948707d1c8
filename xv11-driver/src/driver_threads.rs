use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use serialport::SerialPort;

use crate::buffer::ScanBuffers;
use crate::constants::FRAME_SIZE;
use crate::decode::decode_frame;
use crate::frame::{count_checksum_errors, read_frame};
use crate::motor::SpeedController;
use crate::ScanHandler;

/// Handle to the background acquisition worker.
pub struct DriverThreads {
    pub(crate) terminator_tx: Sender<bool>,
    pub(crate) worker_thread: Option<JoinHandle<Option<Box<dyn ScanHandler>>>>,
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

/// Everything the worker owns for the lifetime of one acquisition run.
pub(crate) struct AcquisitionContext {
    pub(crate) port: Box<dyn SerialPort>,
    pub(crate) controller: SpeedController,
    pub(crate) buffers: Arc<ScanBuffers>,
    pub(crate) current_rpm: Arc<Mutex<f32>>,
    pub(crate) handler: Option<Box<dyn ScanHandler>>,
    pub(crate) desired_rpm: f32,
}

/// One iteration per revolution: synchronize, validate, decode into the
/// write target, publish, adjust the motor, notify the consumer. Transient
/// frame faults (lost sync, short read, checksum) drop the revolution
/// silently; the next iteration resynchronizes. Returns the handler so a
/// later start can reuse it.
pub(crate) fn acquire_scans(
    mut ctx: AcquisitionContext,
    terminator_rx: Receiver<bool>,
) -> Option<Box<dyn ScanHandler>> {
    let mut frame = [0u8; FRAME_SIZE];
    while !do_terminate(&terminator_rx) {
        let complete = match read_frame(&mut ctx.port, &mut frame) {
            Ok(complete) => complete,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        if !complete || count_checksum_errors(&frame) != 0 {
            continue;
        }

        let (rpm, data_available, scan) = ctx.buffers.with_write_target(|scan| {
            let (rpm, data_available) = decode_frame(&frame, scan);
            (rpm, data_available, scan.clone())
        });
        *ctx.current_rpm.lock().unwrap() = rpm;
        ctx.buffers.publish();

        if let Err(e) = ctx.controller.adjust(ctx.desired_rpm, rpm) {
            eprintln!("{e}");
        }

        // The clone taken above is the buffer just decoded, which publish
        // turned into the stable one; handler and snapshot agree by
        // construction.
        if data_available {
            if let Some(handler) = ctx.handler.as_mut() {
                handler.on_scan(rpm, &scan);
            }
        }
    }

    if let Err(e) = ctx.controller.stop() {
        eprintln!("{e}");
    }
    ctx.handler
}

/// Function to join the driver thread, returning the registered handler.
/// This function is automatically called when `driver_threads` is dropped.
pub fn join(driver_threads: &mut DriverThreads) -> Option<Box<dyn ScanHandler>> {
    match driver_threads.worker_thread.take() {
        Some(thread) => {
            driver_threads.terminator_tx.send(true).unwrap();
            thread.join().unwrap()
        }
        None => None,
    }
}

impl Drop for DriverThreads {
    fn drop(&mut self) {
        join(self);
    }
}
