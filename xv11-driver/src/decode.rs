use xv11_data::{Scan, ScanPoint};

use crate::constants::{CHUNKS_PER_PACKET, CHUNK_OFFSET, CHUNK_SIZE, FRAME_SIZE, N_PACKETS, PACKET_SIZE};
use crate::numeric::{
    dist_mm, index_to_angle, invalid_data_flag, motor_rpm, signal_strength, strength_warning_flag,
};

/// Decodes a checksum-validated frame into the write-target scan.
///
/// Returns the rotation speed averaged over the 90 motor-speed fields and
/// whether the revolution contained at least one valid reading. Chunks with
/// the invalid-data flag set or a zero distance reset their degree slot, so
/// no reading from an earlier revolution survives in the buffer.
pub(crate) fn decode_frame(frame: &[u8; FRAME_SIZE], scan: &mut Scan) -> (f32, bool) {
    let mut rpm_sum = 0.0f32;
    let mut data_available = false;

    for p in 0..N_PACKETS {
        let packet = &frame[p * PACKET_SIZE..(p + 1) * PACKET_SIZE];
        rpm_sum += motor_rpm(packet);

        for i in 0..CHUNKS_PER_PACKET {
            let offset = CHUNK_OFFSET + i * CHUNK_SIZE;
            let chunk = &packet[offset..offset + CHUNK_SIZE];
            let degree = p * CHUNKS_PER_PACKET + i;

            let distance = dist_mm(chunk);
            if invalid_data_flag(chunk) || distance == 0 {
                scan.points[degree] = ScanPoint::default();
                continue;
            }

            let phi = index_to_angle(degree);
            let r = distance as f32 / 1000.0;
            scan.points[degree] = ScanPoint {
                r,
                phi,
                x: phi.cos() * r,
                y: phi.sin() * r,
                signal_strength: signal_strength(chunk) as f32 / 65536.0,
                too_close: strength_warning_flag(chunk),
                valid: true,
            };
            data_available = true;
        }
    }

    (rpm_sum / N_PACKETS as f32, data_available)
}
