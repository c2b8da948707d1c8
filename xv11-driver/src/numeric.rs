use std::f32::consts::PI;

use xv11_data::N_DISTANCES;

pub(crate) fn to_u16(low: u8, high: u8) -> u16 {
    (low as u16) | ((high as u16) << 8)
}

/// Motor speed field of a 22-byte packet, fixed-point 1/64 RPM.
pub(crate) fn motor_rpm(packet: &[u8]) -> f32 {
    to_u16(packet[2], packet[3]) as f32 / 64.0
}

/// No return, out of range, or too low reflectivity.
pub(crate) fn invalid_data_flag(chunk: &[u8]) -> bool {
    chunk[1] & 0x80 != 0
}

/// Object too close, possibly a poor reading; kicks in below roughly 0.6 m.
pub(crate) fn strength_warning_flag(chunk: &[u8]) -> bool {
    chunk[1] & 0x40 != 0
}

/// 14-bit distance in millimeters.
pub(crate) fn dist_mm(chunk: &[u8]) -> u16 {
    to_u16(chunk[0], chunk[1] & 0x3F)
}

/// 16-bit signal strength.
pub(crate) fn signal_strength(chunk: &[u8]) -> u16 {
    to_u16(chunk[2], chunk[3])
}

/// Maps degree index 0..360 onto [-pi, pi) with index 0 at -pi.
pub(crate) fn index_to_angle(index: usize) -> f32 {
    (index as f32) / (N_DISTANCES as f32) * 2.0 * PI - PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motor_rpm() {
        // 0x3E80 = 16000, 16000 / 64 = 250 RPM
        let packet = [0xFA, 0xA0, 0x80, 0x3E];
        assert_eq!(motor_rpm(&packet), 250.0);
    }

    #[test]
    fn test_chunk_flags() {
        assert!(invalid_data_flag(&[0x00, 0x80, 0x00, 0x00]));
        assert!(!invalid_data_flag(&[0x00, 0x7F, 0x00, 0x00]));
        assert!(strength_warning_flag(&[0x00, 0x40, 0x00, 0x00]));
        assert!(!strength_warning_flag(&[0x00, 0xBF, 0x00, 0x00]));
    }

    #[test]
    fn test_dist_mm_uses_fourteen_bits() {
        // Flag bits must not leak into the distance.
        assert_eq!(dist_mm(&[0xFF, 0xFF, 0x00, 0x00]), 0x3FFF);
        assert_eq!(dist_mm(&[0x34, 0x12, 0x00, 0x00]), 0x1234);
        assert_eq!(dist_mm(&[0x00, 0xC0, 0x00, 0x00]), 0);
    }

    #[test]
    fn test_signal_strength() {
        assert_eq!(signal_strength(&[0x00, 0x00, 0xCD, 0xAB]), 0xABCD);
    }

    #[test]
    fn test_index_to_angle_is_a_bijection_onto_half_open_range() {
        let step = 2.0 * PI / 360.0;
        for j in 0..N_DISTANCES {
            let phi = index_to_angle(j);
            assert!(phi >= -PI && phi < PI, "index {} mapped to {}", j, phi);
            let expected = -PI + (j as f32) * step;
            assert!((phi - expected).abs() < 1e-6);
        }
        assert_eq!(index_to_angle(0), -PI);
        // Monotonically increasing, so every index gets a distinct angle.
        for j in 1..N_DISTANCES {
            assert!(index_to_angle(j) > index_to_angle(j - 1));
        }
    }
}
