/// Number of distance readings during one 360 degree rotation,
/// so one reading per integer degree.
pub const N_DISTANCES: usize = 360;

/// One of the 360 distance datapoints of a revolution.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScanPoint {
    /// Distance in meters.
    pub r: f32,
    /// Angle in radians with phi = 0 in front of the sensor.
    pub phi: f32,
    /// X position in meters, positive in front of the sensor.
    pub x: f32,
    /// Y position in meters, positive to the left of the sensor.
    pub y: f32,
    /// Return strength of the laser pulse as a value between 0 and 1.
    pub signal_strength: f32,
    /// Set when the object is close enough to degrade the reading.
    pub too_close: bool,
    /// Set when the sensor reported a return for this degree.
    pub valid: bool,
}

/// One full revolution of scan data, indexed by integer degree.
#[derive(Clone, Debug, PartialEq)]
pub struct Scan {
    pub points: [ScanPoint; N_DISTANCES],
}

impl Scan {
    pub fn new() -> Scan {
        Scan {
            points: [ScanPoint::default(); N_DISTANCES],
        }
    }

    /// Iterator over the readings the sensor actually returned.
    pub fn valid_points(&self) -> impl Iterator<Item = &ScanPoint> {
        self.points.iter().filter(|p| p.valid)
    }
}

impl Default for Scan {
    fn default() -> Scan {
        Scan::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scan_has_no_valid_points() {
        let scan = Scan::new();
        assert_eq!(scan.points.len(), N_DISTANCES);
        assert_eq!(scan.valid_points().count(), 0);
    }

    #[test]
    fn test_valid_points_filters() {
        let mut scan = Scan::new();
        scan.points[10].valid = true;
        scan.points[10].r = 1.5;
        scan.points[350].valid = true;
        assert_eq!(scan.valid_points().count(), 2);
    }
}
