pub mod scan;

pub use scan::{Scan, ScanPoint, N_DISTANCES};
