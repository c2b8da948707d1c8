/// First byte of the frame header.
pub(crate) const HEADER_BYTE_0: u8 = 0xFA;
/// Second byte of the frame header, index byte of the first packet.
pub(crate) const HEADER_BYTE_1: u8 = 0xA0;

pub(crate) const PACKET_SIZE: usize = 22;
pub(crate) const N_PACKETS: usize = 90;
pub(crate) const FRAME_SIZE: usize = PACKET_SIZE * N_PACKETS;
pub(crate) const CHUNK_SIZE: usize = 4;
pub(crate) const CHUNKS_PER_PACKET: usize = 4;
/// Offset of the first chunk within a packet.
pub(crate) const CHUNK_OFFSET: usize = 4;
pub(crate) const CHECKSUM_OFFSET: usize = 20;

pub(crate) const BAUD_RATE: u32 = 115_200;
pub(crate) const READ_TIMEOUT_MS: u64 = 500;

pub(crate) const DEFAULT_SERIAL_PORT: &str = "/dev/serial0";
pub(crate) const DEFAULT_RPM: f32 = 250.0;
pub(crate) const DEFAULT_PWM_FREQUENCY: u32 = 50;
/// Proportional gain of the motor speed loop, in duty fraction per RPM.
pub(crate) const RPM_GAIN: f32 = 0.000_05;
/// Ranges below this many steps cannot regulate the motor.
pub(crate) const MIN_PWM_RANGE: i32 = 25;
