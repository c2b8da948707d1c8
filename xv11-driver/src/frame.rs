use std::io;
use std::io::Read;

use crate::constants::{
    CHECKSUM_OFFSET, FRAME_SIZE, HEADER_BYTE_0, HEADER_BYTE_1, N_PACKETS, PACKET_SIZE,
};
use crate::error::Xv11Error;
use crate::numeric::to_u16;

/// Rolling checksum over the first 20 bytes of a packet, folded as ten
/// little-endian words and reduced to 15 bits.
pub(crate) fn packet_checksum(packet: &[u8]) -> u16 {
    let mut checksum32: u32 = 0;
    for i in 0..(CHECKSUM_OFFSET / 2) {
        let word = to_u16(packet[2 * i], packet[2 * i + 1]) as u32;
        checksum32 = (checksum32 << 1) + word;
    }
    (((checksum32 & 0x7FFF) + (checksum32 >> 15)) & 0x7FFF) as u16
}

pub(crate) fn err_if_checksum_mismatched(packet: &[u8]) -> Result<(), Xv11Error> {
    let calculated = packet_checksum(packet);
    let expected = to_u16(packet[CHECKSUM_OFFSET], packet[CHECKSUM_OFFSET + 1]);
    match calculated != expected {
        true => Err(Xv11Error::ChecksumMismatch(expected, calculated)),
        false => Ok(()),
    }
}

/// Number of packets in the frame that fail their checksum. A frame is
/// decoded only when this is zero; one corrupted packet drops the whole
/// revolution.
pub(crate) fn count_checksum_errors(frame: &[u8; FRAME_SIZE]) -> usize {
    (0..N_PACKETS)
        .map(|p| &frame[p * PACKET_SIZE..(p + 1) * PACKET_SIZE])
        .filter(|packet| err_if_checksum_mismatched(packet).is_err())
        .count()
}

fn read_byte<R: Read>(reader: &mut R) -> Result<Option<u8>, Xv11Error> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => return Ok(None),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Scans the stream byte by byte for the 0xFA 0xA0 frame header. A 0xFA
/// followed by anything other than 0xA0 restarts the search, but a repeated
/// 0xFA stays a candidate for the first marker byte.
fn sync_header<R: Read>(reader: &mut R) -> Result<bool, Xv11Error> {
    loop {
        let first = match read_byte(reader)? {
            Some(b) => b,
            None => return Ok(false),
        };
        if first != HEADER_BYTE_0 {
            continue;
        }
        loop {
            let second = match read_byte(reader)? {
                Some(b) => b,
                None => return Ok(false),
            };
            if second == HEADER_BYTE_1 {
                return Ok(true);
            }
            if second != HEADER_BYTE_0 {
                break;
            }
        }
    }
}

fn fill_remainder<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<bool, Xv11Error> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => return Ok(false),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => return Ok(false),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(true)
}

/// Synchronizes on the frame header and reads one full 1980-byte frame.
/// Returns `Ok(false)` when the stream ran dry before a complete frame
/// arrived; the partial frame is discarded and the caller resynchronizes
/// from scratch on its next iteration.
pub(crate) fn read_frame<R: Read>(
    reader: &mut R,
    frame: &mut [u8; FRAME_SIZE],
) -> Result<bool, Xv11Error> {
    if !sync_header(reader)? {
        return Ok(false);
    }
    frame[0] = HEADER_BYTE_0;
    frame[1] = HEADER_BYTE_1;
    fill_remainder(reader, &mut frame[2..])
}
