//! Synthetic frame construction shared by the unit and integration tests.

use crate::constants::{
    CHECKSUM_OFFSET, CHUNKS_PER_PACKET, CHUNK_OFFSET, CHUNK_SIZE, FRAME_SIZE, HEADER_BYTE_0,
    HEADER_BYTE_1, N_PACKETS, PACKET_SIZE,
};
use crate::frame::packet_checksum;

pub(crate) fn encode_chunk(dist_mm: u16, strength: u16, invalid: bool, too_close: bool) -> [u8; 4] {
    let mut flags = ((dist_mm >> 8) & 0x3F) as u8;
    if invalid {
        flags |= 0x80;
    }
    if too_close {
        flags |= 0x40;
    }
    [
        (dist_mm & 0xFF) as u8,
        flags,
        (strength & 0xFF) as u8,
        (strength >> 8) as u8,
    ]
}

pub(crate) fn build_packet(
    packet_index: usize,
    rpm: f32,
    chunks: [[u8; 4]; CHUNKS_PER_PACKET],
) -> [u8; PACKET_SIZE] {
    assert!(packet_index < N_PACKETS);
    let mut packet = [0u8; PACKET_SIZE];
    packet[0] = HEADER_BYTE_0;
    packet[1] = HEADER_BYTE_1 + packet_index as u8;
    let speed = (rpm * 64.0).round() as u16;
    packet[2] = (speed & 0xFF) as u8;
    packet[3] = (speed >> 8) as u8;
    for (i, chunk) in chunks.iter().enumerate() {
        let offset = CHUNK_OFFSET + i * CHUNK_SIZE;
        packet[offset..offset + CHUNK_SIZE].copy_from_slice(chunk);
    }
    let checksum = packet_checksum(&packet);
    packet[CHECKSUM_OFFSET] = (checksum & 0xFF) as u8;
    packet[CHECKSUM_OFFSET + 1] = (checksum >> 8) as u8;
    packet
}

/// Builds a full 90-packet frame; `chunk_for` receives the global degree
/// index 0..360.
pub(crate) fn build_frame(rpm: f32, chunk_for: impl Fn(usize) -> [u8; 4]) -> [u8; FRAME_SIZE] {
    let mut frame = [0u8; FRAME_SIZE];
    for p in 0..N_PACKETS {
        let mut chunks = [[0u8; 4]; CHUNKS_PER_PACKET];
        for (i, chunk) in chunks.iter_mut().enumerate() {
            *chunk = chunk_for(p * CHUNKS_PER_PACKET + i);
        }
        let packet = build_packet(p, rpm, chunks);
        frame[p * PACKET_SIZE..(p + 1) * PACKET_SIZE].copy_from_slice(&packet);
    }
    frame
}
