//! Opus access unit framing for transport streams
//!
//! Every packet is preceded by a control header made of the 11-bit
//! `0x3FF` prefix, three cleared flag bits, two reserved bits and a
//! fixed-width 16-bit packet length.

use crate::error::EncodingError;

/// Encoded size of one control header
pub const CONTROL_HEADER_SIZE: usize = 4;

/// Largest packet length the control header can declare
pub const MAX_PACKET_SIZE: usize = u16::MAX as usize;

const CONTROL_PREFIX: [u8; 2] = [0x7F, 0xE0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlHeader {
    pub payload_size: u16,
}

impl ControlHeader {
    pub fn for_packet(packet: &[u8]) -> Result<Self, EncodingError> {
        let payload_size =
            u16::try_from(packet.len()).map_err(|_| EncodingError::PayloadTooLarge {
                size: packet.len(),
                max: MAX_PACKET_SIZE,
            })?;
        Ok(Self { payload_size })
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&CONTROL_PREFIX);
        out.extend_from_slice(&self.payload_size.to_be_bytes());
    }

    /// Decode a control header from the start of `buf`.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        if buf.len() < CONTROL_HEADER_SIZE || buf[..2] != CONTROL_PREFIX {
            return None;
        }
        Some(Self {
            payload_size: u16::from_be_bytes([buf[2], buf[3]]),
        })
    }
}

/// Concatenate packets, each behind its control header.
pub fn marshal<T: AsRef<[u8]>>(packets: &[T]) -> Result<Vec<u8>, EncodingError> {
    let mut headers = Vec::with_capacity(packets.len());
    let mut size = 0;
    for packet in packets {
        let packet = packet.as_ref();
        headers.push(ControlHeader::for_packet(packet)?);
        size += CONTROL_HEADER_SIZE + packet.len();
    }

    let mut out = Vec::with_capacity(size);
    for (header, packet) in headers.iter().zip(packets) {
        header.write_to(&mut out);
        out.extend_from_slice(packet.as_ref());
    }
    Ok(out)
}
