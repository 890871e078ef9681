//! ADTS framing for MPEG-4 AAC access units

use thiserror::Error;

/// ADTS header length without CRC
pub const HEADER_LEN: usize = 7;

/// Largest value of the 13-bit frame length field
const MAX_FRAME_LEN: usize = (1 << 13) - 1;

/// Sampling frequencies in index order
const SAMPLE_RATES: [u32; 13] = [
    96000, 88200, 64000, 48000, 44100, 32000, 24000, 22050, 16000, 12000, 11025, 8000, 7350,
];

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdtsError {
    #[error("unsupported audio object type {0}")]
    UnsupportedObjectType(u8),

    #[error("unsupported sample rate {0}")]
    UnsupportedSampleRate(u32),

    #[error("unsupported channel count {0}")]
    UnsupportedChannelCount(u8),

    #[error("access unit of {0} bytes does not fit in an ADTS frame")]
    FrameTooLarge(usize),
}

/// One access unit together with the codec configuration it is framed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdtsPacket<'a> {
    /// MPEG-4 audio object type (1 = Main, 2 = LC, 3 = SSR, 4 = LTP)
    pub object_type: u8,
    pub sample_rate: u32,
    pub channel_count: u8,
    pub au: &'a [u8],
}

fn sample_rate_index(rate: u32) -> Option<u8> {
    SAMPLE_RATES
        .iter()
        .position(|&r| r == rate)
        .map(|i| i as u8)
}

/// MPEG-4 channel_configuration for a channel count. Configuration 7 is
/// the 8-channel (7.1) layout; there is none for 7 channels.
fn channel_config(channels: u8) -> Option<u8> {
    match channels {
        1..=6 => Some(channels),
        8 => Some(7),
        _ => None,
    }
}

impl AdtsPacket<'_> {
    fn write_to(&self, out: &mut Vec<u8>) -> Result<(), AdtsError> {
        if !(1..=4).contains(&self.object_type) {
            return Err(AdtsError::UnsupportedObjectType(self.object_type));
        }
        let rate_idx = sample_rate_index(self.sample_rate)
            .ok_or(AdtsError::UnsupportedSampleRate(self.sample_rate))?;
        let channel_cfg = channel_config(self.channel_count)
            .ok_or(AdtsError::UnsupportedChannelCount(self.channel_count))?;
        let frame_len = HEADER_LEN + self.au.len();
        if frame_len > MAX_FRAME_LEN {
            return Err(AdtsError::FrameTooLarge(self.au.len()));
        }

        let frame_len = frame_len as u32;
        let buffer_fullness = 0x7FFu32; // VBR

        // Syncword, MPEG-4, layer 0, no CRC
        out.extend_from_slice(&[0xFF, 0xF1]);
        out.push(((self.object_type - 1) << 6) | (rate_idx << 2) | ((channel_cfg >> 2) & 0x01));
        // Channels (lower), frame length, buffer fullness, one raw data block
        out.extend_from_slice(
            &((((channel_cfg & 0b011) as u32) << 30) | (frame_len << 13) | (buffer_fullness << 2))
                .to_be_bytes(),
        );
        out.extend_from_slice(self.au);
        Ok(())
    }
}

/// Encode a sequence of access units, each behind its own ADTS header.
pub fn marshal(packets: &[AdtsPacket<'_>]) -> Result<Vec<u8>, AdtsError> {
    let size = packets.iter().map(|p| HEADER_LEN + p.au.len()).sum();
    let mut out = Vec::with_capacity(size);
    for packet in packets {
        packet.write_to(&mut out)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let au = [0xAA; 10];
        let out = marshal(&[AdtsPacket {
            object_type: 2,
            sample_rate: 48000,
            channel_count: 2,
            au: &au,
        }])
        .unwrap();

        assert_eq!(out.len(), HEADER_LEN + 10);
        assert_eq!(&out[..2], &[0xFF, 0xF1]);
        // LC (1 << 6) | 48 kHz index 3 (3 << 2) | channel high bit 0
        assert_eq!(out[2], 0x4C);
        assert_eq!(out[3] >> 6, 2);

        let frame_len =
            (((out[3] & 0x03) as usize) << 11) | ((out[4] as usize) << 3) | (out[5] as usize >> 5);
        assert_eq!(frame_len, 17);
        assert_eq!(&out[HEADER_LEN..], &au);
    }

    #[test]
    fn test_multiple_units() {
        let a = [1u8; 4];
        let b = [2u8; 6];
        fn pkt(au: &[u8]) -> AdtsPacket<'_> {
            AdtsPacket {
                object_type: 2,
                sample_rate: 44100,
                channel_count: 1,
                au,
            }
        }
        let out = marshal(&[pkt(&a), pkt(&b)]).unwrap();
        assert_eq!(out.len(), 2 * HEADER_LEN + 10);
        assert_eq!(&out[HEADER_LEN + 4..HEADER_LEN + 6], &[0xFF, 0xF1]);
    }

    #[test]
    fn test_rejects_bad_config() {
        let au = [0u8; 1];
        let mut pkt = AdtsPacket {
            object_type: 2,
            sample_rate: 12345,
            channel_count: 2,
            au: &au,
        };
        assert_eq!(
            marshal(&[pkt.clone()]),
            Err(AdtsError::UnsupportedSampleRate(12345))
        );

        pkt.sample_rate = 48000;
        pkt.channel_count = 0;
        assert_eq!(
            marshal(&[pkt.clone()]),
            Err(AdtsError::UnsupportedChannelCount(0))
        );

        pkt.channel_count = 2;
        pkt.object_type = 5;
        assert_eq!(marshal(&[pkt]), Err(AdtsError::UnsupportedObjectType(5)));
    }

    #[test]
    fn test_channel_configuration_bits() {
        fn config_bits(channel_count: u8) -> Result<u8, AdtsError> {
            let au = [0u8; 2];
            let out = marshal(&[AdtsPacket {
                object_type: 2,
                sample_rate: 48000,
                channel_count,
                au: &au,
            }])?;
            Ok(((out[2] & 0x01) << 2) | (out[3] >> 6))
        }

        assert_eq!(config_bits(6), Ok(6));
        assert_eq!(config_bits(8), Ok(7));
        assert_eq!(config_bits(7), Err(AdtsError::UnsupportedChannelCount(7)));
        assert_eq!(config_bits(9), Err(AdtsError::UnsupportedChannelCount(9)));
    }

    #[test]
    fn test_rejects_oversized_unit() {
        let au = vec![0u8; MAX_FRAME_LEN];
        let pkt = AdtsPacket {
            object_type: 2,
            sample_rate: 48000,
            channel_count: 2,
            au: &au,
        };
        assert_eq!(marshal(&[pkt]), Err(AdtsError::FrameTooLarge(MAX_FRAME_LEN)));
    }
}
