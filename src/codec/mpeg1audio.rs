//! MPEG audio frame header decoding
//!
//! Only the fields needed to validate a stream and size its frames are
//! decoded. Header layout (32 bits):
//! `sync(11) | version(2) | layer(2) | protection(1) | bitrate(4) |
//! sample_rate(2) | padding(1) | private(1) | channel_mode(2) | ...`

use thiserror::Error;

/// Length of a frame header in bytes
pub const HEADER_LEN: usize = 4;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameHeaderError {
    #[error("not enough bytes for an MPEG audio frame header")]
    Truncated,

    #[error("sync word not found")]
    MissingSync,

    #[error("reserved MPEG audio version")]
    ReservedVersion,

    #[error("reserved layer")]
    ReservedLayer,

    #[error("invalid bitrate index {0}")]
    InvalidBitrate(u8),

    #[error("invalid sample rate index {0}")]
    InvalidSampleRate(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpegVersion {
    Mpeg1,
    Mpeg2,
    Mpeg25,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    Stereo,
    JointStereo,
    DualChannel,
    Mono,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: MpegVersion,
    /// 1, 2 or 3
    pub layer: u8,
    /// Bits per second; 0 for free-format streams
    pub bitrate: u32,
    pub sample_rate: u32,
    pub padding: bool,
    pub channel_mode: ChannelMode,
}

// kbps, index 0 = free format, index 15 invalid
const BITRATES_V1: [[u16; 15]; 3] = [
    [0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448],
    [0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384],
    [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320],
];

const BITRATES_V2: [[u16; 15]; 2] = [
    [0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256],
    [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160],
];

const SAMPLE_RATES: [[u32; 3]; 3] = [
    [44100, 48000, 32000],
    [22050, 24000, 16000],
    [11025, 12000, 8000],
];

impl FrameHeader {
    pub fn parse(buf: &[u8]) -> Result<Self, FrameHeaderError> {
        if buf.len() < HEADER_LEN {
            return Err(FrameHeaderError::Truncated);
        }
        if buf[0] != 0xFF || buf[1] & 0xE0 != 0xE0 {
            return Err(FrameHeaderError::MissingSync);
        }

        let version = match (buf[1] >> 3) & 0x03 {
            0b11 => MpegVersion::Mpeg1,
            0b10 => MpegVersion::Mpeg2,
            0b00 => MpegVersion::Mpeg25,
            _ => return Err(FrameHeaderError::ReservedVersion),
        };

        let layer = match (buf[1] >> 1) & 0x03 {
            0b11 => 1,
            0b10 => 2,
            0b01 => 3,
            _ => return Err(FrameHeaderError::ReservedLayer),
        };

        let bitrate_idx = buf[2] >> 4;
        if bitrate_idx == 0x0F {
            return Err(FrameHeaderError::InvalidBitrate(bitrate_idx));
        }
        let kbps = match version {
            MpegVersion::Mpeg1 => BITRATES_V1[layer as usize - 1][bitrate_idx as usize],
            _ if layer == 1 => BITRATES_V2[0][bitrate_idx as usize],
            _ => BITRATES_V2[1][bitrate_idx as usize],
        };

        let rate_idx = (buf[2] >> 2) & 0x03;
        if rate_idx == 0x03 {
            return Err(FrameHeaderError::InvalidSampleRate(rate_idx));
        }
        let sample_rate = match version {
            MpegVersion::Mpeg1 => SAMPLE_RATES[0][rate_idx as usize],
            MpegVersion::Mpeg2 => SAMPLE_RATES[1][rate_idx as usize],
            MpegVersion::Mpeg25 => SAMPLE_RATES[2][rate_idx as usize],
        };

        let channel_mode = match buf[3] >> 6 {
            0 => ChannelMode::Stereo,
            1 => ChannelMode::JointStereo,
            2 => ChannelMode::DualChannel,
            _ => ChannelMode::Mono,
        };

        Ok(Self {
            version,
            layer,
            bitrate: kbps as u32 * 1000,
            sample_rate,
            padding: (buf[2] >> 1) & 0x01 != 0,
            channel_mode,
        })
    }

    /// True for the MPEG-2 and MPEG-2.5 low sample rate extensions
    pub fn is_mpeg2(&self) -> bool {
        self.version != MpegVersion::Mpeg1
    }

    /// Frame length in bytes including the header, or None for free format.
    pub fn frame_len(&self) -> Option<usize> {
        if self.bitrate == 0 {
            return None;
        }
        let bitrate = self.bitrate as usize;
        let rate = self.sample_rate as usize;
        let padding = self.padding as usize;

        let len = match self.layer {
            1 => (12 * bitrate / rate + padding) * 4,
            3 if self.is_mpeg2() => 72 * bitrate / rate + padding,
            _ => 144 * bitrate / rate + padding,
        };
        Some(len)
    }

    /// Samples per channel carried in one frame
    pub fn sample_count(&self) -> u32 {
        match self.layer {
            1 => 384,
            3 if self.is_mpeg2() => 576,
            _ => 1152,
        }
    }
}
