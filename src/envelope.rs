//! PES envelope handed to the transport sink

use bytes::Bytes;

/// PES stream_id for video elementary streams
pub const STREAM_ID_VIDEO: u8 = 224;

/// PES stream_id for audio elementary streams
pub const STREAM_ID_AUDIO: u8 = 192;

/// Value of the '10' marker bits that open the optional PES header
pub const MARKER_BITS: u8 = 2;

/// Which timestamps the optional PES header carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PtsDtsIndicator {
    PtsOnly,
    PtsAndDts,
}

/// Timestamps in 90 kHz clock units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamps {
    PtsOnly(i64),
    PtsAndDts { pts: i64, dts: i64 },
}

impl Timestamps {
    /// DTS is only written when it differs from PTS.
    pub fn from_pts_dts(pts: i64, dts: i64) -> Self {
        if pts == dts {
            Timestamps::PtsOnly(pts)
        } else {
            Timestamps::PtsAndDts { pts, dts }
        }
    }

    pub fn indicator(&self) -> PtsDtsIndicator {
        match self {
            Timestamps::PtsOnly(_) => PtsDtsIndicator::PtsOnly,
            Timestamps::PtsAndDts { .. } => PtsDtsIndicator::PtsAndDts,
        }
    }

    pub fn pts(&self) -> i64 {
        match *self {
            Timestamps::PtsOnly(pts) | Timestamps::PtsAndDts { pts, .. } => pts,
        }
    }

    pub fn dts(&self) -> Option<i64> {
        match *self {
            Timestamps::PtsOnly(_) => None,
            Timestamps::PtsAndDts { dts, .. } => Some(dts),
        }
    }
}

/// PES header fields the writer decides on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PesHeader {
    /// Stream category: `STREAM_ID_VIDEO` or `STREAM_ID_AUDIO`
    pub stream_id: u8,
    pub marker_bits: u8,
    pub timestamps: Timestamps,
}

impl PesHeader {
    pub fn video(timestamps: Timestamps) -> Self {
        Self {
            stream_id: STREAM_ID_VIDEO,
            marker_bits: MARKER_BITS,
            timestamps,
        }
    }

    pub fn audio(pts: i64) -> Self {
        Self {
            stream_id: STREAM_ID_AUDIO,
            marker_bits: MARKER_BITS,
            timestamps: Timestamps::PtsOnly(pts),
        }
    }
}

/// One PES packet ready for transport packetization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub pid: u16,
    /// Set the random access indicator in the adaptation field
    pub random_access: bool,
    pub header: PesHeader,
    pub payload: Bytes,
}
