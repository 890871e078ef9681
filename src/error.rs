use thiserror::Error;

use crate::codec::adts::AdtsError;
use crate::codec::annexb::AnnexBError;
use crate::codec::mpeg1audio::FrameHeaderError;

/// Main error type for the transport stream writer
#[derive(Error, Debug)]
pub enum MuxError {
    /// An OBU header could not be parsed
    #[error("Invalid OBU header: {0}")]
    InvalidHeader(#[from] InvalidHeaderError),

    /// The writer could not be configured
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The stream uses a format variant this writer cannot carry
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(#[from] UnsupportedFormatError),

    /// A payload could not be framed
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Annex-B marshaling failed
    #[error(transparent)]
    AnnexB(#[from] AnnexBError),

    /// ADTS marshaling failed
    #[error(transparent)]
    Adts(#[from] AdtsError),

    /// An MPEG audio frame header could not be decoded
    #[error(transparent)]
    FrameHeader(#[from] FrameHeaderError),

    /// The transport sink failed to accept a packet
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// No track exists at the given registration index
    #[error("Track not found: index={0}")]
    TrackNotFound(usize),

    /// A write method was called on a track of another codec family
    #[error("Codec mismatch on PID {pid}: expected {expected}, track carries {actual}")]
    CodecMismatch {
        pid: u16,
        expected: &'static str,
        actual: &'static str,
    },
}

/// OBU header parse failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidHeaderError {
    /// The buffer ends before the header does
    #[error("buffer too short for OBU header")]
    Truncated,

    /// The forbidden bit or the reserved bit is set
    #[error("forbidden or reserved bit set")]
    MalformedBits,
}

/// Writer construction failures
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The writer was created without tracks
    #[error("no tracks provided")]
    NoTracks,

    /// Two tracks share the same PID
    #[error("duplicate PID {0}")]
    DuplicatePid(u16),

    /// Allocation ran past the last usable PID
    #[error("no PID left to allocate (next would be 0x{0:04x})")]
    PidExhausted(u16),

    /// The transport sink refused to register a stream
    #[error("stream registration rejected for PID {pid}: {source}")]
    Rejected {
        pid: u16,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is out of range or unreadable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Format variants the writer refuses to carry
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedFormatError {
    #[error("only MPEG-1 audio is supported")]
    NotMpeg1,
}

/// Payload framing failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    /// A unit is longer than its length field can express
    #[error("payload of {size} bytes exceeds maximum of {max}")]
    PayloadTooLarge { size: usize, max: usize },

    /// A write call carried no units where at least one is needed
    #[error("access unit is empty")]
    EmptyAccessUnit,
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MuxError>;
