//! MPEG-TS elementary stream framing
//!
//! Parses AV1 OBU headers and builds PES envelopes for H.264/H.265, Opus,
//! AAC and MPEG-1 audio. Transport packetization is left to a
//! [`TransportSink`] implementation.

pub mod codec;
pub(crate) mod config;
pub(crate) mod envelope;
pub(crate) mod error;
pub mod packetizer;
pub(crate) mod pid;
pub(crate) mod sink;
pub(crate) mod track;
pub(crate) mod writer;

#[cfg(test)]
pub(crate) mod tests;

pub use codec::av1::{ObuExtension, ObuHeader, ObuType, ReservedObuType};
pub use config::WriterConfig;
pub use envelope::{
    Envelope, PesHeader, PtsDtsIndicator, Timestamps, MARKER_BITS, STREAM_ID_AUDIO,
    STREAM_ID_VIDEO,
};
pub use error::{
    ConfigurationError, EncodingError, InvalidHeaderError, MuxError, Result,
    UnsupportedFormatError,
};
pub use pid::{check_unique, select_pcr_pid, PidAllocator, DEFAULT_FIRST_PID, MAX_PID, MIN_PID};
pub use sink::{RecordingSink, TransportSink};
pub use track::{Codec, Track, VideoCodec};
pub use writer::Writer;
