//! Per-codec PES envelope construction
//!
//! Each submodule turns the units of one codec family into an [`Envelope`]:
//! it picks the timestamps, the random access flag and frames the payload.
//! Packetizers check that the track they are given carries their codec.
//!
//! [`Envelope`]: crate::envelope::Envelope

pub mod aac;
pub mod mpeg_audio;
pub mod opus;
pub mod video;

use crate::error::MuxError;
use crate::track::Track;

fn codec_mismatch(track: &Track, expected: &'static str) -> MuxError {
    MuxError::CodecMismatch {
        pid: track.pid,
        expected,
        actual: track.codec.name(),
    }
}
