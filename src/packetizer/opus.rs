//! Opus packets

use bytes::Bytes;

use super::codec_mismatch;
use crate::codec::opus;
use crate::envelope::{Envelope, PesHeader};
use crate::error::Result;
use crate::track::{Codec, Track};

/// Every Opus packet is independently decodable, so the envelope is always
/// a random access point.
pub fn build<T: AsRef<[u8]>>(track: &Track, pts: i64, packets: &[T]) -> Result<Envelope> {
    if !matches!(track.codec, Codec::Opus { .. }) {
        return Err(codec_mismatch(track, "Opus"));
    }

    let payload = opus::marshal(packets)?;

    Ok(Envelope {
        pid: track.pid,
        random_access: true,
        header: PesHeader::audio(pts),
        payload: Bytes::from(payload),
    })
}
