//! MPEG-4 AAC access units, framed as ADTS

use bytes::Bytes;

use super::codec_mismatch;
use crate::codec::adts::{self, AdtsPacket};
use crate::envelope::{Envelope, PesHeader};
use crate::error::Result;
use crate::track::{Codec, Track};

pub fn build<T: AsRef<[u8]>>(track: &Track, pts: i64, aus: &[T]) -> Result<Envelope> {
    let Codec::Aac {
        object_type,
        sample_rate,
        channel_count,
    } = track.codec
    else {
        return Err(codec_mismatch(track, "AAC"));
    };

    let packets: Vec<AdtsPacket<'_>> = aus
        .iter()
        .map(|au| AdtsPacket {
            object_type,
            sample_rate,
            channel_count,
            au: au.as_ref(),
        })
        .collect();

    let payload = adts::marshal(&packets)?;

    Ok(Envelope {
        pid: track.pid,
        random_access: true,
        header: PesHeader::audio(pts),
        payload: Bytes::from(payload),
    })
}
