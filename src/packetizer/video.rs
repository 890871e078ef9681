//! H.264/H.265 access units

use bytes::Bytes;

use super::codec_mismatch;
use crate::codec::annexb;
use crate::envelope::{Envelope, PesHeader, Timestamps};
use crate::error::Result;
use crate::track::Track;

/// Frame an access unit as Annex-B. Only IDR access units are flagged
/// as random access points.
pub fn build<T: AsRef<[u8]>>(
    track: &Track,
    pts: i64,
    dts: i64,
    idr_present: bool,
    au: &[T],
) -> Result<Envelope> {
    if !track.is_video() {
        return Err(codec_mismatch(track, "video"));
    }

    let payload = annexb::marshal(au)?;

    Ok(Envelope {
        pid: track.pid,
        random_access: idr_present,
        header: PesHeader::video(Timestamps::from_pts_dts(pts, dts)),
        payload: Bytes::from(payload),
    })
}
