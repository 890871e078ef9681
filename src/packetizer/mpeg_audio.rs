//! MPEG-1 audio frames
//!
//! Frames are already self-delimiting, so the payload is their plain
//! concatenation. The first frame of a track is checked once to refuse
//! MPEG-2 streams; after that the check is skipped.

use bytes::{BufMut, BytesMut};

use super::codec_mismatch;
use crate::codec::mpeg1audio::FrameHeader;
use crate::envelope::{Envelope, PesHeader};
use crate::error::{EncodingError, Result, UnsupportedFormatError};
use crate::track::{Codec, Track};

pub fn build<T: AsRef<[u8]>>(track: &mut Track, pts: i64, frames: &[T]) -> Result<Envelope> {
    if track.codec != Codec::MpegAudio {
        return Err(codec_mismatch(track, "MPEG-1 Audio"));
    }

    if !track.header_validated {
        validate_first_frame(track, frames)?;
        track.header_validated = true;
    }

    let size = frames.iter().map(|f| f.as_ref().len()).sum();
    let mut payload = BytesMut::with_capacity(size);
    for frame in frames {
        payload.put_slice(frame.as_ref());
    }

    Ok(Envelope {
        pid: track.pid,
        random_access: true,
        header: PesHeader::audio(pts),
        payload: payload.freeze(),
    })
}

fn validate_first_frame<T: AsRef<[u8]>>(track: &Track, frames: &[T]) -> Result<()> {
    let first = frames.first().ok_or(EncodingError::EmptyAccessUnit)?;
    let header = FrameHeader::parse(first.as_ref())?;

    if header.is_mpeg2() {
        tracing::warn!(
            "Refusing {:?} audio on PID {}: only MPEG-1 is supported",
            header.version,
            track.pid
        );
        return Err(UnsupportedFormatError::NotMpeg1.into());
    }

    tracing::debug!(
        "PID {}: MPEG-1 layer {} audio, {} Hz, {} bps",
        track.pid,
        header.layer,
        header.sample_rate,
        header.bitrate
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::mpeg1audio::FrameHeaderError;
    use crate::envelope::{Timestamps, STREAM_ID_AUDIO};
    use crate::error::MuxError;

    const MPEG1_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
    const MPEG2_HEADER: [u8; 4] = [0xFF, 0xF3, 0x80, 0xC4];

    fn frame(header: [u8; 4], len: usize) -> Vec<u8> {
        let mut f = header.to_vec();
        f.resize(len, 0x55);
        f
    }

    fn track() -> Track {
        Track::new(Codec::MpegAudio).with_pid(259)
    }

    #[test]
    fn test_frames_are_concatenated() {
        let mut t = track();
        let frames = vec![frame(MPEG1_HEADER, 417), frame(MPEG1_HEADER, 418)];
        let env = build(&mut t, 5000, &frames).unwrap();

        assert!(t.header_validated());
        assert!(env.random_access);
        assert_eq!(env.header.stream_id, STREAM_ID_AUDIO);
        assert_eq!(env.header.timestamps, Timestamps::PtsOnly(5000));
        assert_eq!(env.payload.len(), 835);
        assert_eq!(&env.payload[417..421], &MPEG1_HEADER);
    }

    #[test]
    fn test_validation_happens_once() {
        let mut t = track();

        let err = build(&mut t, 0, &[frame(MPEG2_HEADER, 100)]).unwrap_err();
        assert!(matches!(
            err,
            MuxError::UnsupportedFormat(UnsupportedFormatError::NotMpeg1)
        ));
        assert!(!t.header_validated());

        build(&mut t, 1, &[frame(MPEG1_HEADER, 100)]).unwrap();
        assert!(t.header_validated());

        // no re-validation: an MPEG-2 frame now goes through untouched
        let env = build(&mut t, 2, &[frame(MPEG2_HEADER, 100)]).unwrap();
        assert_eq!(&env.payload[..4], &MPEG2_HEADER);
    }

    #[test]
    fn test_header_parse_error_propagates() {
        let mut t = track();
        let err = build(&mut t, 0, &[vec![0x00u8, 0x01, 0x02, 0x03]]).unwrap_err();
        assert!(matches!(
            err,
            MuxError::FrameHeader(FrameHeaderError::MissingSync)
        ));
        assert!(!t.header_validated());
    }

    #[test]
    fn test_empty_first_write() {
        let mut t = track();
        let frames: Vec<Vec<u8>> = Vec::new();
        let err = build(&mut t, 0, &frames).unwrap_err();
        assert!(matches!(
            err,
            MuxError::Encoding(EncodingError::EmptyAccessUnit)
        ));
    }
}
