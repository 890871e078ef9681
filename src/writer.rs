//! MPEG-TS writer
//!
//! Owns the track set and the transport sink. Construction assigns PIDs,
//! picks the PCR track and registers every stream; after that each write
//! call frames one batch of units and hands the envelope to the sink.

use crate::config::WriterConfig;
use crate::envelope::Envelope;
use crate::error::{ConfigurationError, MuxError, Result};
use crate::packetizer::{aac, mpeg_audio, opus, video};
use crate::pid::{self, PidAllocator};
use crate::sink::TransportSink;
use crate::track::Track;

/// MPEG-TS writer
///
/// Tracks are addressed by their index in the list given to [`Writer::new`].
#[derive(Debug)]
pub struct Writer<S: TransportSink> {
    sink: S,
    tracks: Vec<Track>,
    pcr_pid: u16,
}

impl<S: TransportSink> Writer<S> {
    /// Create a writer with the default configuration
    pub fn new(sink: S, tracks: Vec<Track>) -> std::result::Result<Self, ConfigurationError> {
        Self::with_config(sink, tracks, &WriterConfig::default())
    }

    /// Create a writer. On error nothing is returned; the sink may already
    /// have seen some registrations and should be discarded.
    pub fn with_config(
        mut sink: S,
        mut tracks: Vec<Track>,
        config: &WriterConfig,
    ) -> std::result::Result<Self, ConfigurationError> {
        config.validate()?;
        if tracks.is_empty() {
            return Err(ConfigurationError::NoTracks);
        }

        PidAllocator::new(config.first_pid).allocate(&mut tracks)?;
        if config.check_duplicate_pids {
            pid::check_unique(&tracks)?;
        }

        for track in &tracks {
            if let Err(source) = sink.register_stream(track.pid, &track.codec) {
                tracing::warn!(
                    "Sink rejected {} stream on PID {}: {}",
                    track.codec.name(),
                    track.pid,
                    source
                );
                return Err(ConfigurationError::Rejected {
                    pid: track.pid,
                    source,
                });
            }
            tracing::debug!(
                channels = track.codec.channel_count(),
                "Registered {} stream on PID {} (stream_type=0x{:02x})",
                track.codec.name(),
                track.pid,
                track.codec.stream_type()
            );
        }

        let pcr_pid = pid::select_pcr_pid(&tracks)?;
        sink.set_pcr_pid(pcr_pid);
        tracing::debug!("PCR carried on PID {}", pcr_pid);

        Ok(Self {
            sink,
            tracks,
            pcr_pid,
        })
    }

    /// Write an H.264/H.265 access unit
    pub fn write_h26x<T: AsRef<[u8]>>(
        &mut self,
        track: usize,
        pts: i64,
        dts: i64,
        idr_present: bool,
        au: &[T],
    ) -> Result<()> {
        let envelope = video::build(self.track_ref(track)?, pts, dts, idr_present, au)?;
        self.emit(&envelope)
    }

    /// Write Opus packets sharing one presentation time
    pub fn write_opus<T: AsRef<[u8]>>(&mut self, track: usize, pts: i64, packets: &[T]) -> Result<()> {
        let envelope = opus::build(self.track_ref(track)?, pts, packets)?;
        self.emit(&envelope)
    }

    /// Write MPEG-4 audio access units
    pub fn write_mpeg4_audio<T: AsRef<[u8]>>(
        &mut self,
        track: usize,
        pts: i64,
        aus: &[T],
    ) -> Result<()> {
        let envelope = aac::build(self.track_ref(track)?, pts, aus)?;
        self.emit(&envelope)
    }

    /// Write MPEG-1 audio frames
    pub fn write_mpeg1_audio<T: AsRef<[u8]>>(
        &mut self,
        track: usize,
        pts: i64,
        frames: &[T],
    ) -> Result<()> {
        let track = self
            .tracks
            .get_mut(track)
            .ok_or(MuxError::TrackNotFound(track))?;
        let envelope = mpeg_audio::build(track, pts, frames)?;
        self.emit(&envelope)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn pcr_pid(&self) -> u16 {
        self.pcr_pid
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn track_ref(&self, index: usize) -> Result<&Track> {
        self.tracks.get(index).ok_or(MuxError::TrackNotFound(index))
    }

    fn emit(&mut self, envelope: &Envelope) -> Result<()> {
        tracing::trace!(
            pid = envelope.pid,
            size = envelope.payload.len(),
            random_access = envelope.random_access,
            "write PES"
        );
        self.sink.write(envelope)?;
        Ok(())
    }
}
