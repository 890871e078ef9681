//! PID assignment and PCR track selection

use crate::error::ConfigurationError;
use crate::track::Track;

/// First PID handed out when the configuration does not say otherwise
pub const DEFAULT_FIRST_PID: u16 = 256;

/// Lowest PID available to elementary streams
pub const MIN_PID: u16 = 0x0010;

/// Highest PID available to elementary streams (0x1FFF is the null PID)
pub const MAX_PID: u16 = 0x1FFE;

/// Hands out PIDs to tracks that do not carry one yet
#[derive(Debug, Clone)]
pub struct PidAllocator {
    next_pid: u16,
}

impl Default for PidAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_FIRST_PID)
    }
}

impl PidAllocator {
    pub fn new(first_pid: u16) -> Self {
        Self {
            next_pid: first_pid,
        }
    }

    /// Assign PIDs in registration order. Tracks with a non-zero PID are
    /// left alone, so calling this twice changes nothing.
    ///
    /// Fails once the next PID would leave the elementary stream range.
    /// Tracks handled before the failure keep their new PIDs.
    pub fn allocate(&mut self, tracks: &mut [Track]) -> Result<(), ConfigurationError> {
        for track in tracks.iter_mut().filter(|t| t.pid == 0) {
            if self.next_pid > MAX_PID {
                return Err(ConfigurationError::PidExhausted(self.next_pid));
            }
            track.pid = self.next_pid;
            self.next_pid += 1;
            tracing::debug!("Assigned PID {} to {} track", track.pid, track.codec.name());
        }
        Ok(())
    }

    pub fn next_pid(&self) -> u16 {
        self.next_pid
    }
}

/// Fail on the first PID used by more than one track.
pub fn check_unique(tracks: &[Track]) -> Result<(), ConfigurationError> {
    for (i, track) in tracks.iter().enumerate() {
        if tracks[..i].iter().any(|t| t.pid == track.pid) {
            return Err(ConfigurationError::DuplicatePid(track.pid));
        }
    }
    Ok(())
}

/// PID of the track carrying the PCR: the first video track, else the first track.
pub fn select_pcr_pid(tracks: &[Track]) -> Result<u16, ConfigurationError> {
    tracks
        .iter()
        .find(|t| t.is_video())
        .or_else(|| tracks.first())
        .map(|t| t.pid)
        .ok_or(ConfigurationError::NoTracks)
}
