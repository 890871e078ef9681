//! Transport sink interface
//!
//! The sink owns everything below the PES layer: splitting payloads into
//! transport packets, continuity counters, PAT/PMT emission and PCR
//! insertion. The writer only hands it finished envelopes.

use std::io;

use crate::envelope::Envelope;
use crate::track::Codec;

pub trait TransportSink {
    /// Announce an elementary stream. Fails if the PID or codec cannot be carried.
    fn register_stream(&mut self, pid: u16, codec: &Codec) -> io::Result<()>;

    /// Choose the PID whose packets carry the program clock reference
    fn set_pcr_pid(&mut self, pid: u16);

    /// Packetize and emit one envelope
    fn write(&mut self, envelope: &Envelope) -> io::Result<()>;
}

impl<S: TransportSink + ?Sized> TransportSink for &mut S {
    fn register_stream(&mut self, pid: u16, codec: &Codec) -> io::Result<()> {
        (**self).register_stream(pid, codec)
    }

    fn set_pcr_pid(&mut self, pid: u16) {
        (**self).set_pcr_pid(pid)
    }

    fn write(&mut self, envelope: &Envelope) -> io::Result<()> {
        (**self).write(envelope)
    }
}

/// In-memory sink that keeps everything it is given
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub streams: Vec<(u16, Codec)>,
    pub pcr_pid: Option<u16>,
    pub envelopes: Vec<Envelope>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Envelopes written to one PID, in write order
    pub fn envelopes_for(&self, pid: u16) -> impl Iterator<Item = &Envelope> + '_ {
        self.envelopes.iter().filter(move |e| e.pid == pid)
    }

    pub fn total_payload_bytes(&self) -> usize {
        self.envelopes.iter().map(|e| e.payload.len()).sum()
    }
}

impl TransportSink for RecordingSink {
    fn register_stream(&mut self, pid: u16, codec: &Codec) -> io::Result<()> {
        if self.streams.iter().any(|(p, _)| *p == pid) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("PID {} already registered", pid),
            ));
        }
        self.streams.push((pid, codec.clone()));
        Ok(())
    }

    fn set_pcr_pid(&mut self, pid: u16) {
        self.pcr_pid = Some(pid);
    }

    fn write(&mut self, envelope: &Envelope) -> io::Result<()> {
        if !self.streams.iter().any(|(p, _)| *p == envelope.pid) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("PID {} is not registered", envelope.pid),
            ));
        }
        self.envelopes.push(envelope.clone());
        Ok(())
    }
}
