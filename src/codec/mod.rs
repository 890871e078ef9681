//! Codec-level byte framing
//!
//! Pure functions and header types for the codecs the writer carries.
//! Nothing here knows about PIDs or PES envelopes.

pub mod adts;
pub mod annexb;
pub mod av1;
pub mod mpeg1audio;
pub mod opus;
