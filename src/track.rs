//! Elementary stream descriptions

/// Video codec carried as an Annex-B byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCodec {
    H264,
    H265,
}

/// Codec of a track together with the parameters its framing needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Codec {
    Video {
        codec: VideoCodec,
    },
    Opus {
        /// Not used for framing; sinks announce it in the Opus audio descriptor
        channel_count: u8,
    },
    Aac {
        /// MPEG-4 audio object type (2 = AAC-LC)
        object_type: u8,
        sample_rate: u32,
        channel_count: u8,
    },
    MpegAudio,
}

impl Codec {
    pub fn is_video(&self) -> bool {
        matches!(self, Codec::Video { .. })
    }

    /// Channel count of audio codecs that declare one
    pub fn channel_count(&self) -> Option<u8> {
        match self {
            Codec::Opus { channel_count } | Codec::Aac { channel_count, .. } => Some(*channel_count),
            Codec::Video { .. } | Codec::MpegAudio => None,
        }
    }

    /// Short name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Codec::Video {
                codec: VideoCodec::H264,
            } => "H264",
            Codec::Video {
                codec: VideoCodec::H265,
            } => "H265",
            Codec::Opus { .. } => "Opus",
            Codec::Aac { .. } => "AAC",
            Codec::MpegAudio => "MPEG-1 Audio",
        }
    }

    /// ISO/IEC 13818-1 stream_type announced in the program map
    pub fn stream_type(&self) -> u8 {
        match self {
            Codec::Video {
                codec: VideoCodec::H264,
            } => 0x1B,
            Codec::Video {
                codec: VideoCodec::H265,
            } => 0x24,
            // private PES data, identified by a registration descriptor
            Codec::Opus { .. } => 0x06,
            Codec::Aac { .. } => 0x0F,
            Codec::MpegAudio => 0x03,
        }
    }
}

/// One elementary stream of the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub codec: Codec,
    /// Transport PID; 0 lets the writer assign one
    pub pid: u16,
    /// Set once the first MPEG audio frame header has been checked.
    /// Only touched by the writer, which holds `&mut self` while doing so.
    pub(crate) header_validated: bool,
}

impl Track {
    pub fn new(codec: Codec) -> Self {
        Self {
            codec,
            pid: 0,
            header_validated: false,
        }
    }

    /// Use a caller-chosen PID instead of an allocated one
    pub fn with_pid(mut self, pid: u16) -> Self {
        self.pid = pid;
        self
    }

    pub fn is_video(&self) -> bool {
        self.codec.is_video()
    }

    pub fn header_validated(&self) -> bool {
        self.header_validated
    }
}
