//! Integration testing module
//!
//! End-to-end tests for the writer:
//! - Mixed audio/video sessions against a recording sink
//! - Error propagation from codecs and the sink
//! - OBU header parsing on real bitstream samples
