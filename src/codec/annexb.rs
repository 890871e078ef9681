//! Annex-B byte stream framing for H.264/H.265 access units

use thiserror::Error;

/// Start code written before every NAL unit
pub const START_CODE: [u8; 4] = [0x00, 0x00, 0x00, 0x01];

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnexBError {
    #[error("access unit contains no NAL units")]
    EmptyAccessUnit,

    #[error("NAL unit {0} is empty")]
    EmptyNalu(usize),
}

/// Encode an access unit as an Annex-B byte stream.
pub fn marshal<T: AsRef<[u8]>>(nalus: &[T]) -> Result<Vec<u8>, AnnexBError> {
    if nalus.is_empty() {
        return Err(AnnexBError::EmptyAccessUnit);
    }

    let mut size = 0;
    for (i, nalu) in nalus.iter().enumerate() {
        let len = nalu.as_ref().len();
        if len == 0 {
            return Err(AnnexBError::EmptyNalu(i));
        }
        size += START_CODE.len() + len;
    }

    let mut out = Vec::with_capacity(size);
    for nalu in nalus {
        out.extend_from_slice(&START_CODE);
        out.extend_from_slice(nalu.as_ref());
    }
    Ok(out)
}
