//! AV1 open bitstream unit (OBU) header parsing
//!
//! Byte 0: `forbidden(1) | type(4) | extension_flag(1) | has_size(1) | reserved(1)`.
//! Optional extension byte: `temporal_id(3) | spatial_id(2) | reserved(3)`.

use crate::error::InvalidHeaderError;

/// OBU kind carried in bits 6-3 of the first header byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObuType {
    SequenceHeader,
    TemporalDelimiter,
    FrameHeader,
    TileGroup,
    Metadata,
    Frame,
    RedundantFrameHeader,
    TileList,
    Padding,
    Reserved(ReservedObuType),
}

/// A type value the AV1 syntax leaves unassigned (0 and 9-14)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedObuType(u8);

impl ReservedObuType {
    /// `None` unless `value` is one of the unassigned type values.
    pub fn new(value: u8) -> Option<Self> {
        match value {
            0 | 9..=14 => Some(Self(value)),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl ObuType {
    pub fn from_bits(value: u8) -> Self {
        match value & 0x0f {
            1 => ObuType::SequenceHeader,
            2 => ObuType::TemporalDelimiter,
            3 => ObuType::FrameHeader,
            4 => ObuType::TileGroup,
            5 => ObuType::Metadata,
            6 => ObuType::Frame,
            7 => ObuType::RedundantFrameHeader,
            8 => ObuType::TileList,
            15 => ObuType::Padding,
            other => ObuType::Reserved(ReservedObuType(other)),
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            ObuType::SequenceHeader => 1,
            ObuType::TemporalDelimiter => 2,
            ObuType::FrameHeader => 3,
            ObuType::TileGroup => 4,
            ObuType::Metadata => 5,
            ObuType::Frame => 6,
            ObuType::RedundantFrameHeader => 7,
            ObuType::TileList => 8,
            ObuType::Padding => 15,
            ObuType::Reserved(v) => v.value(),
        }
    }
}

/// Scalability ids from the extension byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObuExtension {
    pub temporal_id: u8,
    pub spatial_id: u8,
}

/// A parsed OBU header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObuHeader {
    pub obu_type: ObuType,
    pub has_size: bool,
    /// Present iff the extension flag is set
    pub extension: Option<ObuExtension>,
}

impl ObuHeader {
    /// Decode a header from the start of `buf`.
    pub fn parse(buf: &[u8]) -> Result<Self, InvalidHeaderError> {
        let first = *buf.first().ok_or(InvalidHeaderError::Truncated)?;

        if first & 0x80 != 0 || first & 0x01 != 0 {
            return Err(InvalidHeaderError::MalformedBits);
        }

        let obu_type = ObuType::from_bits((first >> 3) & 0x0f);
        let extension_flag = first & 0x04 != 0;
        let has_size = first & 0x02 != 0;

        let extension = if extension_flag {
            let ext = *buf.get(1).ok_or(InvalidHeaderError::Truncated)?;
            Some(ObuExtension {
                temporal_id: ext >> 5,
                spatial_id: (ext >> 3) & 0x03,
            })
        } else {
            None
        };

        Ok(Self {
            obu_type,
            has_size,
            extension,
        })
    }

    pub fn extension_flag(&self) -> bool {
        self.extension.is_some()
    }

    /// Encoded length in bytes (1, or 2 with the extension byte)
    pub fn size(&self) -> usize {
        if self.extension.is_some() {
            2
        } else {
            1
        }
    }

    /// Encode the header. Reserved bits are written as zero.
    pub fn marshal(&self) -> Vec<u8> {
        let mut first = self.obu_type.bits() << 3;
        if self.extension.is_some() {
            first |= 0x04;
        }
        if self.has_size {
            first |= 0x02;
        }

        let mut out = Vec::with_capacity(self.size());
        out.push(first);
        if let Some(ext) = self.extension {
            out.push(((ext.temporal_id & 0x07) << 5) | ((ext.spatial_id & 0x03) << 3));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_header() {
        let buf = [
            0x0a, 0x0e, 0x00, 0x00, 0x00, 0x4a, 0xab, 0xbf, 0xc3, 0x77, 0x6b, 0xe4, 0x40, 0x40,
            0x40, 0x41,
        ];
        let h = ObuHeader::parse(&buf).unwrap();
        assert_eq!(
            h,
            ObuHeader {
                obu_type: ObuType::SequenceHeader,
                has_size: true,
                extension: None,
            }
        );
        assert!(!h.extension_flag());
    }

    #[test]
    fn test_empty_buffer_is_truncated() {
        assert_eq!(ObuHeader::parse(&[]), Err(InvalidHeaderError::Truncated));
    }

    #[test]
    fn test_forbidden_and_reserved_bits() {
        assert_eq!(
            ObuHeader::parse(&[0x80 | 0x0a]),
            Err(InvalidHeaderError::MalformedBits)
        );
        assert_eq!(
            ObuHeader::parse(&[0x0b]),
            Err(InvalidHeaderError::MalformedBits)
        );
    }

    #[test]
    fn test_all_single_byte_headers() {
        for type_bits in 0u8..16 {
            for has_size in [false, true] {
                let byte = (type_bits << 3) | if has_size { 0x02 } else { 0 };
                let h = ObuHeader::parse(&[byte]).unwrap();
                assert_eq!(h.obu_type.bits(), type_bits);
                assert_eq!(h.has_size, has_size);
                assert_eq!(h.extension, None);
                assert_eq!(h.size(), 1);
            }
        }
    }

    #[test]
    fn test_extension_requires_second_byte() {
        // frame header kind, extension flag set
        let first = (3 << 3) | 0x04;
        assert_eq!(
            ObuHeader::parse(&[first]),
            Err(InvalidHeaderError::Truncated)
        );

        for temporal_id in 0u8..8 {
            for spatial_id in 0u8..4 {
                // reserved bits set on purpose: they are not validated
                let ext = (temporal_id << 5) | (spatial_id << 3) | 0x07;
                let h = ObuHeader::parse(&[first, ext]).unwrap();
                assert_eq!(h.obu_type, ObuType::FrameHeader);
                assert_eq!(
                    h.extension,
                    Some(ObuExtension {
                        temporal_id,
                        spatial_id
                    })
                );
            }
        }
    }

    #[test]
    fn test_reserved_types() {
        let h = ObuHeader::parse(&[9 << 3]).unwrap();
        assert_eq!(h.obu_type, ObuType::Reserved(ReservedObuType::new(9).unwrap()));
        let h = ObuHeader::parse(&[15 << 3]).unwrap();
        assert_eq!(h.obu_type, ObuType::Padding);
    }

    #[test]
    fn test_reserved_type_values() {
        for value in 0u8..=255 {
            let reserved = ReservedObuType::new(value);
            assert_eq!(reserved.is_some(), value == 0 || (9..=14).contains(&value));
            if let Some(r) = reserved {
                assert_eq!(ObuType::Reserved(r).bits(), value);
                assert_eq!(ObuType::from_bits(value), ObuType::Reserved(r));
            }
        }
        // 1 is a sequence header, never a reserved type
        assert_eq!(ReservedObuType::new(1), None);
        assert_eq!(ObuType::from_bits(1), ObuType::SequenceHeader);
    }

    #[test]
    fn test_marshal_matches_input() {
        let bytes = [0x34, 0xa8];
        let h = ObuHeader::parse(&bytes).unwrap();
        assert_eq!(h.marshal(), bytes.to_vec());
        assert_eq!(h.size(), 2);
    }
}
