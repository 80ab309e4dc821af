use nom::{bytes::complete::take, number::complete::le_u16, IResult};

use super::MatParseError;

/// Byte length of the fixed MAT-file header.
pub const HEADER_LEN: usize = 128;

/// Version word identifying a Level 5 MAT-file.
const MAT5_VERSION: u16 = 0x0100;

/// Endian indicator as laid out by a little-endian writer.
const LITTLE_ENDIAN_INDICATOR: &str = "IM";

#[derive(Debug, PartialEq)]
pub struct MatHeader {
    pub description: String,
    pub version: u16,
    pub endian: String,
}

impl MatHeader {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, text) = take(116usize)(input)?; // descriptive text
        let (input, _) = take(8usize)(input)?; // subsystem data offset, unused
        let (input, version) = le_u16(input)?; // version word
        let (input, endian) = take(2usize)(input)?; // endian indicator
        Ok((
            input,
            MatHeader {
                description: String::from_utf8_lossy(text).trim_end().to_string(),
                version,
                endian: String::from_utf8_lossy(endian).to_string(),
            },
        ))
    }

    /// Reject containers this reader does not understand.
    ///
    /// Only little-endian Level 5 files are accepted: a `MI` indicator means
    /// the file was written big-endian, and any other version word marks a
    /// different container generation (v4, or the HDF5-based v7.3).
    pub fn validate(&self) -> Result<(), MatParseError> {
        if self.endian != LITTLE_ENDIAN_INDICATOR {
            return Err(MatParseError::UnsupportedEndianness(self.endian.clone()));
        }
        if self.version != MAT5_VERSION {
            return Err(MatParseError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}

#[cfg(test)]
mod header_test {
    use super::*;

    fn header_bytes(version: u16, endian: &[u8; 2]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN);
        let text = b"MATLAB 5.0 MAT-file, created by satmerge";
        buf.extend_from_slice(text);
        buf.resize(116, b' ');
        buf.extend_from_slice(&[0u8; 8]);
        buf.extend_from_slice(&version.to_le_bytes());
        buf.extend_from_slice(endian);
        buf
    }

    #[test]
    fn test_parse_header() {
        let bytes = header_bytes(0x0100, b"IM");
        let (rest, header) = MatHeader::parse(&bytes).unwrap();

        assert!(rest.is_empty());
        assert_eq!(
            header.description,
            "MATLAB 5.0 MAT-file, created by satmerge"
        );
        assert_eq!(header.version, 0x0100);
        assert_eq!(header.endian, "IM");
        assert!(header.validate().is_ok());
    }

    #[test]
    fn test_reject_big_endian() {
        let bytes = header_bytes(0x0100, b"MI");
        let (_, header) = MatHeader::parse(&bytes).unwrap();

        assert_eq!(
            header.validate(),
            Err(MatParseError::UnsupportedEndianness("MI".to_string()))
        );
    }

    #[test]
    fn test_reject_unknown_version() {
        let bytes = header_bytes(0x0200, b"IM");
        let (_, header) = MatHeader::parse(&bytes).unwrap();

        assert_eq!(
            header.validate(),
            Err(MatParseError::UnsupportedVersion(0x0200))
        );
    }
}
