//! State processing the image header.

use zerocopy::FromBytes;

use super::record::RecordTag;

/// The magic number carried by images produced by IAR tools.
///
/// The decoder does not check for this value; headers are surfaced verbatim
/// for the application to judge.
pub const MAGIC_NUMBER: u32 = 0x7F49_4152;

/// The fixed fields leading an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic_number: u32,
    pub program_flags: u32,
    /// Total number of program bytes carried by the image's data records.
    pub program_bytes: u32,
    pub version: u16,
}

/// State token to decode an image header.
#[derive(Debug)]
pub struct ImageHeader;

impl ImageHeader {
    /// Transition to another state by decoding an image header.
    ///
    /// Returns the decoded header and a successor state token positioned at
    /// the first record.
    pub fn advance(r: [u8; 14]) -> (Header, RecordTag) {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct RawHeader {
            magic_number: [u8; 4],
            program_flags: [u8; 4],
            program_bytes: [u8; 4],
            version: [u8; 2],
        }

        let RawHeader {
            magic_number,
            program_flags,
            program_bytes,
            version,
        } = zerocopy::transmute!(r);

        let header = Header {
            magic_number: u32::from_be_bytes(magic_number),
            program_flags: u32::from_be_bytes(program_flags),
            program_bytes: u32::from_be_bytes(program_bytes),
            version: u16::from_be_bytes(version),
        };

        (header, RecordTag(()))
    }
}
