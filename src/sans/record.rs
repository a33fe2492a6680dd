//! States processing the record stream.

use either::Either::{self, Left, Right};
use thiserror::Error;
use zerocopy::FromBytes;

/// An error advancing over a record tag.
#[derive(Debug, Error)]
pub enum RecordTagError {
    /// A tag byte matching no known record kind.
    ///
    /// A corrupt stream is indistinguishable from a finished one without
    /// this, so it is an error rather than a terminal state.
    #[error("Unrecognized record tag ({0:#04x}).")]
    UnrecognizedTag(u8),
}

/// State token to decode a record tag.
#[derive(Debug)]
pub struct RecordTag(pub(super) ());

impl RecordTag {
    /// Transition to another state by decoding a record tag.
    ///
    /// Returns the successor state token for the tagged record kind.
    pub fn advance(
        self,
        r: [u8; 1],
    ) -> Result<Either<DataRecord, Either<EntryRecord, EndRecord>>, RecordTagError> {
        match r[0] {
            0x01 => Ok(Left(DataRecord(()))),
            0x02 => Ok(Right(Left(EntryRecord(())))),
            0x03 => Ok(Right(Right(EndRecord(())))),
            tag => Err(RecordTagError::UnrecognizedTag(tag)),
        }
    }
}

/// The fixed fields leading a data record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Data {
    pub segment_type: u8,
    pub record_flags: u16,
    pub start_address: u32,
    /// Number of program bytes following the fixed fields.
    pub program_bytes: u32,
}

/// State token to decode the fixed fields of a data record.
#[derive(Debug)]
pub struct DataRecord(pub(super) ());

impl DataRecord {
    /// Transition to another state by decoding the fixed fields of a data
    /// record.
    ///
    /// Returns the decoded fields, and a successor state token. When the
    /// record carries program bytes, the successor steps over them.
    pub fn advance(self, r: [u8; 11]) -> (Data, Either<ProgramBytes, RecordTag>) {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct RawData {
            segment_type: u8,
            record_flags: [u8; 2],
            start_address: [u8; 4],
            program_bytes: [u8; 4],
        }

        let RawData {
            segment_type,
            record_flags,
            start_address,
            program_bytes,
        } = zerocopy::transmute!(r);

        let data = Data {
            segment_type,
            record_flags: u16::from_be_bytes(record_flags),
            start_address: u32::from_be_bytes(start_address),
            program_bytes: u32::from_be_bytes(program_bytes),
        };

        let successor = if data.program_bytes != 0 {
            Left(ProgramBytes {
                bytes_remaining: data.program_bytes,
            })
        } else {
            Right(RecordTag(()))
        };

        (data, successor)
    }
}

/// State token to decode one program byte of a data record.
#[derive(Debug)]
pub struct ProgramBytes {
    pub(super) bytes_remaining: u32,
}

impl ProgramBytes {
    /// Transition to another state by decoding one program byte.
    ///
    /// Returns the byte, and a successor state token.
    pub fn advance(self, r: [u8; 1]) -> (u8, Either<Self, RecordTag>) {
        let bytes_remaining = self.bytes_remaining - 1;

        let successor = if bytes_remaining != 0 {
            Left(Self { bytes_remaining })
        } else {
            Right(RecordTag(()))
        };

        (r[0], successor)
    }
}

/// The fields of an entry record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub entry_address: u32,
    pub segment_type: u8,
}

/// State token to decode an entry record.
///
/// The layout follows the published format description; it has not been
/// checked against a captured image carrying one.
#[derive(Debug)]
pub struct EntryRecord(pub(super) ());

impl EntryRecord {
    /// Transition to another state by decoding an entry record.
    ///
    /// Returns the decoded fields, and a successor state token.
    pub fn advance(self, r: [u8; 5]) -> (Entry, RecordTag) {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct RawEntry {
            entry_address: [u8; 4],
            segment_type: u8,
        }

        let RawEntry {
            entry_address,
            segment_type,
        } = zerocopy::transmute!(r);

        let entry = Entry {
            entry_address: u32::from_be_bytes(entry_address),
            segment_type,
        };

        (entry, RecordTag(()))
    }
}

/// State token to decode an end record.
#[derive(Debug)]
pub struct EndRecord(pub(super) ());

impl EndRecord {
    /// Transition out of the machine by decoding an end record.
    ///
    /// Returns the stored checksum. An end record terminates the stream, so
    /// there is no successor state.
    pub fn advance(self, r: [u8; 4]) -> u32 {
        u32::from_be_bytes(r)
    }
}
