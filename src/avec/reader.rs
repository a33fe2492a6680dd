//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::io::{ErrorKind, Read};

use either::Either::{Left, Right};
use thiserror::Error;

use crate::sans::{
    Decoder,
    check::{self, Check},
    record::RecordTagError,
};

use super::{FromImage, FromProgramBytes};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The reader ends inside the fixed image header.
    #[error("Reader ends inside the image header.")]
    IncompleteHeader,
    /// A record extends past the end of the reader.
    #[error("Record extends past the end of the reader.")]
    Truncated,
    /// A record carries an unrecognized tag.
    #[error("Unrecognized record tag ({0:#04x}).")]
    UnrecognizedTag(u8),
}

impl Error {
    fn incomplete_header(err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::UnexpectedEof => Self::IncompleteHeader,
            _ => Self::Io(err),
        }
    }

    fn truncated(err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::UnexpectedEof => Self::Truncated,
            _ => Self::Io(err),
        }
    }
}

/// Decode an image from a reader, publishing to a receiver.
///
/// This method is also re-exported as `simplecode::avec::decode_reader`.
///
/// The checksum is accumulated as bytes are read, covering everything up to
/// the end record's stored checksum field, so the image is decoded and
/// verified in a single pass without seeking. The comparison outcome is
/// returned for the application to report; a mismatch is not an error.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, o: &mut impl FromImage) -> Result<Check, Error> {
    let mut c = 0; // Running checksum accumulator value.

    let (header, mut record_tag) =
        Decoder::advance(take(r, Some(&mut c)).map_err(Error::incomplete_header)?);
    o.add_header(header);

    loop {
        let successor = match record_tag.advance(take(r, Some(&mut c)).map_err(Error::truncated)?)
        {
            Ok(successor) => successor,
            Err(RecordTagError::UnrecognizedTag(tag)) => Err(Error::UnrecognizedTag(tag))?,
        };

        record_tag = match successor {
            Left(state) => {
                let (data, successor) =
                    state.advance(take(r, Some(&mut c)).map_err(Error::truncated)?);

                let mut bytes = o.add_data(data);

                match successor {
                    Left(mut state) => loop {
                        let (value, successor) =
                            state.advance(take(r, Some(&mut c)).map_err(Error::truncated)?);

                        if let Some(bytes) = &mut bytes {
                            bytes.add_program_byte(value);
                        }

                        state = match successor {
                            Left(state) => state,
                            Right(state) => break state,
                        };
                    },
                    Right(state) => state,
                }
            }
            Right(Left(state)) => {
                let (entry, successor) =
                    state.advance(take(r, Some(&mut c)).map_err(Error::truncated)?);
                o.add_entry(entry);

                successor
            }
            Right(Right(state)) => {
                // The stored checksum field is excluded from the sum.
                let checksum = state.advance(take(r, None).map_err(Error::truncated)?);
                o.add_end(checksum);

                let calculated = check::finalize(c);

                return Ok(Check {
                    found: checksum,
                    calculated,
                });
            }
        };
    }
}

/// Take an exact number of bytes from a reader, optionally accumulating a
/// running checksum value.
fn take<const N: usize>(r: &mut impl Read, c: Option<&mut u32>) -> std::io::Result<[u8; N]> {
    let mut buf = [0; N];
    r.read_exact(&mut buf)?;

    if let Some(c) = c {
        *c = check::accumulate(*c, &buf);
    }

    Ok(buf)
}
