//! Slice-based decoder implementation.

use either::Either::{Left, Right};
use thiserror::Error;

use crate::sans::{
    Decoder,
    check::{self, Check},
    record::RecordTagError,
};

use super::{FromImage, FromProgramBytes};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error)]
pub enum Error {
    /// The slice ends inside the fixed image header.
    #[error("Slice ends inside the image header.")]
    IncompleteHeader,
    /// A record extends past the end of the slice.
    #[error("Record at offset {0} extends past the end of the slice.")]
    Truncated(usize),
    /// A record carries an unrecognized tag.
    #[error("Unrecognized record tag ({tag:#04x}) at offset {offset}.")]
    UnrecognizedTag { offset: usize, tag: u8 },
}

/// Decode an image from a slice, publishing to a receiver.
///
/// This method is also re-exported as `simplecode::avec::decode_slice`.
///
/// Decoding walks the record stream from the end of the header until an end
/// record is decoded, then recomputes the image checksum over every byte
/// except the trailing checksum field. The comparison outcome is returned for
/// the application to report; a mismatch is not an error.
pub fn decode(r: &[u8], o: &mut impl FromImage) -> Result<Check, Error> {
    let i = &mut 0; // Counter of bytes read, used to read bytes from the tip.

    let (header, mut record_tag) =
        Decoder::advance(take(r, i).map_err(|_| Error::IncompleteHeader)?);
    o.add_header(header);

    loop {
        let s = *i; // Offset of the record's tag byte.

        let successor = match record_tag.advance(take(r, i)?) {
            Ok(successor) => successor,
            Err(RecordTagError::UnrecognizedTag(tag)) => {
                Err(Error::UnrecognizedTag { offset: s, tag })?
            }
        };

        record_tag = match successor {
            Left(state) => {
                let (data, successor) = state.advance(take(r, i)?);

                // Refuse a declared count exceeding the remaining bytes
                // before stepping into the payload.
                if r.len() - *i < data.program_bytes as usize {
                    Err(Error::Truncated(s))?;
                }

                let mut bytes = o.add_data(data);

                match successor {
                    Left(mut state) => loop {
                        let (value, successor) = state.advance(take(r, i)?);

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
                let (entry, successor) = state.advance(take(r, i)?);
                o.add_entry(entry);

                successor
            }
            Right(Right(state)) => {
                let checksum = state.advance(take(r, i)?);
                o.add_end(checksum);

                break;
            }
        };
    }

    let calculated = check::checksum(r);
    let found = u32::from_be_bytes(r[r.len() - 4..].try_into().unwrap());

    Ok(Check { found, calculated })
}

/// Take an exact number of bytes from an offset in a slice, advancing the offset.
fn take<const N: usize>(r: &[u8], i: &mut usize) -> Result<[u8; N], Error> {
    let s = *i;
    *i += N;

    Ok(r.get(s..*i).ok_or(Error::Truncated(s))?.try_into().unwrap())
}
