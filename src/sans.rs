//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for advanced applications that need fine control
//! over decoder internals. See [`crate::avec`] for implementations covering
//! common decoding patterns.
//!
//! # Architecture
//!
//! All states are represented by a zero-size, non-copy token (the program
//! byte state additionally carries its remaining count). Once enough bytes
//! are ready, transition to another state by calling the token's `advance`
//! method. This will return a successor state token, along with any extracted
//! data.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! constructed. Decoding an end record consumes its token without producing a
//! successor, which is how the machine signals the end of the record stream.
//!
//! This architecture enables the compiler and type system to guide
//! applications toward a correct implementation. However, some areas of the
//! decoding process are not represented in the finite-state machine and must
//! be carefully written:
//!
//! - Reading bytes from the correct place in the document, including
//! buffering or seeking as necessary.
//!
//! - Refusing a data record whose declared program byte count exceeds the
//! bytes actually available, before stepping into its payload.
//!
//! - Applying the image checksum. Helpers are provided in the [`check`]
//! module.
//!
//! Implementers are recommended to begin by studying and modifying a decoder
//! from the [`crate::avec`] module.

pub mod check;
pub mod header;
pub mod record;

/// Entrypoint to the finite-state machine.
pub type Decoder = header::ImageHeader;
