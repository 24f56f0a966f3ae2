// Copyright 2018 Niklas Fiekas <niklas.fiekas@backscattering.de>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [Huffman codes](https://en.wikipedia.org/wiki/Huffman_coding) for the
//! characters of a text source.
//!
//! The characters of a source are counted, with every line feed counted as
//! a line terminator symbol. The counts are turned into a Huffman tree and a
//! code book, which then encode text into strings of `'0'` and `'1'` and
//! decode such strings back into text.
//!
//! # Examples
//!
//! ```rust
//! use huffman_text::TextCodec;
//!
//! let codec = TextCodec::new("she sells\nsea shells\n");
//!
//! // More frequent characters are encoded with fewer bits.
//! assert!(codec.code('s').len() <= codec.code('a').len());
//!
//! let bits = codec.encode("sea\nshells");
//! assert_eq!(codec.decode(&bits), "sea\nshells");
//!
//! // Failures are reported as empty strings ...
//! assert_eq!(codec.encode("oyster"), "");
//! assert_eq!(codec.decode("01x"), "");
//!
//! // ... or with the reason, if asked for.
//! assert!(codec.try_decode("01x").is_err());
//! ```

#![warn(missing_debug_implementations)]

use std::error::Error as StdError;
use std::fmt;
use std::io;

pub mod codec;
pub mod frequency;
pub mod tree;

pub use crate::codec::TextCodec;
pub use crate::frequency::{Frequencies, Symbol};
pub use crate::tree::{codebook, Book, Decoder, Tree};

pub use num_traits::ops::saturating::Saturating;

/// Tried to encode an unknown symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeError;

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("encode error: tried to encode an unknown symbol")
    }
}

impl StdError for EncodeError {}

/// Bits or digits that are not a sequence of complete code words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A digit other than `'0'` or `'1'` at the given character position.
    InvalidDigit { position: usize, found: char },
    /// The code has a single symbol, whose only code word is `0`, but a `1`
    /// bit was found at the given position.
    UnexpectedBit { position: usize },
    /// The input ended inside the code word starting at the given position.
    Truncated { position: usize },
    /// There are bits to decode but the code has no symbols.
    EmptyTree,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodeError::InvalidDigit { position, found } => {
                write!(f, "decode error: invalid digit {:?} at {}", found, position)
            }
            DecodeError::UnexpectedBit { position } => {
                write!(f, "decode error: unexpected bit 1 at {}", position)
            }
            DecodeError::Truncated { position } => {
                write!(f, "decode error: incomplete code word at {}", position)
            }
            DecodeError::EmptyTree => f.write_str("decode error: code has no symbols"),
        }
    }
}

impl StdError for DecodeError {}

/// Errors of operations that read a source.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Encode(EncodeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref err) => write!(f, "io error: {}", err),
            Error::Encode(ref err) => err.fmt(f),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            Error::Encode(ref err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<EncodeError> for Error {
    fn from(err: EncodeError) -> Error {
        Error::Encode(err)
    }
}
