
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused_extern_crates,
    missing_copy_implementations,
    missing_debug_implementations,
)]

#![deny(
    unused_must_use,
    trivial_numeric_casts,
)]

#![forbid(unsafe_code)]

//! Lossless entropy coding for text streams over a fixed 102-symbol
//! alphabet. Four bit-level codecs, static and adaptive Huffman and
//! static and adaptive arithmetic, plus a byte-level run-length codec.
//!
//! Every codec is a symmetrical `dump`/`load` pair between any byte
//! reader and any byte writer: `dump` consumes the text source and
//! emits the complete encoding, `load` consumes the encoding and
//! reproduces the text, byte for byte. Streams are framed by an
//! encoded end marker, so no length prefix is needed, and the last
//! byte is zero-padded.

pub mod alphabet;
pub mod arithmetic;
pub mod error;
pub mod huffman;
pub mod io;
pub mod rle;

#[macro_use]
extern crate smallvec;

use crate::error::UnitResult;
use std::io::{Read, Write};


/// Selects one of the codecs of this crate.
/// The adaptive codecs need no header and adapt to the stream as it
/// runs; the static ones read their whole input first and ship their
/// model up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {

    /// Canonical prefix codes from a single counting pass,
    /// with the code shape in a header.
    StaticHuffman,

    /// Prefix codes grown identically on both ends of the stream,
    /// with unseen symbols introduced by fixed code.
    AdaptiveHuffman,

    /// Range coding against a frequency table shipped in a header.
    StaticArithmetic,

    /// Range coding against a uniform model that follows the stream.
    AdaptiveArithmetic,

    /// Byte-oriented run-length coding.
    Rle,
}

impl Codec {

    /// Every codec, in a fixed order.
    pub const ALL: [Codec; 5] = [
        Codec::StaticHuffman,
        Codec::AdaptiveHuffman,
        Codec::StaticArithmetic,
        Codec::AdaptiveArithmetic,
        Codec::Rle,
    ];

    /// Read text from `input` until it is exhausted and write the
    /// complete encoding to `output`, padded to a byte boundary.
    pub fn dump(self, input: impl Read, output: impl Write) -> UnitResult {
        match self {
            Codec::StaticHuffman => huffman::canonical::dump(input, output),
            Codec::AdaptiveHuffman => huffman::adaptive::dump(input, output),
            Codec::StaticArithmetic => arithmetic::counted::dump(input, output),
            Codec::AdaptiveArithmetic => arithmetic::adaptive::dump(input, output),
            Codec::Rle => rle::dump(input, output),
        }
    }

    /// Read an encoding from `input` and write the decoded text to
    /// `output`, returning once the stream ends.
    pub fn load(self, input: impl Read, output: impl Write) -> UnitResult {
        match self {
            Codec::StaticHuffman => huffman::canonical::load(input, output),
            Codec::AdaptiveHuffman => huffman::adaptive::load(input, output),
            Codec::StaticArithmetic => arithmetic::counted::load(input, output),
            Codec::AdaptiveArithmetic => arithmetic::adaptive::load(input, output),
            Codec::Rle => rle::load(input, output),
        }
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} coding", match self {
            Codec::StaticHuffman => "static huffman",
            Codec::AdaptiveHuffman => "adaptive huffman",
            Codec::StaticArithmetic => "static arithmetic",
            Codec::AdaptiveArithmetic => "adaptive arithmetic",
            Codec::Rle => "run-length",
        })
    }
}


/// Re-exports of everything commonly required for simply
/// encoding and decoding a stream.
pub mod prelude {
    pub use crate::alphabet::Symbol;
    pub use crate::error::{Error, Result, UnitResult};
    pub use crate::Codec;
}
