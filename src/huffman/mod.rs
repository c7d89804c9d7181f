//! Huffman coding: prefix codes grown from symbol frequencies,
//! either once up front with a canonical table in the header,
//! or adaptively on both ends of the stream at once.

pub mod adaptive;
pub mod canonical;

/// Longest permitted canonical codeword, and the number of
/// per-length slots in the static header.
pub const NUM_CODELENGTH: u32 = 16;

/// Bits per code-length counter in the static header.
pub const CODELENGTH_BITSIZE: u32 = 8;
