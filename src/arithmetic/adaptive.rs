//! The adaptive arithmetic codec. No header crosses the wire: the
//! frequency model starts out uniform over the whole alphabet and
//! follows the stream identically on both ends.

use super::codebook::AdaptiveCodebook;
use super::{Decoder, Encoder, PRECISION};
use crate::alphabet::Symbol;
use crate::error::{Error, UnitResult};
use crate::io::{BitReader, BitWriter};
use std::io::{Read, Write};

const CHUNK_BYTES: usize = 4096;


/// Read text from `input` until it is exhausted and write the complete
/// encoding to `output`, zero-padded to a byte boundary.
pub fn dump(mut input: impl Read, output: impl Write) -> UnitResult {
    let mut output = BitWriter::new(output);
    let mut encoder = Encoder::new(AdaptiveCodebook::new());

    let mut chunk = [0_u8; CHUNK_BYTES];
    loop {
        let bytes_read = input.read(&mut chunk)?;
        if bytes_read == 0 {
            break;
        }

        for &byte in &chunk[.. bytes_read] {
            encoder.encode(Symbol::from_byte(byte)?, &mut output)?;
        }
    }

    encoder.finish(&mut output)
}

/// Decode symbols from `input` and write them to `output` until the
/// end marker appears. An empty input yields empty output.
pub fn load(input: impl Read, mut output: impl Write) -> UnitResult {
    let mut input = BitReader::with_chunk_size(input, PRECISION / 8);

    let mut decoder = match Decoder::start(AdaptiveCodebook::new(), &mut input)? {
        Some(decoder) => decoder,
        None => return Ok(()), // nothing was ever encoded
    };

    let mut decoded = Vec::with_capacity(CHUNK_BYTES);
    while let Some(symbol) = decoder.decode(&mut input)? {
        if input.padding_bits_read() > PRECISION as u64 {
            return Err(Error::encoding("bit stream ended before the end marker"));
        }

        decoded.push(symbol.to_byte());
        if decoded.len() == CHUNK_BYTES {
            output.write_all(&decoded)?;
            decoded.clear();
        }
    }

    output.write_all(&decoded)?;
    output.flush()?;
    Ok(())
}
