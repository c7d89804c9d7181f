//! The static arithmetic codec. One pass counts the input, the capped
//! counts travel in a header of `(fixed code, count)` pairs terminated
//! by the end marker's pair, and the payload is coded against the
//! resulting immutable table.

use super::codebook::CountedCodebook;
use super::{Decoder, Encoder, PRECISION};
use crate::alphabet::{self, Symbol, FIXED_CODE_SIZE};
use crate::error::{Error, UnitResult};
use crate::io::{BitReader, BitWriter};
use std::io::{Read, Write};

/// Bits per count field in the header, `ceil(log2(MAX_FREQUENCY + 1))`.
const COUNT_BITSIZE: u32 = 16;

const CHUNK_BYTES: usize = 4096;


/// Read all of `input`, count it, and write the frequency table
/// followed by the encoded payload to `output`.
pub fn dump(mut input: impl Read, output: impl Write) -> UnitResult {
    let mut text = Vec::new();
    input.read_to_end(&mut text)?;

    let mut symbols = Vec::with_capacity(text.len());
    for &byte in &text {
        symbols.push(Symbol::from_byte(byte)?);
    }

    let codebook = CountedCodebook::count(
        symbols.iter().copied().chain(std::iter::once(Symbol::EOF))
    );

    let mut output = BitWriter::new(output);
    for (symbol, count) in codebook.entries() {
        output.write_bits(symbol.fixed_code(), FIXED_CODE_SIZE)?;
        output.write_bits(count, COUNT_BITSIZE)?;
    }

    let mut encoder = Encoder::new(codebook);
    for &symbol in &symbols {
        encoder.encode(symbol, &mut output)?;
    }

    encoder.finish(&mut output)
}

/// Rebuild the frequency table from the header of `input`, then decode
/// the payload into `output` until the end marker appears.
pub fn load(input: impl Read, mut output: impl Write) -> UnitResult {
    let mut input = BitReader::with_chunk_size(input, PRECISION / 8);
    let codebook = read_frequency_table(&mut input)?;

    let mut decoder = match Decoder::start(codebook, &mut input)? {
        Some(decoder) => decoder,
        None => return Err(Error::encoding("bit stream ended before the end marker")),
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

fn read_frequency_table(input: &mut BitReader<impl Read>) -> crate::error::Result<CountedCodebook> {
    let mut entries = Vec::new();

    loop {
        let code = input.read_bits(FIXED_CODE_SIZE)?
            .ok_or_else(|| Error::header("frequency table ended before the end marker"))?;

        let symbol = Symbol::from_fixed_code(code)
            .ok_or_else(|| Error::header("fixed code names no alphabet symbol"))?;

        let count = input.read_bits(COUNT_BITSIZE)?
            .ok_or_else(|| Error::header("frequency table ended before the end marker"))?;

        entries.push((symbol, count));

        if symbol == Symbol::EOF {
            break;
        }

        if entries.len() > alphabet::SYMBOL_COUNT {
            return Err(Error::header("frequency table exceeds the alphabet"));
        }
    }

    CountedCodebook::from_entries(entries)
}


#[cfg(test)]
mod test {
    use super::*;

    fn roundtrip(text: &[u8]) -> Vec<u8> {
        let mut encoded = Vec::new();
        dump(text, &mut encoded).unwrap();

        let mut decoded = Vec::new();
        load(encoded.as_slice(), &mut decoded).unwrap();
        decoded
    }

    #[test]
    fn empty_input_round_trips() {
        assert_eq!(roundtrip(b""), b"");
    }

    #[test]
    fn skewed_input_round_trips() {
        let text: Vec<u8> = b"abacabadabacabae".iter().copied().cycle().take(3000).collect();
        assert_eq!(roundtrip(&text), text);
    }

    #[test]
    fn header_lists_the_end_marker_last() {
        let mut encoded = Vec::new();
        dump(&b"aab"[..], &mut encoded).unwrap();

        let mut input = BitReader::new(encoded.as_slice());
        let codebook = read_frequency_table(&mut input).unwrap();
        let entries: Vec<(u8, u64)> = codebook.entries()
            .map(|(symbol, count)| (symbol.to_byte(), count))
            .collect();

        assert_eq!(entries, vec![(b'a', 2), (b'b', 1), (0xff, 1)]);
    }

    #[test]
    fn missing_table_is_a_header_error() {
        let result = load(&[][..], Vec::new());
        assert!(matches!(result, Err(Error::CorruptedHeader(_))));
    }

    #[test]
    fn unknown_fixed_code_is_a_header_error() {
        // seven high bits name fixed code 127, which is unassigned
        let result = load(&[0b1111_1110, 0, 0, 0][..], Vec::new());
        assert!(matches!(result, Err(Error::CorruptedHeader(_))));
    }

    #[test]
    fn zero_count_is_a_header_error() {
        // fixed code of the end marker (101) followed by a zero count
        let mut bytes = Vec::new();
        let mut writer = crate::io::BitWriter::new(&mut bytes);
        writer.write_bits(Symbol::EOF.fixed_code(), FIXED_CODE_SIZE).unwrap();
        writer.write_bits(0, COUNT_BITSIZE).unwrap();
        writer.flush().unwrap();

        let result = load(bytes.as_slice(), Vec::new());
        assert!(matches!(result, Err(Error::CorruptedHeader(_))));
    }
}
