//! Byte-oriented run-length coding.
//!
//! The simplest codec of the family, and the only byte-aligned one:
//! a control byte announces either a run (`count`, meaning the next
//! byte repeats `count + 1` times) or a literal stretch (negative
//! `count`, meaning the next `-count` bytes are copied through).

use crate::alphabet::Symbol;
use crate::error::{Error, UnitResult};
use std::io::{Read, Write};

const MIN_RUN_LENGTH: usize = 3;
const MAX_RUN_LENGTH: usize = 127;


/// Read all of `input` and write its run-length encoding to `output`.
pub fn dump(mut input: impl Read, mut output: impl Write) -> UnitResult {
    let mut text = Vec::new();
    input.read_to_end(&mut text)?;

    for &byte in &text {
        Symbol::from_byte(byte)?;
    }

    let mut encoded = Vec::with_capacity(text.len());
    let mut run_start = 0;
    let mut run_end = 1;

    while run_start < text.len() {
        // a run may grow one byte past the literal bound, since its
        // control byte stores the length minus one
        while run_end < text.len()
            && text[run_start] == text[run_end]
            && run_end - run_start <= MAX_RUN_LENGTH
        {
            run_end += 1;
        }

        if run_end - run_start >= MIN_RUN_LENGTH {
            encoded.push((run_end - run_start - 1) as u8);
            encoded.push(text[run_start]);
            run_start = run_end;
        }
        else {
            while run_end < text.len()
                && (
                    (run_end + 1 >= text.len() || text[run_end] != text[run_end + 1])
                    || (run_end + 2 >= text.len() || text[run_end + 1] != text[run_end + 2])
                )
                && run_end - run_start < MAX_RUN_LENGTH
            {
                run_end += 1;
            }

            encoded.push((run_start as i32 - run_end as i32) as u8);
            encoded.extend_from_slice(&text[run_start .. run_end]);
            run_start = run_end;
        }

        run_end += 1;
    }

    output.write_all(&encoded)?;
    output.flush()?;
    Ok(())
}

/// Read a run-length encoding from `input` and write the decoded
/// text to `output`. The stream simply ends; there is no marker.
pub fn load(mut input: impl Read, mut output: impl Write) -> UnitResult {
    let mut encoded = Vec::new();
    input.read_to_end(&mut encoded)?;

    let mut remaining = encoded.as_slice();
    let mut decoded = Vec::with_capacity(encoded.len() * 2);

    while !remaining.is_empty() {
        let count = take_1(&mut remaining)? as i8 as i32;

        if count < 0 {
            // copy the next `-count` bytes as they are
            let literals = take_n(&mut remaining, (-count) as usize)?;
            decoded.extend_from_slice(literals);
        }
        else {
            // repeat the next byte `count + 1` times
            let value = take_1(&mut remaining)?;
            decoded.resize(decoded.len() + count as usize + 1, value);
        }
    }

    for &byte in &decoded {
        Symbol::from_byte(byte)
            .map_err(|_| Error::encoding("decoded byte outside the alphabet"))?;
    }

    output.write_all(&decoded)?;
    output.flush()?;
    Ok(())
}

fn take_1(slice: &mut &[u8]) -> crate::error::Result<u8> {
    if let Some((&first, rest)) = slice.split_first() {
        *slice = rest;
        Ok(first)
    }
    else {
        Err(Error::encoding("run cut off mid-stream"))
    }
}

fn take_n<'s>(slice: &mut &'s [u8], n: usize) -> crate::error::Result<&'s [u8]> {
    if n <= slice.len() {
        let (front, back) = slice.split_at(n);
        *slice = back;
        Ok(front)
    }
    else {
        Err(Error::encoding("run cut off mid-stream"))
    }
}
