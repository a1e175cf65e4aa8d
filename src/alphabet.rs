//! The four-letter nucleotide alphabet used by segment labels.
//!
//! Symbols map to base-4 digits in the order `A=0, T=1, C=2, G=3`. Both the
//! Karp-Rabin fingerprint and the exact k-mer numerals are built on these digits,
//! and `A` is the zero symbol used when decoding a numeral back to text.

use crate::error::{GraphError, Result};

/// Alphabet size, and the radix of every fingerprint in this crate.
pub const SIGMA: u64 = 4;

/// Digit -> symbol.
pub const SYMBOLS: [u8; 4] = *b"ATCG";

const INVALID: u8 = u8::MAX;

/// Symbol -> digit, `INVALID` for anything outside the alphabet.
const DIGIT_LUT: [u8; 256] = {
    let mut lut = [INVALID; 256];
    lut[b'A' as usize] = 0;
    lut[b'T' as usize] = 1;
    lut[b'C' as usize] = 2;
    lut[b'G' as usize] = 3;
    lut
};

/// Base-4 digit of a symbol, or `None` if it is not in the alphabet.
#[inline]
pub fn digit(symbol: u8) -> Option<u8> {
    match DIGIT_LUT[symbol as usize] {
        INVALID => None,
        d => Some(d),
    }
}

/// Digit of a symbol already known to be valid. Invalid symbols map to zero.
#[inline]
pub(crate) fn digit_unchecked(symbol: u8) -> u64 {
    (DIGIT_LUT[symbol as usize] & 0b11) as u64
}

/// Symbol for a digit in `0..4`.
#[inline]
pub fn symbol(digit: u64) -> u8 {
    SYMBOLS[(digit & 0b11) as usize]
}

/// Complement a single base (A<->T, C<->G). Other bytes are returned unchanged.
#[inline]
pub fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        _ => base,
    }
}

/// Compute the reverse complement of a sequence
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&base| complement(base)).collect()
}

pub fn is_valid(seq: &[u8]) -> bool {
    seq.iter().all(|&b| digit(b).is_some())
}

/// Check that every symbol of `seq` belongs to the alphabet, reporting the first offender.
pub fn validate(seq: &[u8]) -> Result<()> {
    match seq.iter().position(|&b| digit(b).is_none()) {
        None => Ok(()),
        Some(position) => Err(GraphError::InvalidSegment {
            position,
            symbol: seq[position] as char,
        }),
    }
}
