//! Karp-Rabin rolling fingerprint over the nucleotide alphabet.
//!
//! A window `s[0..m]` is fingerprinted as `sum(d(s[i]) * SIGMA^(m-1-i)) mod PRIME`
//! where `d` is the alphabet digit. Sliding the window by one symbol is O(1).
//! Equal fingerprints do not imply equal windows; callers verify candidates.

use crate::alphabet::{digit_unchecked, SIGMA};

/// Modulus of the fingerprint. Below 2^49, so products of two residues fit in a u128.
pub const PRIME: u64 = 402_309_354_485_303;

/// `base^exp mod modulus` by square-and-multiply.
pub fn pow_mod(base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let modulus = modulus as u128;
    let mut base = base as u128 % modulus;
    let mut result: u128 = 1;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % modulus;
        }
        base = base * base % modulus;
        exp >>= 1;
    }
    result as u64
}

#[inline]
fn mul_mod(a: u64, b: u64) -> u64 {
    (a as u128 * b as u128 % PRIME as u128) as u64
}

/// Fingerprinting parameters for one window length.
#[derive(Debug, Clone, Copy)]
pub struct KarpRabin {
    /// `SIGMA^(window-1) mod PRIME`, weight of the symbol leaving the window.
    high_power: u64,
}

impl KarpRabin {
    pub fn new(window: usize) -> Self {
        let high_power = pow_mod(SIGMA, window.saturating_sub(1) as u64, PRIME);
        KarpRabin { high_power }
    }

    /// Fingerprint of a whole slice.
    pub fn fingerprint(&self, text: &[u8]) -> u64 {
        text.iter().fold(0, |hash, &symbol| self.push(hash, symbol))
    }

    /// Append a symbol to a window that is not yet full.
    #[inline]
    pub fn push(&self, hash: u64, incoming: u8) -> u64 {
        (mul_mod(hash, SIGMA) + digit_unchecked(incoming)) % PRIME
    }

    /// Slide a full window: drop `outgoing` from the front, append `incoming`.
    #[inline]
    pub fn roll(&self, hash: u64, outgoing: u8, incoming: u8) -> u64 {
        let removed = mul_mod(digit_unchecked(outgoing), self.high_power);
        let hash = (hash + PRIME - removed) % PRIME;
        self.push(hash, incoming)
    }
}
