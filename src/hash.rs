// src/hash.rs

//! The hash core: a single deterministic 64-bit hash plus the enhanced
//! double-hashing scheme that turns it into `k` partition indices.

use murmur3::murmur3_x64_128;
use std::io::Cursor;

/// Fixed seed for the 64-bit hash, chosen so that filter bit-patterns are
/// reproducible across runs and hosts of the same endianness.
const SEED: u32 = 0xC5FB_9AF2;

/// A 64-bit, non-cryptographic hash of `bytes`, taken from the low 64 bits
/// of a murmur3 128-bit digest.
pub fn hash64(bytes: &[u8]) -> u64 {
    let digest = murmur3_x64_128(&mut Cursor::new(bytes), SEED)
        .expect("hashing an in-memory byte slice never fails");
    digest as u64
}

/// Derives the `k` partition indices for a single `hash64` value using
/// enhanced double hashing.
///
/// `s` is the partition size in bits; every returned index lies in `[0, s)`.
/// Unbiased multiplicative reduction (`(a * s) >> 32`) maps the running
/// 32-bit accumulator into range without modulo bias for non-power-of-two
/// `s`.
pub fn partition_indices(h: u64, k: u32, s: u64) -> Vec<u64> {
    let mut a = h as u32;
    let mut b = (h >> 32) as u32;
    let mut indices = Vec::with_capacity(k as usize);
    for i in 0..k {
        let idx = ((a as u64).wrapping_mul(s)) >> 32;
        indices.push(idx);
        a = a.wrapping_add(b);
        b = b.wrapping_add(i);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_across_calls() {
        let a = hash64(b"hello world");
        let b = hash64(b"hello world");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_inputs_usually_differ() {
        assert_ne!(hash64(b"alpha"), hash64(b"beta"));
    }

    #[test]
    fn empty_input_hashes() {
        let _ = hash64(b"");
    }

    #[test]
    fn indices_stay_in_range() {
        let h = hash64(b"some element");
        let s = 997u64; // not a power of two, exercises the bias-free reduction
        let indices = partition_indices(h, 7, s);
        assert_eq!(indices.len(), 7);
        for idx in indices {
            assert!(idx < s);
        }
    }

    #[test]
    fn indices_are_deterministic() {
        let h = hash64(b"repeatable");
        let first = partition_indices(h, 5, 4096);
        let second = partition_indices(h, 5, 4096);
        assert_eq!(first, second);
    }
}
