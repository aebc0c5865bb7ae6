// src/filter.rs

//! One generation of the scalable chain: a partitioned Bloom filter.

use crate::config::Config;
use crate::hash::{hash64, partition_indices};

/// Parameters derived for a single generation at chain index `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub k: u32,
    pub s: u64,
    pub bmax: u64,
}

/// Derives `(k, s, bmax)` for generation `i` given the composed target `e`
/// and the tunable ratios in `cfg`.
///
/// All intermediate products are evaluated in `f64`; only the returned
/// fields are integers. `k` and `s` are defensively clamped to `>= 1`,
/// since a very large `e` can otherwise drive `k` or `m` to zero.
pub fn derive_generation_params(cfg: &Config, e: f64, i: u32) -> GenerationParams {
    let p = cfg.fill_ratio;
    let r_n = cfg.growth_ratio;
    let r_e = cfg.tightening_ratio;

    // Fill-ratio identity shared by n0 and m_i: log(P)*log(1-P) / |log(eps)|.
    let fill_identity = |eps: f64| (p.ln() * (1.0 - p).ln()) / eps.ln().abs();

    let n0 = cfg.base_size_bytes as f64 * 8.0 * fill_identity(e);
    let e0 = e * (1.0 - r_e) * 2.0;

    let n_i = n0 * r_n.powi(i as i32);
    let e_i = e0 * r_e.powi(i as i32);

    let k_i = (-e_i.log2()).ceil();
    let k_i = if k_i.is_finite() { k_i as i64 } else { 1 };
    let k = k_i.max(1) as u32;

    let m_i = n_i / fill_identity(e_i);
    let s_i = (m_i / k as f64).floor();
    let s_i = if s_i.is_finite() { s_i as i64 } else { 1 };
    let s = s_i.max(1) as u64;

    let bmax = ((s as f64) * (k as f64) * p).floor().max(1.0) as u64;

    GenerationParams { k, s, bmax }
}

/// A single generation of the scalable chain: `k` independently allocated
/// bit-partitions of `s` bits each, plus the accounting that drives growth.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionedFilter {
    s: u64,
    k: u32,
    /// Total number of 1-bits across all partitions (monotonic non-decreasing).
    b: u64,
    bmax: u64,
    parts: Vec<Vec<u8>>,
    /// Legacy element counter backing `fill_ratio`; not consulted by the
    /// growth decision.
    c: u64,
    /// Reserved for a future on-disk encoding variant. Never read.
    encoding: u64,
}

impl PartitionedFilter {
    /// Allocates a new, empty generation with the given parameters.
    pub fn new(params: GenerationParams) -> Self {
        let bytes_per_partition = params.s.div_ceil(8) as usize;
        Self {
            s: params.s,
            k: params.k,
            b: 0,
            bmax: params.bmax,
            parts: (0..params.k)
                .map(|_| vec![0u8; bytes_per_partition])
                .collect(),
            c: 0,
            encoding: 0,
        }
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    pub fn s(&self) -> u64 {
        self.s
    }

    pub fn b(&self) -> u64 {
        self.b
    }

    pub fn bmax(&self) -> u64 {
        self.bmax
    }

    pub fn encoding(&self) -> u64 {
        self.encoding
    }

    /// `true` once this generation has reached its fill target and the
    /// *next* insert should land in a freshly allocated generation.
    pub fn is_full(&self) -> bool {
        self.b >= self.bmax
    }

    /// Hashes `bytes` and inserts it into this generation.
    ///
    /// Returns `true` if any bit transitioned from 0 to 1.
    pub fn add(&mut self, bytes: &[u8]) -> bool {
        let h = hash64(bytes);
        self.add_hashed(h)
    }

    /// Inserts a pre-computed hash, avoiding re-hashing when the scalable
    /// filter has already computed `h` once for the whole chain.
    pub fn add_hashed(&mut self, h: u64) -> bool {
        let indices = partition_indices(h, self.k, self.s);
        let mut delta = 0u64;
        for (i, idx) in indices.into_iter().enumerate() {
            let byte_index = (idx / 8) as usize;
            let bit_index = (idx % 8) as u8;
            let byte = &mut self.parts[i][byte_index];
            if *byte & (1 << bit_index) == 0 {
                *byte |= 1 << bit_index;
                delta += 1;
            }
        }
        self.b += delta;
        self.c += 1;
        delta > 0
    }

    /// Checks membership for a pre-computed hash. Never allocates.
    pub fn contains_hashed(&self, h: u64) -> bool {
        let indices = partition_indices(h, self.k, self.s);
        for (i, idx) in indices.into_iter().enumerate() {
            let byte_index = (idx / 8) as usize;
            let bit_index = (idx % 8) as u8;
            if self.parts[i][byte_index] & (1 << bit_index) == 0 {
                return false;
            }
        }
        true
    }

    /// Legacy fill-ratio estimate based on the logical element count `c`,
    /// retained purely as a diagnostic; growth uses `b` vs `bmax`.
    pub fn fill_ratio(&self) -> f64 {
        1.0 - (-(self.c as f64) / self.s as f64).exp()
    }
}
