//! The one-bit extractor: polynomial hashing over `GF(2^{t/2})`
//! (Reed-Muller style), evaluated once per Trevisan output bit.
//!
//! Built from this crate's specification, since no source for Trevisan's
//! internal engine survives retrieval; reuses [`gf2n`] (the same
//! trinomial-reduced field arithmetic Raz already needs) at a width chosen
//! by snapping the derived field width up to the nearest degree the
//! trinomial table actually covers.

use crate::error::{Error, Result};
use crate::gf2n;
use crate::trinomials;

/// A one-bit extractor fixed to field width `half = t / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneBitExtractor {
    n: usize,
    half: usize,
    s: u32,
}

impl OneBitExtractor {
    /// Builds a one-bit extractor for a source of `n` bits and a requested
    /// design parameter `t`; the field width `t / 2` is snapped up to the
    /// smallest available trinomial degree, and the actual (possibly
    /// larger) `t` used is returned alongside the extractor.
    pub fn new(n: usize, t: usize) -> Result<(Self, usize)> {
        let requested_half = (t / 2).max(1);
        let (half, s) = trinomials::smallest_at_least(requested_half as u32)
            .ok_or_else(|| {
                Error::UnsupportedConfiguration(format!(
                    "no known trinomial at or above degree {requested_half}"
                ))
            })
            .map(|(deg, s)| (deg as usize, s))?;
        Ok((Self { n, half, s }, 2 * half))
    }

    /// The actual `t` this extractor uses (`2 * half`), which may exceed
    /// the `t` originally requested from [`Self::new`].
    pub fn t(&self) -> usize {
        2 * self.half
    }

    /// Evaluates the one-bit extractor on `source` (length `n`) using a
    /// `t`-bit seed subword, split into `(alpha, beta) in GF(2^half)^2`.
    pub fn extract(&self, source: &[u8], seed_chunk: &[u8]) -> u8 {
        debug_assert_eq!(source.len(), self.n);
        debug_assert_eq!(seed_chunk.len(), self.t());
        let (alpha, beta) = seed_chunk.split_at(self.half);

        let q = self.n.div_ceil(self.half);
        let mut acc = vec![0u8; self.half];
        for j in (0..q).rev() {
            let start = j * self.half;
            let end = (start + self.half).min(self.n);
            let mut symbol = vec![0u8; self.half];
            if start < self.n {
                symbol[..end - start].copy_from_slice(&source[start..end]);
            }
            let product = gf2n::mul(self.half, self.s, &acc, alpha);
            acc = gf2n::add(&product, &symbol);
        }

        acc.iter()
            .zip(beta)
            .fold(0u8, |parity, (&a, &b)| parity ^ (a & b))
    }
}
