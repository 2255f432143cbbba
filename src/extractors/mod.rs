//! Two-input randomness extractors.
//!
//! Four cyclic-convolution/field-arithmetic extractors ([`dodis`],
//! [`circulant`], [`toeplitz`], [`raz`]) plus the bit-by-bit [`trevisan`]
//! construction.

pub mod circulant;
pub mod dodis;
pub mod raz;
pub mod toeplitz;
pub mod trevisan;

/// Adjusted input lengths and output length returned alongside a
/// `from_params`-derived extractor: construction may have to snap a
/// requested length to the nearest valid value (prime, na_set prime,
/// trinomial degree, …), so the caller is handed back what it must
/// actually feed to `extract`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustedLengths {
    pub n1: u64,
    pub n2: u64,
    pub m: u64,
}
