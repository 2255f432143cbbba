//! The Trevisan extractor: a bit-by-bit construction built on a weak
//! combinatorial design plus a one-bit extractor.
//!
//! No Python reference survives for this engine (`cryptomite.Trevisan`
//! delegates to a compiled extension), so both [`design`] and [`one_bit`]
//! are built directly from the construction §4E of this crate's
//! specification describes, attributed there to the block-weak-design
//! Trevisan variant of Mauerer, Portmann & Scholz. Parameter derivation
//! (`r`, `m`, `t`, `a`, `d`) follows that same section's formulas.

mod design;
mod one_bit;

use design::BlockWeakDesign;
use one_bit::OneBitExtractor;
use tracing::debug;

use crate::error::{Error, Result};

/// `r = 2e`, the base of the weak-design intersection bound
/// `Σ_{j<i} 2^{|S_i ∩ S_j|} <= r * (m - 1)`.
fn weak_design_r() -> f64 {
    2.0 * std::f64::consts::E
}

/// A configured Trevisan extractor: caches the derived parameters
/// (`m`, `d`, `t`, `a`) and the weak design / one-bit extractor built from
/// them for a source of `n` bits, min-entropy `k`, and target error
/// `max_eps`.
#[derive(Debug, Clone)]
pub struct Trevisan {
    n: usize,
    k: f64,
    max_eps: f64,
    q_proof: bool,
    m: usize,
    d: usize,
    t: usize,
    a: usize,
    design: BlockWeakDesign,
    one_bit: OneBitExtractor,
}

impl Trevisan {
    /// Derives `(m, d, t, a)` from `(n, k, max_eps)` and builds the
    /// extractor. `q_proof` selects the quantum-proof parameter formulas
    /// over the classical ones.
    ///
    /// ## Errors
    ///
    /// - [`Error::PreconditionViolation`] if `max_eps` is not in `(0, 1)`.
    /// - [`Error::InfeasibleParameters`] if the derived output length `m`
    ///   is non-positive.
    /// - [`Error::UnsupportedConfiguration`] if the derived one-bit
    ///   extractor field width has no known trinomial.
    pub fn init(n: usize, k: f64, max_eps: f64, q_proof: bool) -> Result<Self> {
        if !(max_eps > 0.0 && max_eps < 1.0) {
            return Err(Error::PreconditionViolation(format!(
                "max_eps ({max_eps}) must be in (0, 1)"
            )));
        }
        if n == 0 {
            return Err(Error::PreconditionViolation(
                "n must be positive".to_string(),
            ));
        }

        let log2_eps = max_eps.log2();

        // m_raw: §4E's classical / quantum-proof output-length estimate,
        // before the self-referential `-4 log2 m` (resp. `-12 log2 m`)
        // correction.
        let m_raw = if q_proof {
            (k + 6.0 - 6.0 * 3f64.log2() + 12.0 * log2_eps) / 7.0
        } else {
            k + 4.0 * log2_eps - 6.0
        };
        if m_raw <= 1.0 {
            return Err(Error::InfeasibleParameters(
                "Trevisan output length m is non-positive".to_string(),
            ));
        }
        // One stabilising iteration: fold the correction back in using
        // `m_raw` itself as the estimate of `m` on the right-hand side.
        let m_refined = if q_proof {
            m_raw - 12.0 * m_raw.log2()
        } else {
            m_raw - 4.0 * m_raw.log2()
        };
        let m = m_refined.floor();
        if m <= 0.0 {
            return Err(Error::InfeasibleParameters(
                "Trevisan output length m is non-positive after refinement".to_string(),
            ));
        }
        let m = m as usize;

        let t_req = {
            let inner =
                (n as f64).log2() + 1.0 - 2.0 * log2_eps + 2.0 * ((2 * m) as f64).log2();
            2 * inner.ceil().max(2.0) as usize
        };

        let (one_bit, t) = OneBitExtractor::new(n, t_req)?;

        let r = weak_design_r();
        let a_bound = {
            let (mf, tf) = (m as f64, t as f64);
            if mf <= r || tf <= r {
                1
            } else {
                let num = (mf - r).ln() - (tf - r).ln();
                let den = r.ln() - (r - 1.0).ln();
                ((num / den).ceil() as i64).max(1) as usize
            }
        };

        // `set_for_index` fills one block (capacity `block_capacity = q^2`)
        // before spilling into the next, so `a` must also be large enough
        // to actually address all `m` indices, not just satisfy the
        // intersection-bound formula above.
        let block_capacity = BlockWeakDesign::new(t, 1).block_capacity();
        let a_capacity = m.div_ceil(block_capacity as usize).max(1);
        let a = a_bound.max(a_capacity);

        let design = BlockWeakDesign::new(t, a);
        let d = design.seed_len(a);

        debug!(n, k, max_eps, q_proof, m, t, a, d, "derived Trevisan parameters");

        Ok(Self {
            n,
            k,
            max_eps,
            q_proof,
            m,
            d,
            t,
            a,
            design,
            one_bit,
        })
    }

    /// Input length this extractor was configured for.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Output length `m`.
    pub fn m(&self) -> usize {
        self.m
    }

    /// Seed length `d`.
    pub fn d(&self) -> usize {
        self.d
    }

    /// Design-set size `t`.
    pub fn t(&self) -> usize {
        self.t
    }

    /// Block count `a`.
    pub fn a(&self) -> usize {
        self.a
    }

    /// Min-entropy and target error this extractor was derived from.
    pub fn params(&self) -> (f64, f64, bool) {
        (self.k, self.max_eps, self.q_proof)
    }

    /// Binds `source` (length `n`) and `seed` (length `d`) for random-access
    /// bit extraction via [`Loaded::extract_bit`].
    pub fn load_source<'a>(&'a self, source: &'a [u8], seed: &'a [u8]) -> Result<Loaded<'a>> {
        if source.len() != self.n {
            return Err(Error::PreconditionViolation(format!(
                "source must have length n ({}), got {}",
                self.n,
                source.len()
            )));
        }
        if seed.len() != self.d {
            return Err(Error::PreconditionViolation(format!(
                "seed must have length d ({}), got {}",
                self.d,
                seed.len()
            )));
        }
        // Precompute each output index's t-bit seed subword up front: the
        // design sets are pure functions of the index, so there is no
        // reason to recompute them on repeated extract_bit calls.
        let index_sets: Vec<Vec<usize>> = (0..self.m).map(|i| self.design.set_for_index(i)).collect();
        Ok(Loaded {
            engine: self,
            source,
            seed,
            index_sets,
        })
    }

    /// Convenience equivalent to [`Self::load_source`] followed by
    /// iterating [`Loaded::extract_bit`] over `0..m`.
    pub fn extract(&self, source: &[u8], seed: &[u8]) -> Result<Vec<u8>> {
        let loaded = self.load_source(source, seed)?;
        Ok((0..self.m).map(|i| loaded.extract_bit(i)).collect())
    }
}

/// A [`Trevisan`] instance bound to one `(source, seed)` pair, supporting
/// random-access, memoised per-index extraction.
pub struct Loaded<'a> {
    engine: &'a Trevisan,
    source: &'a [u8],
    seed: &'a [u8],
    index_sets: Vec<Vec<usize>>,
}

impl<'a> Loaded<'a> {
    /// Extracts the `i`-th output bit.
    ///
    /// ## Panics
    ///
    /// Panics (debug only) if `i >= m`.
    pub fn extract_bit(&self, i: usize) -> u8 {
        debug_assert!(i < self.index_sets.len(), "output index {i} out of range");
        let set = &self.index_sets[i];
        let mut chunk = vec![0u8; self.engine.t];
        for (slot, &pos) in set.iter().enumerate() {
            chunk[slot] = self.seed[pos];
        }
        self.engine.one_bit.extract(self.source, &chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(len: usize, stride: usize) -> Vec<u8> {
        (0..len).map(|i| ((i / stride.max(1)) % 2) as u8).collect()
    }

    #[test]
    fn rejects_out_of_range_max_eps() {
        assert!(Trevisan::init(100, 50.0, 0.0, false).is_err());
        assert!(Trevisan::init(100, 50.0, 1.0, false).is_err());
    }

    #[test]
    fn rejects_infeasible_entropy_budget() {
        // k far too small relative to n to yield a positive m.
        assert!(Trevisan::init(1000, 1.0, 0.01, false).is_err());
    }

    #[test]
    fn block_capacity_covers_all_output_indices_for_a_large_entropy_budget() {
        // Regression: for large n/k the intersection-bound formula alone
        // picks an `a` too small to address every index `0..m` across `a`
        // blocks of `block_capacity = q^2` each; `a` must also satisfy
        // `a * block_capacity >= m`.
        let trevisan = Trevisan::init(100_000_000, 50_000_000.0, 1e-9, false).unwrap();
        let block_capacity = BlockWeakDesign::new(trevisan.t, 1).block_capacity();
        assert!(
            trevisan.a as u64 * block_capacity >= trevisan.m as u64,
            "a ({}) * block_capacity ({block_capacity}) < m ({})",
            trevisan.a,
            trevisan.m
        );
        let last = trevisan.design.set_for_index(trevisan.m - 1);
        assert!(last.iter().all(|&pos| pos < trevisan.d));
    }

    #[test]
    fn derives_positive_output_length() {
        let trevisan = Trevisan::init(200, 100.0, 1e-4, false).unwrap();
        assert!(trevisan.m() > 0);
        assert!(trevisan.t() > 0);
        assert!(trevisan.d() > 0);
    }

    #[test]
    fn extract_has_requested_output_length_and_is_deterministic() {
        let trevisan = Trevisan::init(200, 100.0, 1e-4, false).unwrap();
        let source = pattern(trevisan.n(), 3);
        let seed = pattern(trevisan.d(), 5);

        let out1 = trevisan.extract(&source, &seed).unwrap();
        let out2 = trevisan.extract(&source, &seed).unwrap();
        assert_eq!(out1.len(), trevisan.m());
        assert_eq!(out1, out2);
        assert!(out1.iter().all(|&b| b == 0 || b == 1));
    }

    #[test]
    fn extract_bit_matches_extract() {
        let trevisan = Trevisan::init(200, 100.0, 1e-4, false).unwrap();
        let source = pattern(trevisan.n(), 3);
        let seed = pattern(trevisan.d(), 5);

        let whole = trevisan.extract(&source, &seed).unwrap();
        let loaded = trevisan.load_source(&source, &seed).unwrap();
        for (i, &bit) in whole.iter().enumerate() {
            assert_eq!(loaded.extract_bit(i), bit);
        }
    }

    #[test]
    fn rejects_wrong_source_or_seed_length() {
        let trevisan = Trevisan::init(200, 100.0, 1e-4, false).unwrap();
        let bad_source = vec![0u8; trevisan.n() - 1];
        let seed = pattern(trevisan.d(), 5);
        assert!(trevisan.load_source(&bad_source, &seed).is_err());

        let source = pattern(trevisan.n(), 3);
        let bad_seed = vec![0u8; trevisan.d() - 1];
        assert!(trevisan.load_source(&source, &bad_seed).is_err());
    }
}
