//! The Dodis et al. two-source extractor, cyclic-shift-matrix construction.
//!
//! Grounded in `cryptomite/dodis.py`: `Dodis.extract` for the padding and
//! index formula, `Dodis.from_params` for parameter adjustment (with the
//! adjusted-vs-raw `k` mixing resolved per this crate's parameter-
//! derivation notes, using adjusted values in both proof-model branches).

use tracing::debug;

use super::AdjustedLengths;
use crate::error::{Error, Result};
use crate::math::na_set::closest_na_set;
use crate::math::ntt;

/// A configured Dodis extractor: both inputs have length `n`, a na_set
/// prime (one with 2 as a primitive root), output has length `m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dodis {
    n: u64,
    m: u64,
}

impl Dodis {
    /// Builds a Dodis extractor for the given `n` (must be na_set) and `m`.
    pub fn new(n: u64, m: u64) -> Result<Self> {
        if n < m {
            return Err(Error::PreconditionViolation(format!(
                "n ({n}) must be >= m ({m})"
            )));
        }
        if !crate::math::na_set::is_na_set(n) {
            return Err(Error::PreconditionViolation(format!(
                "n ({n}) must be prime with 2 as a primitive root"
            )));
        }
        Ok(Self { n, m })
    }

    /// Extracts `self.m` bits from two length-`self.n` inputs.
    pub fn extract(&self, input1: &[u8], input2: &[u8]) -> Result<Vec<u8>> {
        let (n, m) = (self.n as usize, self.m as usize);
        if input1.len() != n || input2.len() != n {
            return Err(Error::PreconditionViolation(format!(
                "both inputs must have length n ({n}), got {} and {}",
                input1.len(),
                input2.len()
            )));
        }

        let l = crate::math::bit_length(2 * n as u64 - 2);
        let big_l = 1usize << l;

        let mut a = vec![0u64; big_l];
        a[0] = input1[0] as u64;
        for (dst, &src) in a[1..n].iter_mut().zip(input1[1..].iter().rev()) {
            *dst = src as u64;
        }
        let mut b = vec![0u64; big_l];
        for (dst, &src) in b[..n].iter_mut().zip(input2) {
            *dst = src as u64;
        }

        let c = ntt::conv(l, &a, &b);
        Ok((0..m)
            .map(|i| ((c[i] + c[i + n]) & 1) as u8)
            .collect())
    }

    /// Derives valid Dodis parameters from input lengths, min-entropies, a
    /// target `log2_error`, and a quantum-proof flag, returning the
    /// configured extractor.
    pub fn from_params(
        n1: u64,
        k1: f64,
        n2: u64,
        k2: f64,
        log2_error: f64,
        q_proof: bool,
    ) -> Result<(Self, AdjustedLengths)> {
        if log2_error > 0.0 {
            return Err(Error::PreconditionViolation(
                "log2_error must be <= 0".to_string(),
            ));
        }

        let n_adjusted = closest_na_set((n1 + n2) / 2);
        let k1_adjusted = k1 - (n1 as f64 - n_adjusted as f64).max(0.0);
        let k2_adjusted = k2 - (n2 as f64 - n_adjusted as f64).max(0.0);

        let m = if q_proof {
            (0.2 * (k1_adjusted + (k2_adjusted - n_adjusted as f64) + 8.0 * log2_error + 9.0
                - 4.0 * 3f64.log2()))
            .floor()
        } else {
            (k1_adjusted + (k2_adjusted - n_adjusted as f64) + 1.0 + 2.0 * log2_error).floor()
        };

        if m <= 0.0 {
            return Err(Error::InfeasibleParameters(
                "Dodis output length m is non-positive".to_string(),
            ));
        }

        debug!(
            n = n_adjusted,
            k1 = k1_adjusted,
            k2 = k2_adjusted,
            m,
            log2_error,
            q_proof,
            "derived Dodis parameters"
        );

        let extractor = Self::new(n_adjusted, m as u64)?;
        Ok((
            extractor,
            AdjustedLengths {
                n1: n_adjusted,
                n2: n_adjusted,
                m: m as u64,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_na_set_n() {
        assert!(Dodis::new(8, 2).is_err());
    }

    #[test]
    fn rejects_n_smaller_than_m() {
        assert!(Dodis::new(5, 6).is_err());
    }

    #[test]
    fn extract_rejects_length_mismatch() {
        let d = Dodis::new(5, 2).unwrap();
        assert!(d.extract(&[0, 1], &[0, 1, 0, 1, 0]).is_err());
    }
}
