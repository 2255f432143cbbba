//! The Circulant extractor: Dodis's cyclic-shift construction with a
//! single extra seed bit so the shared length only needs to be prime,
//! not na_set.
//!
//! Grounded in `cryptomite/circulant.py`'s `Circulant.extract`/`from_params`.

use tracing::debug;

use super::AdjustedLengths;
use crate::error::{Error, Result};
use crate::math::ntt;
use crate::math::prime::{closest_prime, is_prime};

/// A configured Circulant extractor. `input1` has length `n1`; `input2`
/// (the seed) has length `n1 + 1`, which must be prime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circulant {
    n1: u64,
    m: u64,
}

impl Circulant {
    /// Builds a Circulant extractor for the given `n1` (`n1 + 1` must be
    /// prime) and `m`.
    pub fn new(n1: u64, m: u64) -> Result<Self> {
        if n1 < m {
            return Err(Error::PreconditionViolation(format!(
                "n1 ({n1}) must be >= m ({m})"
            )));
        }
        if !is_prime(n1 + 1) {
            return Err(Error::PreconditionViolation(format!(
                "n1 + 1 ({}) must be prime",
                n1 + 1
            )));
        }
        Ok(Self { n1, m })
    }

    /// Extracts `self.m` bits from an `n1`-bit input and an `n1 + 1`-bit
    /// seed.
    pub fn extract(&self, input1: &[u8], input2: &[u8]) -> Result<Vec<u8>> {
        let (n1, m) = (self.n1 as usize, self.m as usize);
        if input1.len() != n1 || input2.len() != n1 + 1 {
            return Err(Error::PreconditionViolation(format!(
                "input1 must have length n1 ({n1}), input2 length n1 + 1 ({}); got {} and {}",
                n1 + 1,
                input1.len(),
                input2.len()
            )));
        }

        let n = n1 + 1;
        let l = crate::math::bit_length(2 * n as u64 - 2);
        let big_l = 1usize << l;

        // `input1` is conceptually padded with a trailing 0 (`n1 -> n`
        // bits) before the "keep first, reverse the rest" permutation;
        // that appended 0 ends up at index 1 once reversed, pushing the
        // reversed original tail to indices `2..n`.
        let mut a = vec![0u64; big_l];
        a[0] = input1[0] as u64;
        for (dst, &src) in a[2..n].iter_mut().zip(input1[1..].iter().rev()) {
            *dst = src as u64;
        }
        let mut b = vec![0u64; big_l];
        for (dst, &src) in b[..n].iter_mut().zip(input2) {
            *dst = src as u64;
        }

        let c = ntt::conv(l, &a, &b);
        Ok((0..m).map(|i| ((c[i] + c[i + n]) & 1) as u8).collect())
    }

    /// Derives valid Circulant parameters from input lengths, min-entropies,
    /// a target `log2_error`, and a quantum-proof flag. Output length is
    /// identical in both proof models for this extractor.
    pub fn from_params(
        n1: u64,
        k1: f64,
        n2: u64,
        k2: f64,
        log2_error: f64,
        _q_proof: bool,
    ) -> Result<(Self, AdjustedLengths)> {
        if log2_error > 0.0 {
            return Err(Error::PreconditionViolation(
                "log2_error must be <= 0".to_string(),
            ));
        }

        let n2_adjusted = closest_prime((n1 + n2) / 2);
        let k1_adjusted = k1 - (n1 as f64 - (n2_adjusted as f64 - 1.0)).max(0.0);
        let k2_adjusted = k2 - (n2 as f64 - n2_adjusted as f64).max(0.0);

        let m = (k1_adjusted + (k2_adjusted - n2_adjusted as f64) + 2.0 * log2_error).floor();

        if m <= 0.0 {
            return Err(Error::InfeasibleParameters(
                "Circulant output length m is non-positive".to_string(),
            ));
        }

        debug!(
            n2 = n2_adjusted,
            k1 = k1_adjusted,
            k2 = k2_adjusted,
            m,
            log2_error,
            "derived Circulant parameters"
        );

        let extractor = Self::new(n2_adjusted - 1, m as u64)?;
        Ok((
            extractor,
            AdjustedLengths {
                n1: n2_adjusted - 1,
                n2: n2_adjusted,
                m: m as u64,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_prime_seed_length() {
        // n1 + 1 = 9, not prime.
        assert!(Circulant::new(8, 2).is_err());
    }

    #[test]
    fn vector_n1_2_m_1() {
        let c = Circulant::new(2, 1).unwrap();
        assert_eq!(c.extract(&[0, 1], &[1, 1, 1]).unwrap(), vec![1]);
    }

    #[test]
    fn vector_n1_2_m_2() {
        let c = Circulant::new(2, 2).unwrap();
        assert_eq!(c.extract(&[1, 0], &[1, 1, 0]).unwrap(), vec![1, 1]);
    }

    #[test]
    fn vector_n1_5_m_5() {
        let c = Circulant::new(5, 5).unwrap();
        assert_eq!(
            c.extract(&[1, 0, 1, 0, 0], &[1, 1, 1, 0, 1, 0]).unwrap(),
            vec![0, 1, 0, 0, 0]
        );
    }

    #[test]
    fn vector_n1_8_m_8() {
        let c = Circulant::new(8, 8).unwrap();
        assert_eq!(
            c.extract(
                &[0, 0, 1, 1, 0, 0, 0, 1],
                &[1, 1, 1, 0, 1, 1, 1, 1, 0]
            )
            .unwrap(),
            vec![0, 1, 1, 1, 1, 1, 0, 1]
        );
    }

    use proptest::prelude::*;

    fn bits4() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(0u8..2, 4)
    }

    proptest! {
        // Fixing the seed, `x -> extract(x, seed)` is GF(2)-linear: the
        // construction is a cyclic convolution of `x` against a fixed
        // vector, reduced mod 2.
        #[test]
        fn extract_is_linear_in_input1_for_a_fixed_seed(
            x1 in bits4(),
            x2 in bits4(),
            seed in prop::collection::vec(0u8..2, 5),
        ) {
            let c = Circulant::new(4, 4).unwrap();
            let xor: Vec<u8> = x1.iter().zip(&x2).map(|(a, b)| a ^ b).collect();

            let out1 = c.extract(&x1, &seed).unwrap();
            let out2 = c.extract(&x2, &seed).unwrap();
            let out_xor = c.extract(&xor, &seed).unwrap();

            let combined: Vec<u8> = out1.iter().zip(&out2).map(|(a, b)| a ^ b).collect();
            prop_assert_eq!(out_xor, combined);
        }
    }
}
