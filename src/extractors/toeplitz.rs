//! The Toeplitz extractor: seeded, rectangular (`n1` input bits, an
//! `n1 + m - 1`-bit seed), realised as a cyclic convolution embedding a
//! linear one.
//!
//! Grounded in `cryptomite/toeplitz.py`'s `Toeplitz.extract`/`from_params`;
//! `from_params`'s iterative search for a feasible `(n1, n2, m)` triple is
//! carried over rather than the simplified single-formula sketch, since
//! the iteration changes which parameters are chosen whenever the Markov
//! q-proof branch or the "seed shorter than ideal" branch engages.

use tracing::debug;

use super::AdjustedLengths;
use crate::error::{Error, Result};
use crate::math::ntt;

/// A configured Toeplitz extractor. `input1` has length `n`; `input2`
/// (the seed) has length `m + n - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toeplitz {
    n: u64,
    m: u64,
}

impl Toeplitz {
    /// Builds a Toeplitz extractor for the given input length `n` and
    /// output length `m`.
    pub fn new(n: u64, m: u64) -> Result<Self> {
        if n < m {
            return Err(Error::PreconditionViolation(format!(
                "n ({n}) must be >= m ({m})"
            )));
        }
        Ok(Self { n, m })
    }

    /// Extracts `self.m` bits from an `n`-bit input and an
    /// `n + m - 1`-bit seed.
    pub fn extract(&self, input1: &[u8], input2: &[u8]) -> Result<Vec<u8>> {
        let (n, m) = (self.n as usize, self.m as usize);
        if input1.len() != n || input2.len() != n + m - 1 {
            return Err(Error::PreconditionViolation(format!(
                "input1 must have length n ({n}), input2 length n + m - 1 ({}); got {} and {}",
                n + m - 1,
                input1.len(),
                input2.len()
            )));
        }

        let l = crate::math::bit_length(2 * n as u64);
        let big_l = 1usize << l;

        let mut a = vec![0u64; big_l];
        for (dst, &src) in a[..n].iter_mut().zip(input1) {
            *dst = src as u64;
        }

        let mut b = vec![0u64; big_l];
        for (dst, &src) in b[..m].iter_mut().zip(&input2[..m]) {
            *dst = src as u64;
        }
        let tail_start = big_l - (n + m - 1 - m);
        for (dst, &src) in b[tail_start..].iter_mut().zip(&input2[m..]) {
            *dst = src as u64;
        }

        let c = ntt::conv(l, &a, &b);
        Ok(c[..m].iter().map(|&x| (x & 1) as u8).collect())
    }

    /// Derives valid Toeplitz parameters, mirroring `Toeplitz.from_params`'s
    /// iterative feasibility search: shrink the input/seed lengths by one
    /// bit at a time (carrying the corresponding min-entropy down with
    /// them) until the seed length `n2 = n1 + m - 1` is achievable.
    #[allow(clippy::too_many_arguments)]
    pub fn from_params(
        mut min_entropy1: f64,
        mut min_entropy2: f64,
        log2_error: f64,
        mut input_length1: u64,
        mut input_length2: u64,
        markov_q_proof: bool,
    ) -> Result<(Self, AdjustedLengths)> {
        if log2_error > 0.0 {
            return Err(Error::PreconditionViolation(
                "log2_error must be <= 0".to_string(),
            ));
        }
        if input_length2 <= input_length1 {
            return Err(Error::PreconditionViolation(
                "seed (input_length2) must be longer than input_length1".to_string(),
            ));
        }

        let mut output_length = 0.0f64;
        if min_entropy2 >= input_length2 as f64 {
            output_length = min_entropy1 + 2.0 * log2_error;
            if input_length2 as f64 >= output_length + input_length1 as f64 - 1.0 {
                input_length2 = (output_length + input_length1 as f64 - 1.0) as u64;
            }
            while (input_length2 as f64) < output_length + input_length1 as f64 - 1.0 {
                input_length1 -= 1;
                min_entropy1 -= 1.0;
                output_length = min_entropy1 + 2.0 * log2_error;
            }
        }
        if min_entropy2 < input_length2 as f64 {
            output_length = (0.5
                * (min_entropy1 + min_entropy2 - input_length1 as f64 + 1.0 + 2.0 * log2_error))
                .floor();
            while input_length2 as f64 > output_length + input_length1 as f64 - 1.0 {
                input_length2 -= 1;
                min_entropy2 -= 1.0;
                output_length = (0.5
                    * (min_entropy1 + min_entropy2 - input_length1 as f64 + 1.0
                        + 2.0 * log2_error))
                    .floor();
            }
            if (input_length2 as f64) < output_length + input_length1 as f64 - 1.0 {
                output_length = input_length2 as f64 - input_length1 as f64 + 1.0;
            }
        }
        if markov_q_proof {
            output_length = ((1.0 / 6.0)
                * (min_entropy1 + min_entropy2 - input_length1 as f64 + 8.0 * log2_error + 9.0
                    - 4.0 * 3f64.log2()))
            .floor();
            while input_length2 as f64 > output_length + input_length1 as f64 - 1.0 {
                input_length2 -= 1;
                min_entropy2 -= 1.0;
                output_length = ((1.0 / 6.0)
                    * (min_entropy1 + min_entropy2 - input_length1 as f64 + 8.0 * log2_error
                        + 9.0
                        - 4.0 * 3f64.log2()))
                .floor();
            }
            if (input_length2 as f64) < output_length + input_length1 as f64 - 1.0 {
                output_length = input_length2 as f64 - input_length1 as f64 + 1.0;
            }
        }

        if output_length <= 0.0 {
            return Err(Error::InfeasibleParameters(
                "Toeplitz output length is non-positive".to_string(),
            ));
        }

        debug!(
            input_length1,
            input_length2,
            m = output_length,
            log2_error,
            markov_q_proof,
            "derived Toeplitz parameters"
        );

        let extractor = Self::new(input_length1, output_length as u64)?;
        Ok((
            extractor,
            AdjustedLengths {
                n1: input_length1,
                n2: input_length2,
                m: output_length as u64,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_rejects_wrong_seed_length() {
        assert!(Toeplitz::new(5, 2).unwrap().extract(&[0; 5], &[0; 5]).is_err());
    }

    #[test]
    fn accepts_well_formed_inputs() {
        let t = Toeplitz::new(4, 2).unwrap();
        // seed length n + m - 1 = 5
        assert!(t.extract(&[0, 1, 0, 1], &[1, 0, 1, 1, 0]).is_ok());
    }

    #[test]
    fn extract_rejects_length_mismatch() {
        let t = Toeplitz::new(4, 2).unwrap();
        assert!(t.extract(&[0, 1, 0], &[1, 0, 1, 1, 0]).is_err());
    }
}
