//! The Raz two-source extractor over GF(2^n), NTT-based square-and-multiply.
//!
//! Grounded in `cryptomite/raz.py`'s `Raz` class: `__init__` for the
//! `logp`/padding setup, `extract` for the square-and-multiply loop
//! (fused here via [`ntt::raz_iteration`]), `opt_error_raz`/`calc_raz_out`
//! for the parameter search in `from_params`.

use tracing::debug;

use super::AdjustedLengths;
use crate::error::{Error, Result};
use crate::gf2n;
use crate::math::ntt;
use crate::trinomials;

/// `opt_error_raz`'s overflow guard on the search exponent `l`: `2^l` is
/// never evaluated past this, since `from_params`'s search has no use for
/// `p_max` values that large long before `2u64.pow` would actually
/// overflow.
const MAX_POW_FOR_OVERFLOW: i64 = 32;

/// A configured Raz extractor. `input1` has length `2n`; `input2` has
/// length in `(0, n]`; output has length `m <= n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Raz {
    n: usize,
    m: usize,
    s: u32,
    l: u32,
}

impl Raz {
    /// Builds a Raz extractor for `n1 = 2 * n` input-1 bits and `m` output
    /// bits, looking up the trinomial for `GF(2^n)` in the shipped table.
    pub fn new(n1: u64, m: u64) -> Result<Self> {
        if n1 % 2 != 0 {
            return Err(Error::PreconditionViolation(format!(
                "n1 ({n1}) must be even"
            )));
        }
        let n = (n1 / 2) as usize;
        if m as usize > n {
            return Err(Error::PreconditionViolation(format!(
                "m ({m}) must be <= n1 / 2 ({n})"
            )));
        }
        let s = trinomials::lookup(n as u32).ok_or_else(|| {
            Error::UnsupportedConfiguration(format!(
                "GF(2^{n}) has no known irreducible trinomial in the shipped table"
            ))
        })?;
        Ok(Self::with_trinomial(n, m as usize, s))
    }

    /// Builds a Raz extractor with an explicitly supplied trinomial
    /// exponent `s` (`x^n + x^s + 1`), bypassing the lookup table.
    ///
    /// The caller is responsible for `x^n + x^s + 1` actually being
    /// irreducible — checking is prohibitively expensive and not
    /// attempted here, matching `cryptomite/raz.py`'s documented trust
    /// boundary for this parameter.
    pub fn with_trinomial(n: usize, m: usize, s: u32) -> Self {
        let l = gf2n::transform_level(n);
        Self { n, m, s, l }
    }

    /// Extracts `self.m` bits from a `2n`-bit `input1` and a
    /// `<= n`-bit `input2`.
    pub fn extract(&self, input1: &[u8], input2: &[u8]) -> Result<Vec<u8>> {
        let n = self.n;
        if input1.len() < 2 * n {
            return Err(Error::PreconditionViolation(format!(
                "input1 must have length >= 2n ({}), got {}",
                2 * n,
                input1.len()
            )));
        }
        if input2.is_empty() || input2.len() > n {
            return Err(Error::PreconditionViolation(format!(
                "input2 must have length in (0, n] (n = {n}), got {}",
                input2.len()
            )));
        }

        let x1 = &input1[0..n];
        let x2 = &input1[n..2 * n];
        let mut y = input2.to_vec();
        y.resize(n, 0);

        let mut cur_delta = gf2n::mul(n, self.s, &y, x1);
        let mut product = gf2n::add_one(&cur_delta);
        cur_delta = gf2n::mul(n, self.s, &cur_delta, &cur_delta);

        for _ in 1..self.l {
            let (new_product, new_delta) =
                ntt::raz_iteration(self.l, &product, &cur_delta, n, self.s as usize);
            product = new_product;
            cur_delta = new_delta;
        }

        let conv_output = gf2n::mul(n, self.s, &product, x2);
        Ok(conv_output[..self.m].to_vec())
    }

    /// Derives valid Raz parameters by searching for `(l, p)` that
    /// minimise the error bound from `cryptomite/raz.py`'s
    /// `opt_error_raz`/`calc_raz_out`, returning the largest `m` meeting
    /// `log2_error`.
    ///
    /// `detailed` selects the wider (up to 1000-iteration) search over
    /// the coarse few-iteration default, trading derivation time for a
    /// potentially larger feasible `m`.
    pub fn from_params(
        n1: u64,
        k1: f64,
        n2: u64,
        k2: f64,
        log2_error: f64,
        detailed: bool,
    ) -> Result<(Self, AdjustedLengths)> {
        if n1 % 2 != 0 {
            return Err(Error::PreconditionViolation(format!(
                "n1 ({n1}) must be even"
            )));
        }
        let half = n1 / 2;
        if n2 == 0 || n2 > half {
            return Err(Error::PreconditionViolation(format!(
                "n2 ({n2}) must be in (0, n1 / 2] ({half})"
            )));
        }

        let max_tests = if detailed { 1000u32 } else { 1 };
        let l_max = (n2 as f64 + (half as f64).log2().floor()) as i64;

        let mut best: Option<(u64, i64, u64)> = None; // (m, l, p)
        let mut m_candidate = half;
        'search: while m_candidate > 0 {
            let l_use = ((m_candidate as f64 * (n1 as f64 - k1)).log2().floor() as i64).max(1);
            let max_plus = ((l_max - l_use) as u32).min((max_tests - 1) / 2) as i64;
            let max_minus = ((l_use - (m_candidate as f64).log2().ceil() as i64 - 1) as u32)
                .min((max_tests - 1) / 2) as i64;

            for l_try in (l_use - max_minus)..=(l_use + max_plus) {
                // Mirrors `opt_error_raz`'s `max_pow_for_overflow` guard:
                // `2u64.pow` on an exponent this large would overflow long
                // before the resulting p_max could matter for the search,
                // so such `l_try` are simply skipped rather than evaluated.
                if l_try < 1 || l_try > MAX_POW_FOR_OVERFLOW {
                    continue;
                }
                let p_max = 2u64.pow(l_try as u32) / m_candidate.max(1);
                let mut p = 2u64;
                while p <= p_max {
                    let bound = raz_log2_error_bound(n1, k1, k2, m_candidate, l_try, p as i64);
                    if bound <= log2_error {
                        best = Some((m_candidate, l_try, p));
                        break 'search;
                    }
                    p += 2;
                }
            }
            m_candidate -= 1;
        }

        let (m, l_chosen, p_chosen) = best.ok_or_else(|| {
            Error::InfeasibleParameters(
                "no (m, l, p) satisfies the requested Raz log2_error".to_string(),
            )
        })?;

        debug!(
            n1,
            n2,
            m,
            l = l_chosen,
            p = p_chosen,
            log2_error,
            detailed,
            "derived Raz parameters"
        );

        let extractor = Self::new(n1, m)?;
        Ok((
            extractor,
            AdjustedLengths {
                n1,
                n2,
                m,
            },
        ))
    }
}

/// `log2_error_raz` from `cryptomite/raz.py`: upper bound on log2 of the
/// Raz extractor error for a given `(m, l, p)` triple.
fn raz_log2_error_bound(n1: u64, k1: f64, k2: f64, m: u64, l: i64, p: i64) -> f64 {
    let log_gamma_bound = (n1 as f64 - k1) / p as f64
        + ((l as f64 - n1 as f64 / 2.0 + 1.0) / p as f64).max((p as f64).log2() - k2 / 2.0)
        + 1.0;
    log_gamma_bound + m as f64 / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_odd_n1() {
        assert!(Raz::new(7, 1).is_err());
    }

    #[test]
    fn rejects_unknown_trinomial_degree() {
        // n1 / 2 = 4 is not in the shipped trinomial table.
        assert!(Raz::new(8, 1).is_err());
    }

    #[test]
    fn accepts_known_trinomial_degree() {
        // n1 / 2 = 3, trinomial s = 1.
        assert!(Raz::new(6, 1).is_ok());
    }

    #[test]
    fn from_params_does_not_overflow_when_l_use_exceeds_sixty_four() {
        // A deeply negative k1 pushes `l_use = floor(log2(m * (n1 - k1)))`
        // well past 64 for every candidate `m`; pre-guard, `2u64.pow(l_try)`
        // would overflow on the very first iteration instead of being
        // skipped by the `MAX_POW_FOR_OVERFLOW` cap.
        let result = Raz::from_params(100, -1e20, 10, 5.0, -5.0, false);
        assert!(result.is_err());
    }

    #[test]
    fn extract_output_has_requested_length() {
        let r = Raz::new(6, 2).unwrap();
        let input1 = vec![1, 0, 1, 0, 1, 1];
        let input2 = vec![1, 1, 0];
        let out = r.extract(&input1, &input2).unwrap();
        assert_eq!(out.len(), 2);
    }
}
