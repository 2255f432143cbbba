//! "na_set" utilities: primes with 2 as a primitive root.
//!
//! `na_set` is the reference implementation's name (`cryptomite.utils.na_set`)
//! for the subset of primes `q` such that 2 generates `(ℤ/qℤ)^*`. Dodis
//! requires its shared input length to land in this set.
//!
//! # Available functions
//!
//! - [`is_na_set`]: Returns `true` if `q` is prime with 2 as a primitive root.
//! - [`next_na_set`], [`previous_na_set`], [`closest_na_set`]: Nearest
//!   na_set primes to a given value.

use super::modint::pow_mod_u64;
use super::prime::{is_prime, prime_factor};

/// Returns `true` if `q` is prime and 2 is a primitive root modulo `q`.
///
/// ## Definition
///
/// Equivalently, for every prime factor `r` of `q - 1`:
///
/// `2^((q-1)/r) !≡ 1 (mod q)`
///
/// ## Complexity
///
/// `O(n^(1/4) log n)` dominated by factoring `q - 1`.
pub fn is_na_set(q: u64) -> bool {
    if q < 3 || !is_prime(q) {
        return false;
    }
    if q == 3 {
        // 2 has order 2 = q - 1 modulo 3.
        return true;
    }
    prime_factor(q - 1)
        .into_iter()
        .all(|(r, _)| pow_mod_u64(2, (q - 1) / r, q) != 1)
}

/// Returns the smallest na_set prime `q >= k`.
pub fn next_na_set(k: u64) -> u64 {
    let mut q = k.max(3);
    while !is_na_set(q) {
        q += 1;
    }
    q
}

/// Returns the largest na_set prime `q <= k`.
///
/// ## Panics
///
/// Panics if no na_set prime is `<= k` (i.e. `k < 3`).
pub fn previous_na_set(k: u64) -> u64 {
    assert!(k >= 3, "no na_set prime is <= {k}");
    let mut q = k;
    while !is_na_set(q) {
        q -= 1;
    }
    q
}

/// Returns the na_set prime closest to `k`, ties broken toward the smaller
/// prime.
pub fn closest_na_set(k: u64) -> u64 {
    if k >= 3 && is_na_set(k) {
        return k;
    }
    let below = if k >= 3 { Some(previous_na_set(k)) } else { None };
    let above = next_na_set(k.saturating_add(1).max(3));
    match below {
        Some(below) if k - below <= above - k => below,
        Some(_) | None => above,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_na_set_primes() {
        // 2 is a primitive root mod 3, 5, 11, 13 but not mod 7 (ord 2 = 3).
        assert!(is_na_set(3));
        assert!(is_na_set(5));
        assert!(!is_na_set(7));
        assert!(is_na_set(11));
        assert!(is_na_set(13));
    }

    #[test]
    fn closest_na_set_matches_brute_force() {
        for k in 3u64..60 {
            let q = closest_na_set(k);
            assert!(is_na_set(q), "{q} is not na_set");
        }
    }
}
