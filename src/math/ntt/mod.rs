//! Number-theoretic transform kernel shared by the cyclic-convolution
//! extractors (Dodis, Circulant, Toeplitz) and by Raz's GF(2^n) arithmetic.
//!
//! Exposes a runtime-selected prime rather than the teacher's
//! compile-time `const MOD: u32` NTT, so a single call site can pick
//! whichever of [`small`] or [`big`] fits the requested log-size `l`; and
//! a *cyclic* convolution (output length `L`, no truncation) rather than
//! the teacher's linear convolution, since every extractor here needs the
//! full cyclic product.

pub mod big;
pub mod small;

use big::BigGF;
use small::SmallGF;

/// Transforms `l <= SWITCH_LEVEL` use the small 32-bit prime; larger `l`
/// use the 62-bit prime.
const SWITCH_LEVEL: u32 = small::MAX_LEVEL;

/// In-place forward (`inverse = false`) or inverse (`inverse = true`) NTT
/// of a length-`2^l` vector of plain integers.
///
/// ## Panics
///
/// Panics (debug only) if `v.len() != 2^l`.
pub fn ntt(l: u32, v: &mut [u64], inverse: bool) {
    debug_assert_eq!(v.len(), 1usize << l, "vector length must be 2^l");
    if l <= SWITCH_LEVEL {
        let mut f: Vec<SmallGF> = v.iter().map(|&x| SmallGF::new(x as u32)).collect();
        if inverse {
            small::intt(&mut f);
        } else {
            small::ntt(&mut f);
        }
        for (dst, src) in v.iter_mut().zip(f) {
            *dst = src.value() as u64;
        }
    } else {
        let mut f: Vec<BigGF> = v.iter().map(|&x| BigGF::new(x)).collect();
        if inverse {
            big::intt(&mut f);
        } else {
            big::ntt(&mut f);
        }
        for (dst, src) in v.iter_mut().zip(f) {
            *dst = src.value();
        }
    }
}

/// Cyclic convolution of two length-`2^l` integer vectors modulo the
/// context's prime: `c[k] = sum_i a[i] * b[(k - i) mod L]`.
///
/// The caller is responsible for keeping every input small enough (and
/// `L` small enough) that the true integer convolution value fits inside
/// the prime used for `l`; for the 0/1 bit vectors the extractors in
/// this crate use, that always holds (a sum of at most `L` terms never
/// approaches either prime).
///
/// ## Panics
///
/// Panics (debug only) if `a.len() != b.len()` or their length isn't `2^l`.
pub fn conv(l: u32, a: &[u64], b: &[u64]) -> Vec<u64> {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), 1usize << l);
    let mut fa = a.to_vec();
    let mut fb = b.to_vec();
    ntt(l, &mut fa, false);
    ntt(l, &mut fb, false);
    pointwise_mul(l, &mut fa, &fb);
    ntt(l, &mut fa, true);
    fa
}

fn pointwise_mul(l: u32, fa: &mut [u64], fb: &[u64]) {
    if l <= SWITCH_LEVEL {
        for (x, &y) in fa.iter_mut().zip(fb) {
            *x = (SmallGF::new(*x as u32) * SmallGF::new(y as u32)).value() as u64;
        }
    } else {
        for (x, &y) in fa.iter_mut().zip(fb) {
            *x = (BigGF::new(*x) * BigGF::new(y)).value();
        }
    }
}

/// Reduces a length-`2 * 2^k` (for `2^k >= n`) GF(2) polynomial — given as
/// plain integer coefficients, taken mod 2 here — modulo the irreducible
/// trinomial `x^n + x^s + 1`, in place, down to degree `< n`.
///
/// Mirrors `cryptomite/raz.py`'s `__poly_reduce`: walk the coefficients
/// from the highest degree down; whenever a degree-`n+i` coefficient is
/// set, XOR it away and fold it into degrees `i` and `s + i`.
fn reduce_trinomial(coeffs: &mut [u64], n: usize, s: usize) -> Vec<u8> {
    let mut bits: Vec<u8> = coeffs.iter().map(|&c| (c & 1) as u8).collect();
    for i in (n..bits.len()).rev() {
        if bits[i] == 1 {
            bits[i] = 0;
            bits[i - n] ^= 1;
            bits[i - n + s] ^= 1;
        }
    }
    bits.truncate(n);
    bits
}

/// Fused cyclic convolution + trinomial reduction for Raz: multiplies two
/// degree-`<n` GF(2) polynomials and reduces the product modulo
/// `x^n + x^s + 1`, returning `n` coefficient bits.
pub fn conv_and_reduce(l: u32, a: &[u64], b: &[u64], n: usize, s: usize) -> Vec<u8> {
    let mut product = conv(l, a, b);
    reduce_trinomial(&mut product, n, s)
}

/// One fused step of Raz's square-and-multiply loop.
///
/// Given the running `product` and the current `delta`, both as length-`n`
/// GF(2) coefficient vectors, returns `(product * (delta + 1) mod trinomial,
/// delta^2 mod trinomial)` — i.e. this computes one iteration of
/// `product *= delta + 1; delta *= delta` in `GF(2^n)` using a single pair
/// of forward NTTs per input (grounded in `cryptomite/raz.py::Raz.extract`'s
/// loop body, which the reference implementation also fuses into one
/// native call per iteration).
pub fn raz_iteration(l: u32, product: &[u8], delta: &[u8], n: usize, s: usize) -> (Vec<u8>, Vec<u8>) {
    let len = 1usize << l;
    let mut delta_plus_one: Vec<u64> = delta.iter().map(|&b| b as u64).collect();
    delta_plus_one.resize(len, 0);
    delta_plus_one[0] ^= 1;

    let mut product_v: Vec<u64> = product.iter().map(|&b| b as u64).collect();
    product_v.resize(len, 0);
    let mut delta_v: Vec<u64> = delta.iter().map(|&b| b as u64).collect();
    delta_v.resize(len, 0);

    let new_product = conv_and_reduce(l, &product_v, &delta_plus_one, n, s);
    let new_delta = conv_and_reduce(l, &delta_v, &delta_v, n, s);
    (new_product, new_delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_cyclic_conv(a: &[u64], b: &[u64]) -> Vec<u64> {
        let n = a.len();
        let mut c = vec![0u64; n];
        for i in 0..n {
            for j in 0..n {
                c[(i + j) % n] += a[i] * b[j];
            }
        }
        c
    }

    #[test]
    fn conv_matches_naive_small() {
        let l = 5;
        let n = 1usize << l;
        let a: Vec<u64> = (0..n as u64).map(|x| x % 3).collect();
        let b: Vec<u64> = (0..n as u64).map(|x| (x * 7) % 5).collect();
        assert_eq!(conv(l, &a, &b), naive_cyclic_conv(&a, &b));
    }

    #[test]
    fn small_and_big_primes_agree_on_the_same_convolution() {
        // Both fields are large enough to represent this small convolution
        // exactly, so driving the big-prime path directly (bypassing the
        // `l > 30` dispatch, which would otherwise require an infeasibly
        // large vector to exercise in a unit test) must agree with the
        // small-prime path bit for bit.
        let l = 6;
        let n = 1usize << l;
        let a: Vec<u64> = (0..n as u64).map(|x| x % 2).collect();
        let b: Vec<u64> = (0..n as u64).map(|x| (x + 1) % 2).collect();

        let small_result = conv(l, &a, &b);

        let mut fa: Vec<BigGF> = a.iter().map(|&x| BigGF::new(x)).collect();
        let mut fb: Vec<BigGF> = b.iter().map(|&x| BigGF::new(x)).collect();
        big::ntt(&mut fa);
        big::ntt(&mut fb);
        for (x, y) in fa.iter_mut().zip(fb.iter()) {
            *x = *x * *y;
        }
        big::intt(&mut fa);
        let big_result: Vec<u64> = fa.iter().map(|g| g.value()).collect();

        assert_eq!(small_result, big_result);
        assert_eq!(small_result, naive_cyclic_conv(&a, &b));
    }

    #[test]
    fn reduce_trinomial_keeps_low_degree_terms_fixed() {
        // n = 3, s = 1 (x^3 + x + 1); a degree-<3 poly reduces to itself.
        let mut coeffs = vec![1u64, 0, 1, 0, 0, 0, 0, 0];
        let reduced = reduce_trinomial(&mut coeffs, 3, 1);
        assert_eq!(reduced, vec![1, 0, 1]);
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ntt_roundtrips_for_small_values(values in prop::collection::vec(0u64..5, 32)) {
            let l = 5;
            let mut v = values;
            let original = v.clone();
            ntt(l, &mut v, false);
            ntt(l, &mut v, true);
            prop_assert_eq!(v, original);
        }

        #[test]
        fn conv_matches_naive_for_arbitrary_small_vectors(
            a in prop::collection::vec(0u64..4, 16),
            b in prop::collection::vec(0u64..4, 16),
        ) {
            let l = 4;
            prop_assert_eq!(conv(l, &a, &b), naive_cyclic_conv(&a, &b));
        }
    }
}
