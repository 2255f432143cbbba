//! Small-prime NTT: `l <= 30`, a single 32-bit NTT-friendly prime.
//!
//! Generalises the teacher's `const MOD: u32` NTT (`math::conv::ntt` in the
//! original competitive-programming library) from a compile-time modulus
//! templated per call-site to this crate's one fixed small prime, and from
//! a fixed-size twiddle array to a `Vec` sized to the transform actually
//! requested (so callers doing length-`2^5` convolutions don't pay for
//! length-`2^30` twiddle tables).

use std::sync::LazyLock;

use crate::math::gf::GF;
use crate::math::modint::pow_mod;
use crate::math::prime::primitive_root;

/// NTT-friendly prime `p = 3 * 2^30 + 1`; `p - 1` is divisible by `2^30`,
/// so this prime supports cyclic transforms up to length `2^30`.
pub const SMALL_PRIME: u32 = 3_221_225_473;

/// Maximum log-size the small-prime path supports.
pub const MAX_LEVEL: u32 = 30;

/// A field element modulo [`SMALL_PRIME`].
pub type SmallGF = GF<SMALL_PRIME>;

struct Roots {
    /// `roots[i]` and `inv_roots[i]` hold the per-level twiddle factor used
    /// by the iterative butterfly, already folded with the bit-reversal
    /// correction term `zeta_i` (see `compute_roots`).
    roots: Vec<u32>,
    inv_roots: Vec<u32>,
}

static ROOTS: LazyLock<Roots> = LazyLock::new(compute_roots);

fn compute_roots() -> Roots {
    let modulo = SMALL_PRIME;
    let k = (modulo - 1).trailing_zeros() as usize;
    debug_assert!(k as u32 >= MAX_LEVEL);

    let g = primitive_root(modulo as u64);
    let mut omega = pow_mod(g, ((modulo - 1) >> k) as u64, modulo as u64);
    let mut inv_omega = pow_mod(omega, (modulo - 2) as u64, modulo as u64);

    let mut omega_pow = vec![0u32; k];
    let mut inv_omega_pow = vec![0u32; k];
    for i in (0..k.saturating_sub(1)).rev() {
        omega_pow[i] = omega as u32;
        inv_omega_pow[i] = inv_omega as u32;
        omega = (omega * omega) % modulo as u64;
        inv_omega = (inv_omega * inv_omega) % modulo as u64;
    }

    let mut roots = vec![0u32; k];
    let mut inv_roots = vec![0u32; k];
    let mut zeta = 1u64;
    let mut inv_zeta = 1u64;
    for i in 0..k.saturating_sub(1) {
        roots[i] = (omega_pow[i] as u64 * zeta % modulo as u64) as u32;
        inv_roots[i] = (inv_omega_pow[i] as u64 * inv_zeta % modulo as u64) as u32;
        zeta = zeta * inv_omega_pow[i] as u64 % modulo as u64;
        inv_zeta = inv_zeta * omega_pow[i] as u64 % modulo as u64;
    }
    Roots { roots, inv_roots }
}

/// Forward NTT (in place). `data.len()` must be a power of two, `<= 2^MAX_LEVEL`.
pub fn ntt(data: &mut [SmallGF]) {
    let n = data.len();
    if n <= 1 {
        return;
    }
    let k = n.trailing_zeros() as usize;
    let roots = &ROOTS.roots;
    for t in (0..k).rev() {
        let t = 1 << t;
        let mut coef = SmallGF::new(1);
        for (i, block) in data.chunks_exact_mut(2 * t).enumerate() {
            let (x, y) = block.split_at_mut(t);
            for (x, y) in x.iter_mut().zip(y.iter_mut()) {
                (*x, *y) = (*x + *y * coef, *x - *y * coef);
            }
            coef *= SmallGF::new(roots[(!i).trailing_zeros() as usize]);
        }
    }
}

/// Inverse NTT (in place), the two-sided inverse of [`ntt`].
pub fn intt(data: &mut [SmallGF]) {
    let n = data.len();
    if n <= 1 {
        return;
    }
    let k = n.trailing_zeros() as usize;
    let inv_roots = &ROOTS.inv_roots;
    for t in 0..k {
        let t = 1 << t;
        let mut coef = SmallGF::new(1);
        for (i, block) in data.chunks_exact_mut(2 * t).enumerate() {
            let (x, y) = block.split_at_mut(t);
            for (x, y) in x.iter_mut().zip(y.iter_mut()) {
                (*x, *y) = (*x + *y, (*x - *y) * coef);
            }
            coef *= SmallGF::new(inv_roots[(!i).trailing_zeros() as usize]);
        }
    }
    let inv_n = SmallGF::new(2).inv().pow(k as u32);
    for x in data.iter_mut() {
        *x *= inv_n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        for l in 0..=12u32 {
            let n = 1usize << l;
            let mut v: Vec<SmallGF> = (0..n as u32).map(SmallGF::new).collect();
            let orig = v.clone();
            ntt(&mut v);
            intt(&mut v);
            assert_eq!(v, orig, "l={l}");
        }
    }
}
