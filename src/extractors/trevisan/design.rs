//! Block weak combinatorial design: derives `S_0, …, S_{m-1} ⊂ {0, …, d-1}`,
//! `|S_i| = t`, from a seed pool of size `d = 4 * a * t^2`.
//!
//! No reference implementation survives for Trevisan's internal engine (the
//! Python package delegates it to a compiled extension), so this is built
//! directly from the classic Nisan-Wigderson/Raz-Reingold-Vadhan "basic weak
//! design", extended block-wise the way Mauerer, Portmann & Scholz describe
//! for Trevisan's extractor: a basic design handles up to `q^2` indices for
//! a prime `q >= t` (two GF(q) coefficients index a degree-`<2` polynomial,
//! evaluated at `t` distinct points to produce a `t`-element set); any two
//! distinct polynomials agree in at most one point, so same-block sets
//! intersect in at most one position. `a` independent blocks, each drawing
//! from its own disjoint `4*t^2`-bit segment of the seed pool, extend this
//! to `a * q^2 >= m` indices with *zero* cross-block intersection. That
//! gives `Σ_{j<i} 2^|S_i ∩ S_j| <= 2*(m-1)`, comfortably inside the
//! `r*(m-1)` bound §4E requires for `r = 2e`.

use crate::math::prime::next_prime;

#[derive(Debug, Clone)]
pub struct BlockWeakDesign {
    t: usize,
    /// Prime `q >= t`: the field the basic per-block design evaluates over.
    q: u64,
    /// Indices addressable by one block's basic design, `q * q`.
    block_capacity: u64,
    /// Seed-pool bits reserved per block, `4 * t * t` (`>= block_capacity`
    /// by Bertrand's postulate for any `t >= 1`).
    pool_per_block: usize,
}

impl BlockWeakDesign {
    /// Builds a design with set size `t`, replicated across `a` blocks.
    pub fn new(t: usize, a: usize) -> Self {
        let t = t.max(1);
        let a = a.max(1);
        let q = next_prime(t.max(2) as u64);
        let block_capacity = q * q;
        let pool_per_block = 4 * t * t;
        debug_assert!(
            block_capacity as usize <= pool_per_block,
            "q={q} too large for t={t} (Bertrand's postulate should rule this out)"
        );
        let _ = a;
        Self {
            t,
            q,
            block_capacity,
            pool_per_block,
        }
    }

    /// Total seed length `d = 4 * a * t^2` this design draws from.
    pub fn seed_len(&self, a: usize) -> usize {
        self.pool_per_block * a.max(1)
    }

    /// How many output indices a single block can address, `q^2 >= t^2`.
    pub fn block_capacity(&self) -> u64 {
        self.block_capacity
    }

    /// Returns the size-`t` index set `S_i`, as positions into
    /// `0..seed_len(a)`.
    ///
    /// Within a block, `S_i` is `{j * q + p_i(j) : j in 0..t}` for the
    /// degree-`<2` polynomial `p_i(x) = c0 + c1 * x (mod q)` whose
    /// coefficients are `i`'s base-`q` digits; across blocks, each draws
    /// from its own disjoint `pool_per_block`-sized segment.
    pub fn set_for_index(&self, i: usize) -> Vec<usize> {
        let block = i as u64 / self.block_capacity;
        let r = i as u64 % self.block_capacity;
        let c0 = r % self.q;
        let c1 = r / self.q;
        let block_offset = block as usize * self.pool_per_block;
        (0..self.t)
            .map(|j| {
                let x = j as u64 % self.q;
                let val = (c0 + c1 * x) % self.q;
                block_offset + (j as u64 * self.q + val) as usize
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_set_has_size_t() {
        let design = BlockWeakDesign::new(8, 2);
        for i in 0..16 {
            assert_eq!(design.set_for_index(i).len(), 8);
        }
    }

    #[test]
    fn sets_stay_within_seed_length() {
        let design = BlockWeakDesign::new(10, 3);
        let seed_len = design.seed_len(3);
        for i in 0..32 {
            for &pos in &design.set_for_index(i) {
                assert!(pos < seed_len);
            }
        }
    }

    #[test]
    fn same_block_sets_intersect_in_at_most_one_position() {
        let design = BlockWeakDesign::new(12, 1);
        let cap = design.block_capacity().min(40) as usize;
        for i in 0..cap {
            let si: HashSet<usize> = design.set_for_index(i).into_iter().collect();
            for j in (i + 1)..cap {
                let sj: HashSet<usize> = design.set_for_index(j).into_iter().collect();
                assert!(
                    si.intersection(&sj).count() <= 1,
                    "sets for {i} and {j} intersect in more than one position"
                );
            }
        }
    }

    #[test]
    fn distinct_blocks_never_intersect() {
        let design = BlockWeakDesign::new(6, 2);
        let cap = design.block_capacity() as usize;
        let s0 = design.set_for_index(0);
        let s1 = design.set_for_index(cap);
        assert!(s0.iter().all(|p| !s1.contains(p)));
    }
}
