//! Known irreducible trinomials `x^n + x^s + 1` over GF(2).
//!
//! Raz needs one to reduce `GF(2^n)` products; finding a new one is
//! expensive (testing irreducibility means factoring `2^n - 1`-scale
//! numbers), so the reference implementation ships a fixed table of
//! `n` values with a known `s`, carried over verbatim from
//! `cryptomite/raz.py`'s `trinomial_s`. Most entries are Mersenne-prime
//! exponents (trinomials happen to exist there), plus a handful of other
//! known cases.

/// `(n, s)` pairs: `x^n + x^s + 1` is irreducible over GF(2).
const TRINOMIALS: &[(u32, u32)] = &[
    (3, 1),
    (7, 1),
    (15, 1),
    (31, 3),
    (63, 1),
    (127, 7),
    (255, 52),
    (521, 32),
    (1279, 216),
    (2281, 715),
    (3217, 67),
    (4423, 271),
    (23209, 1530),
    (44497, 8575),
    (110503, 25230),
    (132049, 7000),
    (756839, 279695),
    (859433, 170340),
    (3021377, 361604),
    (6972593, 3037958),
    (24036583, 8412642),
    (25964951, 880890),
    (30402457, 2162059),
    (32582657, 5110722),
    (42643801, 55981),
    (43112609, 3569337),
    (74207281, 9156813),
];

/// Returns the shipped `s` such that `x^n + x^s + 1` is irreducible over
/// GF(2), if `n` is one of the table's known degrees.
pub fn lookup(n: u32) -> Option<u32> {
    TRINOMIALS
        .iter()
        .find(|&&(deg, _)| deg == n)
        .map(|&(_, s)| s)
}

/// Returns the smallest known trinomial degree `>= min_degree`, along with
/// its `s`. Used to snap a derived field width up to one the shipped table
/// actually covers (Trevisan's one-bit extractor needs a trinomial at an
/// arbitrary derived width; finding a new irreducible trinomial at runtime
/// is exactly the expensive check the table exists to avoid).
pub fn smallest_at_least(min_degree: u32) -> Option<(u32, u32)> {
    TRINOMIALS
        .iter()
        .filter(|&&(deg, _)| deg >= min_degree)
        .min_by_key(|&&(deg, _)| deg)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_degrees() {
        assert_eq!(lookup(3), Some(1));
        assert_eq!(lookup(127), Some(7));
        assert_eq!(lookup(74207281), Some(9156813));
    }

    #[test]
    fn unknown_degree_is_none() {
        assert_eq!(lookup(4), None);
        assert_eq!(lookup(100), None);
    }

    #[test]
    fn smallest_at_least_snaps_upward() {
        assert_eq!(smallest_at_least(4), Some((7, 1)));
        assert_eq!(smallest_at_least(7), Some((7, 1)));
        assert_eq!(smallest_at_least(1), Some((3, 1)));
    }
}
