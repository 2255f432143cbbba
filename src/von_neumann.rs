//! The Von Neumann debiaser and the `suggest_extractor` heuristic.

/// Pairs up consecutive bits, emitting `0` for `(0, 1)` and `1` for
/// `(1, 0)`; `(0, 0)` and `(1, 1)` pairs are dropped. A trailing unpaired
/// bit (odd-length input) is dropped.
///
/// ## Complexity
///
/// `O(n)`
pub fn von_neumann(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(2)
        .filter_map(|pair| match pair {
            [0, 1] => Some(0),
            [1, 0] => Some(1),
            _ => None,
        })
        .collect()
}

/// Suggests an extractor by name for a source of `n` bits.
///
/// - If the source is exchangeable (i.i.d. up to reordering), `"Von
///   Neumann"` is both sufficient and by far the cheapest.
/// - Otherwise, for moderate `n` (`<= 10^6`) or when raw throughput
///   matters more than extraction rate, `"Circulant"`.
/// - Otherwise, `"Trevisan"`, which tolerates arbitrary (non-i.i.d.,
///   quantum-adversarial) sources at the cost of a much longer seed.
pub fn suggest_extractor(n: u64, exchangeable: bool, efficient: bool) -> &'static str {
    if exchangeable {
        "Von Neumann"
    } else if n <= 1_000_000 || efficient {
        "Circulant"
    } else {
        "Trevisan"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_biased_pairs_and_trailing_bit() {
        assert_eq!(von_neumann(&[0, 1, 0, 1]), vec![0, 0]);
        assert_eq!(von_neumann(&[0, 0, 1, 1]), Vec::<u8>::new());
    }

    #[test]
    fn keeps_unbiased_pairs() {
        assert_eq!(von_neumann(&[1, 0, 0, 1]), vec![1, 0]);
    }

    #[test]
    fn odd_trailing_bit_is_dropped() {
        assert_eq!(von_neumann(&[0, 1, 1]), vec![0]);
    }

    #[test]
    fn vector_twenty_bits() {
        let input = [
            1, 0, 0, 0, 1, 0, 1, 0, 1, 1, 1, 1, 0, 0, 1, 1, 0, 1, 1, 0,
        ];
        assert_eq!(von_neumann(&input), vec![1, 1, 1, 0, 1]);
    }

    #[test]
    fn suggestion_rules() {
        assert_eq!(suggest_extractor(10, true, false), "Von Neumann");
        assert_eq!(suggest_extractor(10, false, false), "Circulant");
        assert_eq!(suggest_extractor(10_000_000, false, true), "Circulant");
        assert_eq!(suggest_extractor(10_000_000, false, false), "Trevisan");
    }
}
