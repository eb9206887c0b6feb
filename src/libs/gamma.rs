//! Goodman-Kruskal style gamma index over domain order.

use std::collections::HashSet;

/// Ordered pairs `(seq[i], seq[j])` with `1 <= j - i < nbhood`.
///
/// A domain is never paired with itself, so the window starts at `i + 1`.
fn neighbor_pairs<S: AsRef<str>>(seq: &[S], nbhood: usize) -> HashSet<(&str, &str)> {
    let mut pairs = HashSet::new();
    for i in 0..seq.len() {
        for j in (i + 1)..seq.len().min(i + nbhood) {
            pairs.insert((seq[i].as_ref(), seq[j].as_ref()));
        }
    }
    pairs
}

/// Order conservation between two domain pseudo-sequences, in `[0, 1]`.
///
/// Pairs present in both neighborhoods with the same orientation are
/// concordant (`Ns`); a pair whose reverse is present in the other sequence is
/// discordant (`Nr`), once from each side. The result is `(1 + gamma) / 2`
/// with `gamma = |Nr - Ns| / (Nr + Ns)`, so both pure concordance and pure
/// discordance map to 1.
///
/// Sequences sharing fewer than two domain types carry no order information
/// and score 0.
///
/// ```
/// use bgcdist::libs::gamma::gamma_index;
/// let a = ["KS", "AT", "DH", "KR"];
/// assert_eq!(gamma_index(&a, &a, 3), 1.0);
/// assert_eq!(gamma_index(&a, &["KS"], 3), 0.0);
/// ```
pub fn gamma_index<A: AsRef<str>, B: AsRef<str>>(a: &[A], b: &[B], nbhood: usize) -> f64 {
    let types_a: HashSet<&str> = a.iter().map(|s| s.as_ref()).collect();
    let types_b: HashSet<&str> = b.iter().map(|s| s.as_ref()).collect();
    if types_a.intersection(&types_b).count() < 2 {
        return 0.0;
    }

    let pairs_a = neighbor_pairs(a, nbhood);
    let pairs_b = neighbor_pairs(b, nbhood);

    let mut ns = 0usize;
    let mut nr = 0usize;
    for &p in pairs_a.union(&pairs_b) {
        let rev = (p.1, p.0);
        let in_a = pairs_a.contains(&p);
        let in_b = pairs_b.contains(&p);
        if in_a && in_b {
            ns += 1;
        } else if (in_a && pairs_b.contains(&rev)) || (in_b && pairs_a.contains(&rev)) {
            nr += 1;
        }
    }

    let gamma = if nr + ns == 0 {
        0.0
    } else {
        (nr as f64 - ns as f64).abs() / (nr + ns) as f64
    };

    (1.0 + gamma) / 2.0
}

/// Strand-insensitive gamma: the better of `a` as read and `a` reversed.
pub fn order_conservation<A: AsRef<str>, B: AsRef<str>>(a: &[A], b: &[B], nbhood: usize) -> f64 {
    let forward = gamma_index(a, b, nbhood);
    let reversed: Vec<&str> = a.iter().rev().map(|s| s.as_ref()).collect();
    let backward = gamma_index(&reversed[..], b, nbhood);

    forward.max(backward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_neighbor_pairs() {
        let seq = ["A", "B", "C", "D"];
        let pairs = neighbor_pairs(&seq, 3);
        // (A,B) (A,C) (B,C) (B,D) (C,D)
        assert_eq!(pairs.len(), 5);
        assert!(pairs.contains(&("A", "C")));
        assert!(!pairs.contains(&("A", "D")));

        assert!(neighbor_pairs(&seq, 1).is_empty());
        assert_eq!(neighbor_pairs(&seq, 10).len(), 6);
    }

    #[test]
    fn test_identical_sequences() {
        let seq = ["KS", "AT", "KR", "ACP"];
        assert_abs_diff_eq!(gamma_index(&seq, &seq, 2), 1.0);
        assert_abs_diff_eq!(gamma_index(&seq, &seq, 3), 1.0);
    }

    #[test]
    fn test_reversed_sequences() {
        let a = ["KS", "AT", "KR"];
        let b = ["KR", "AT", "KS"];
        // every pair discordant
        assert_abs_diff_eq!(gamma_index(&a, &b, 3), 1.0);
        assert_abs_diff_eq!(order_conservation(&a, &b, 3), 1.0);
    }

    #[test]
    fn test_mixed_order() {
        // A: (X,Y) (X,Z) (Y,Z); B: (X,Z) (X,Y) (Z,Y)
        // Ns = 2, Nr = 2 ((Y,Z) and (Z,Y))
        let a = ["X", "Y", "Z"];
        let b = ["X", "Z", "Y"];
        assert_abs_diff_eq!(gamma_index(&a, &b, 3), 0.5);
    }

    #[test]
    fn test_no_shared_order() {
        // shared types too far apart to form a pair
        let a = ["X", "P", "Q", "Y"];
        let b = ["X", "R", "S", "Y"];
        assert_abs_diff_eq!(gamma_index(&a, &b, 2), 0.5);

        let c = ["X"];
        assert_eq!(gamma_index(&a, &c, 3), 0.0);
        let empty: [&str; 0] = [];
        assert_eq!(gamma_index(&empty, &empty, 3), 0.0);
    }

    #[test]
    fn test_bounded() {
        let a = ["A", "B", "A", "C", "B", "D"];
        let b = ["B", "A", "C", "D", "A"];
        for nbhood in 1..6 {
            let g = order_conservation(&a, &b, nbhood);
            assert!((0.0..=1.0).contains(&g));
        }
    }
}
