use crate::logic::Clause;
use crate::types::Loc;

/// CNF for "exactly `k` of `candidates` are pits", the uniform replacement
/// for per-count special casing:
/// - at least k: every subset of n-k+1 candidates contains a pit;
/// - at most k: every subset of k+1 candidates contains a non-pit.
///
/// For k=1 this degenerates to one at-least-one clause plus the pairwise
/// exclusions; for k=n it degenerates to n unit clauses.
pub(super) fn exactly_k(candidates: &[Loc], k: usize) -> Vec<Clause> {
    let n = candidates.len();
    debug_assert!(k >= 1 && k <= n);

    let mut clauses = vec![];

    for combo in combinations(candidates, n - k + 1) {
        clauses.push(Clause::new(combo.into_iter().map(|loc| (loc, true))));
    }
    for combo in combinations(candidates, k + 1) {
        clauses.push(Clause::new(combo.into_iter().map(|loc| (loc, false))));
    }

    clauses
}

fn combinations(items: &[Loc], size: usize) -> Vec<Vec<Loc>> {
    if size == 0 {
        return vec![vec![]];
    }
    if items.len() < size {
        return vec![];
    }

    let mut with_first = combinations(&items[1..], size - 1);
    for combo in &mut with_first {
        combo.push(items[0]);
    }

    with_first.extend(combinations(&items[1..], size));
    with_first
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::logic::{Clause, KnowledgeBase};

    use super::exactly_k;

    const A: (usize, usize) = (1, 1);
    const B: (usize, usize) = (2, 1);
    const C: (usize, usize) = (3, 1);
    const D: (usize, usize) = (4, 1);

    #[test]
    fn one_of_two() {
        let clauses = exactly_k(&[A, B], 1);
        assert_eq!(clauses.len(), 2);
        assert!(clauses.contains(&Clause::new([(A, true), (B, true)])));
        assert!(clauses.contains(&Clause::new([(A, false), (B, false)])));
    }

    #[test]
    fn one_of_four_counts() {
        // one at-least-one clause plus C(4,2) pairwise exclusions
        let clauses = exactly_k(&[A, B, C, D], 1);
        assert_eq!(clauses.len(), 1 + 6);
    }

    #[test]
    fn two_of_three() {
        let clauses = exactly_k(&[A, B, C], 2);
        assert_eq!(clauses.len(), 4);
        assert!(clauses.contains(&Clause::new([(A, true), (B, true)])));
        assert!(clauses.contains(&Clause::new([(A, true), (C, true)])));
        assert!(clauses.contains(&Clause::new([(B, true), (C, true)])));
        assert!(clauses.contains(&Clause::new([(A, false), (B, false), (C, false)])));
    }

    #[test]
    fn four_of_four_is_all_units() {
        let clauses = exactly_k(&[A, B, C, D], 4);
        assert_eq!(clauses.len(), 4);
        for loc in [A, B, C, D] {
            assert!(clauses.contains(&Clause::unit(loc, true)));
        }
    }

    #[test]
    fn encoding_supports_deduction() {
        // exactly one of {A, B, C}; learning !A and !B forces C
        let mut kb = KnowledgeBase::new();
        for clause in exactly_k(&[A, B, C], 1) {
            kb.tell(clause);
        }
        kb.tell(Clause::unit(A, false));
        kb.tell(Clause::unit(B, false));
        kb.simplify(&BTreeSet::new(), &BTreeSet::from([A, B]));

        assert!(kb.ask(&Clause::unit(C, true)));
    }
}
