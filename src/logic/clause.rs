use std::collections::BTreeMap;

use crate::types::Loc;

/// A disjunction of signed positional propositions, each of the form
/// "location L holds a pit". The map value is the polarity: `true` asserts
/// the pit, `false` negates it. Clauses are immutable once constructed; all
/// deduplication and tautology reduction happens in [`Clause::new`].
///
/// A clause that contains some proposition both positively and negatively is
/// *valid* (vacuously true) and stores no propositions at all, so every
/// tautology compares equal. A clause with no propositions that is not valid
/// is the empty clause, i.e. a contradiction.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Clause {
    props: BTreeMap<Loc, bool>,
    valid: bool,
}

impl Clause {
    pub fn new(props: impl IntoIterator<Item = (Loc, bool)>) -> Self {
        let mut map = BTreeMap::new();
        let mut valid = false;

        for (loc, polarity) in props {
            match map.insert(loc, polarity) {
                Some(stored) if stored != polarity => valid = true,
                _ => (),
            }
        }

        if valid {
            // a valid clause asserts no constraint
            map.clear();
        }

        Self { props: map, valid }
    }

    /// Single signed fact about one location.
    pub fn unit(loc: Loc, is_pit: bool) -> Self {
        Self::new([(loc, is_pit)])
    }

    /// Polarity of the proposition about `loc`, if present.
    pub fn get(&self, loc: Loc) -> Option<bool> {
        self.props.get(&loc).copied()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The contradiction clause: no propositions and not valid.
    pub fn is_empty(&self) -> bool {
        !self.valid && self.props.is_empty()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Loc, bool)> + '_ {
        self.props.iter().map(|(&loc, &polarity)| (loc, polarity))
    }

    /// Every polarity flipped; used to form refutation queries.
    pub fn negated(&self) -> Self {
        Self {
            props: self
                .props
                .iter()
                .map(|(&loc, &polarity)| (loc, !polarity))
                .collect(),
            valid: self.valid,
        }
    }

    /// Resolution of two clauses. Defined only when exactly one proposition
    /// appears in both with opposite polarity; the resolvent is the union of
    /// the remaining propositions, which may itself be the empty clause.
    /// Two or more complementary propositions would conflate unrelated
    /// inferences into one step, so such pairs do not resolve at all.
    pub fn resolve(c1: &Clause, c2: &Clause) -> Option<Clause> {
        let mut complements = c1
            .iter()
            .filter(|&(loc, polarity)| c2.get(loc) == Some(!polarity))
            .map(|(loc, _)| loc);

        let pivot = complements.next()?;
        if complements.next().is_some() {
            return None;
        }

        let merged = c1
            .iter()
            .chain(c2.iter())
            .filter(|&(loc, _)| loc != pivot);
        Some(Clause::new(merged))
    }
}

#[cfg(test)]
mod tests {
    use super::Clause;

    #[test]
    fn construction_dedups() {
        let clause = Clause::new([((1, 1), true), ((1, 1), true), ((2, 1), false)]);
        assert!(!clause.is_valid());
        assert_eq!(clause.len(), 2);
        assert_eq!(clause.get((1, 1)), Some(true));
        assert_eq!(clause.get((2, 1)), Some(false));
        assert_eq!(clause.get((3, 1)), None);
    }

    #[test]
    fn construction_detects_tautology() {
        let clause = Clause::new([((1, 1), true), ((1, 1), false), ((2, 1), true)]);
        assert!(clause.is_valid());
        assert!(!clause.is_empty());
        assert_eq!(clause.len(), 0);

        // all tautologies compare equal
        let other = Clause::new([((5, 5), false), ((5, 5), true)]);
        assert_eq!(clause, other);
    }

    #[test]
    fn empty_clause_is_contradiction() {
        let clause = Clause::new([]);
        assert!(clause.is_empty());
        assert!(!clause.is_valid());
    }

    #[test]
    fn equality_ignores_input_order() {
        let c1 = Clause::new([((1, 1), true), ((2, 1), false)]);
        let c2 = Clause::new([((2, 1), false), ((1, 1), true)]);
        assert_eq!(c1, c2);

        let mut set = std::collections::HashSet::new();
        set.insert(c1);
        assert!(!set.insert(c2));
    }

    #[test]
    fn resolve_complementary_units_to_empty() {
        let c1 = Clause::unit((1, 1), true);
        let c2 = Clause::unit((1, 1), false);
        let resolvent = Clause::resolve(&c1, &c2).unwrap();
        assert!(resolvent.is_empty());
    }

    #[test]
    fn resolve_without_complement_yields_nothing() {
        let c1 = Clause::new([((1, 1), true), ((2, 1), true)]);
        let c2 = Clause::new([((1, 1), true), ((3, 1), false)]);
        assert!(Clause::resolve(&c1, &c2).is_none());
    }

    #[test]
    fn resolve_refuses_double_complement() {
        let c1 = Clause::new([((1, 1), true), ((2, 1), true)]);
        let c2 = Clause::new([((1, 1), false), ((2, 1), false)]);
        assert!(Clause::resolve(&c1, &c2).is_none());
    }

    #[test]
    fn resolvent_unions_remaining_props() {
        let c1 = Clause::new([((1, 1), true), ((2, 1), true)]);
        let c2 = Clause::new([((1, 1), false), ((3, 1), false)]);
        let resolvent = Clause::resolve(&c1, &c2).unwrap();
        let expected = Clause::new([((2, 1), true), ((3, 1), false)]);
        assert_eq!(resolvent, expected);
    }

    #[test]
    fn negated_flips_every_polarity() {
        let clause = Clause::new([((1, 1), true), ((2, 1), false)]);
        let negated = clause.negated();
        assert_eq!(negated.get((1, 1)), Some(false));
        assert_eq!(negated.get((2, 1)), Some(true));
    }
}
