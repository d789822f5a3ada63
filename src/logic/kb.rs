use std::collections::{BTreeSet, HashSet};

use crate::types::Loc;

use super::Clause;

/// A conjunctive-normal-form knowledge base: a set of clauses, implicitly
/// conjoined. `tell` performs no consistency check; callers that assert
/// directly contradictory facts get vacuously-true answers from then on.
#[derive(Clone, Default, Debug)]
pub struct KnowledgeBase {
    clauses: HashSet<Clause>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the clause to the stored set. Idempotent.
    pub fn tell(&mut self, clause: Clause) {
        self.clauses.insert(clause);
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether the KB entails `query`, by refutation: assume the negation,
    /// close the clause set under pairwise resolution, and report true iff
    /// the empty clause is derived. Exhaustive and unoptimized; tolerable
    /// only because `simplify` keeps the clause set small.
    pub fn ask(&self, query: &Clause) -> bool {
        let mut clauses = self.clauses.clone();
        clauses.insert(query.negated());

        loop {
            let list: Vec<&Clause> = clauses.iter().collect();
            let mut fresh = HashSet::new();

            for (i, c1) in list.iter().enumerate() {
                for c2 in &list[i + 1..] {
                    let Some(resolvent) = Clause::resolve(c1, c2) else {
                        continue;
                    };
                    if resolvent.is_empty() {
                        return true;
                    }
                    if !resolvent.is_valid() {
                        fresh.insert(resolvent);
                    }
                }
            }

            if fresh.is_subset(&clauses) {
                // fixpoint, no contradiction derivable
                return false;
            }
            clauses.extend(fresh);
        }
    }

    /// Folds every known pit/safe fact into the stored clauses, unit
    /// propagation style: clauses that agree with a fact are subsumed and
    /// dropped, clauses that mention its negation are resolved against the
    /// synthetic unit fact, unit clauses are left as they are. Must be
    /// called whenever a new certain fact is learned; `ask` cost grows
    /// rapidly with clause count and width otherwise.
    pub fn simplify(&mut self, known_pits: &BTreeSet<Loc>, known_safe: &BTreeSet<Loc>) {
        for &loc in known_pits.union(known_safe) {
            self.fold_in(loc, known_pits.contains(&loc));
        }
    }

    fn fold_in(&mut self, loc: Loc, is_pit: bool) {
        let fact = Clause::unit(loc, is_pit);
        let old = std::mem::take(&mut self.clauses);

        for clause in old {
            if clause.len() == 1 {
                self.clauses.insert(clause);
                continue;
            }
            match clause.get(loc) {
                // subsumed: already true given the fact
                Some(polarity) if polarity == is_pit => (),
                Some(_) => {
                    if let Some(resolvent) = Clause::resolve(&clause, &fact) {
                        if !resolvent.is_valid() {
                            self.clauses.insert(resolvent);
                        }
                    }
                }
                None => {
                    self.clauses.insert(clause);
                }
            }
        }
    }
}
