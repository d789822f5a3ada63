mod encode;
mod selector;

use std::collections::BTreeSet;

use crate::{
    grid::GridView,
    logic::{Clause, KnowledgeBase},
    types::{Loc, Perception, Safety, Tile},
};

/// The inference agent: accumulates warning-count knowledge in a resolution
/// KB and keeps three mutually exclusive certainty sets as a cache over it.
/// The sets are only ever populated from confirmed deductions; the KB stays
/// the single source of truth.
pub struct Agent {
    goal: Loc,
    kb: KnowledgeBase,
    pit_tiles: BTreeSet<Loc>,
    safe_tiles: BTreeSet<Loc>,
    possible_pits: BTreeSet<Loc>,
    visited: BTreeSet<Loc>,
}

impl Agent {
    pub fn new(view: &impl GridView) -> Self {
        let mut agent = Self {
            goal: view.goal_loc(),
            kb: KnowledgeBase::new(),
            pit_tiles: BTreeSet::new(),
            safe_tiles: BTreeSet::new(),
            possible_pits: BTreeSet::new(),
            visited: BTreeSet::new(),
        };

        // The goal tile never holds a pit, and a goal with a single way in
        // must have that neighbor clear or the maze would be unwinnable.
        agent.record_fact(agent.goal, false);
        let adjacent = view.cardinal_locs(agent.goal, 1);
        if adjacent.len() == 1 {
            for loc in adjacent {
                agent.record_fact(loc, false);
            }
        }

        agent
    }

    /// One tick: fold the perception into the KB, promote any newly-entailed
    /// frontier locations into the certainty sets, and pick the next target.
    /// `None` only when the frontier is exhausted.
    pub fn think(&mut self, view: &impl GridView, perception: Perception) -> Option<Loc> {
        let here = perception.loc;

        match perception.tile {
            Tile::Safe => {
                // zero adjacent pits clears every neighbor, no resolution needed
                self.record_fact(here, false);
                for loc in view.cardinal_locs(here, 1) {
                    self.record_fact(loc, false);
                }
            }
            Tile::Goal => self.record_fact(here, false),
            Tile::Pit => self.record_fact(here, true),
            Tile::Warning(count) => {
                self.deduce_from_warning(view, here, count);
                self.record_fact(here, false);
            }
        }
        self.visited.insert(here);

        self.promote_frontier(view);

        selector::next_move(
            self.goal,
            view.frontier_locs(),
            &self.safe_tiles,
            &self.pit_tiles,
        )
    }

    /// Tri-state safety of a location: the cached certainty sets first, then
    /// the two entailment queries. Both queries are posed even though at
    /// most one can hold in a consistent KB.
    pub fn safety(&self, loc: Loc) -> Safety {
        if self.safe_tiles.contains(&loc) {
            return Safety::Safe;
        }
        if self.pit_tiles.contains(&loc) {
            return Safety::Pit;
        }
        if self.kb.ask(&Clause::unit(loc, false)) {
            return Safety::Safe;
        }
        if self.kb.ask(&Clause::unit(loc, true)) {
            return Safety::Pit;
        }
        Safety::Unknown
    }

    /// Locations known for certain to hold pits.
    pub fn known_pits(&self) -> &BTreeSet<Loc> {
        &self.pit_tiles
    }

    /// Locations known for certain to be clear.
    pub fn known_safe(&self) -> &BTreeSet<Loc> {
        &self.safe_tiles
    }

    /// Translates a warning count into knowledge. Neighbors already known to
    /// be pits are discounted from the count first; the degenerate cases
    /// (nothing left, or everything left) settle directly, everything else
    /// goes through the exactly-k CNF encoding.
    fn deduce_from_warning(&mut self, view: &impl GridView, here: Loc, count: u8) {
        let neighbors = view.cardinal_locs(here, 1);
        let known_pits = neighbors
            .iter()
            .filter(|&loc| self.pit_tiles.contains(loc))
            .count();
        let candidates: Vec<Loc> = neighbors
            .into_iter()
            .filter(|loc| !self.pit_tiles.contains(loc) && !self.safe_tiles.contains(loc))
            .collect();
        let remaining = (count as usize).saturating_sub(known_pits);

        if remaining == 0 {
            // every pit in the warning is already accounted for
            for loc in candidates {
                self.record_fact(loc, false);
            }
        } else if remaining >= candidates.len() {
            for loc in candidates {
                self.record_fact(loc, true);
            }
        } else {
            self.possible_pits.extend(candidates.iter().copied());
            for clause in encode::exactly_k(&candidates, remaining) {
                self.kb.tell(clause);
            }
            self.kb.simplify(&self.pit_tiles, &self.safe_tiles);
        }
    }

    /// Re-queries every undetermined frontier location against the KB and
    /// promotes the ones whose safety is now entailed.
    fn promote_frontier(&mut self, view: &impl GridView) {
        let undetermined: Vec<Loc> = view
            .frontier_locs()
            .iter()
            .filter(|&loc| !self.safe_tiles.contains(loc) && !self.pit_tiles.contains(loc))
            .copied()
            .collect();

        for loc in undetermined {
            match self.safety(loc) {
                Safety::Safe => self.record_fact(loc, false),
                Safety::Pit => self.record_fact(loc, true),
                Safety::Unknown => (),
            }
        }
    }

    /// Commits a certain fact: tells the KB, moves the location into its
    /// certainty set, and simplifies. Pit and safe status are final for the
    /// mission, so re-learning a known fact is a no-op.
    fn record_fact(&mut self, loc: Loc, is_pit: bool) {
        self.possible_pits.remove(&loc);
        let newly_learnt = if is_pit {
            self.pit_tiles.insert(loc)
        } else {
            self.safe_tiles.insert(loc)
        };

        self.kb.tell(Clause::unit(loc, is_pit));
        if newly_learnt {
            self.kb.simplify(&self.pit_tiles, &self.safe_tiles);
        }
    }
}
