use std::collections::BTreeSet;

use crate::types::{manhattan, Loc};

/// Extra distance charged to a frontier tile whose safety is undetermined.
const RISK_PENALTY: usize = 4;
/// Extra distance charged to a tile known to hold a pit, matching the pit
/// step cost, so known pits are entered only when every detour is dearer.
const PIT_PENALTY: usize = 20;

/// Picks the next target along the frontier: the goal itself if reachable,
/// otherwise the location with the lowest penalized Manhattan distance to
/// the goal. Ties go to the lowest coordinate, which keeps runs
/// deterministic. `None` only when the frontier is exhausted.
pub(super) fn next_move(
    goal: Loc,
    frontier: &BTreeSet<Loc>,
    safe_tiles: &BTreeSet<Loc>,
    pit_tiles: &BTreeSet<Loc>,
) -> Option<Loc> {
    if frontier.contains(&goal) {
        return Some(goal);
    }

    frontier.iter().copied().min_by_key(|loc| {
        let penalty = if safe_tiles.contains(loc) {
            0
        } else if pit_tiles.contains(loc) {
            PIT_PENALTY
        } else {
            RISK_PENALTY
        };
        manhattan(*loc, goal) + penalty
    })
}
