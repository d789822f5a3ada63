/// Grid coordinate as a (column, row) pair.
pub type Loc = (usize, usize);

pub fn manhattan(a: Loc, b: Loc) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// What the agent perceives on the tile it currently stands on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    /// No cardinally adjacent pits.
    Safe,
    /// 1..=4 cardinally adjacent pits.
    Warning(u8),
    Pit,
    Goal,
}

#[derive(Clone, Copy, Debug)]
pub struct Perception {
    pub loc: Loc,
    pub tile: Tile,
}

/// Tri-state answer to "is this location safe to step on?".
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Safety {
    Safe,
    Pit,
    Unknown,
}

pub struct Outcome {
    pub score: i32,
    pub reached_goal: bool,
    pub moves: usize,
}
