use std::collections::BTreeSet;
use std::time::Duration;

use crate::agent::Agent;
use crate::types::{manhattan, Loc, Outcome, Perception, Safety, Tile};

/// Score floor at which a mission is abandoned.
pub const MIN_SCORE: i32 = -100;
/// Extra penalty for stepping into a pit.
pub const PIT_STEP_PENALTY: i32 = 20;

/// Read-only queries the inference agent may pose about the world. The
/// agent never holds a reference into mission internals; the maze is built
/// first and the agent second, with this view handed in between.
pub trait GridView {
    /// Up to four playable axis-aligned neighbors at the given offset.
    fn cardinal_locs(&self, loc: Loc, offset: usize) -> BTreeSet<Loc>;
    fn goal_loc(&self) -> Loc;
    /// Unexplored playable locations adjacent to explored territory.
    fn frontier_locs(&self) -> &BTreeSet<Loc>;
}

/// Static maze layout: everything that never changes during a mission.
pub struct Maze {
    cols: usize,
    rows: usize,
    playable: BTreeSet<Loc>,
    pits: BTreeSet<Loc>,
    goal: Loc,
    start: Loc,
}

impl Maze {
    /// Parses a maze from rows of `X` (wall), `P` (pit), `G` (goal), `@`
    /// (player start) and `.` (open floor). Warning numbers are derived
    /// from pit placement, never parsed. Panics on malformed input.
    pub fn parse(rows: &[impl AsRef<str>]) -> Self {
        assert!(!rows.is_empty(), "empty maze");
        let cols = rows[0].as_ref().chars().count();

        let mut playable = BTreeSet::new();
        let mut pits = BTreeSet::new();
        let mut goal = None;
        let mut start = None;

        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            assert_eq!(row.chars().count(), cols, "ragged maze row {r}");

            for (c, cell) in row.chars().enumerate() {
                let loc = (c, r);
                match cell {
                    'X' => continue,
                    '.' => (),
                    'P' => {
                        pits.insert(loc);
                    }
                    'G' => {
                        assert!(goal.is_none(), "more than one goal");
                        goal = Some(loc);
                    }
                    '@' => {
                        assert!(start.is_none(), "more than one player start");
                        start = Some(loc);
                    }
                    other => panic!("unknown maze cell {other:?} at {loc:?}"),
                }
                playable.insert(loc);
            }
        }

        Self {
            cols,
            rows: rows.len(),
            playable,
            pits,
            goal: goal.expect("maze has no goal"),
            start: start.expect("maze has no player start"),
        }
    }

    pub fn start_loc(&self) -> Loc {
        self.start
    }

    pub fn goal_loc(&self) -> Loc {
        self.goal
    }

    pub fn is_pit(&self, loc: Loc) -> bool {
        self.pits.contains(&loc)
    }

    pub fn cardinal_locs(&self, loc: Loc, offset: usize) -> BTreeSet<Loc> {
        let (c, r) = loc;
        let candidates = [
            (c.checked_add(offset), Some(r)),
            (c.checked_sub(offset), Some(r)),
            (Some(c), r.checked_add(offset)),
            (Some(c), r.checked_sub(offset)),
        ];

        candidates
            .into_iter()
            .filter_map(|(c, r)| Some((c?, r?)))
            .filter(|loc| self.playable.contains(loc))
            .collect()
    }

    /// What the agent perceives when standing on `loc`.
    pub fn tile(&self, loc: Loc) -> Tile {
        debug_assert!(self.playable.contains(&loc));
        if self.pits.contains(&loc) {
            Tile::Pit
        } else if loc == self.goal {
            Tile::Goal
        } else {
            match self.warning(loc) {
                0 => Tile::Safe,
                count => Tile::Warning(count),
            }
        }
    }

    fn warning(&self, loc: Loc) -> u8 {
        self.cardinal_locs(loc, 1).intersection(&self.pits).count() as u8
    }
}

/// Borrowed window over one tick's world state, handed to the agent.
struct View<'a> {
    maze: &'a Maze,
    frontier: &'a BTreeSet<Loc>,
}

impl GridView for View<'_> {
    fn cardinal_locs(&self, loc: Loc, offset: usize) -> BTreeSet<Loc> {
        self.maze.cardinal_locs(loc, offset)
    }

    fn goal_loc(&self) -> Loc {
        self.maze.goal_loc()
    }

    fn frontier_locs(&self) -> &BTreeSet<Loc> {
        self.frontier
    }
}

/// One play-through of a maze: the mutable world state plus the agent.
pub struct Mission {
    maze: Maze,
    agent: Agent,
    player: Loc,
    explored: BTreeSet<Loc>,
    frontier: BTreeSet<Loc>,
    score: i32,
    moves: usize,
    tick_length: Duration,
    verbose: bool,
}

impl Mission {
    /// Two-phase setup: the maze is complete before the agent sees it, and
    /// the agent processes the starting perception before any move is made.
    pub fn new(maze: Maze) -> Self {
        let start = maze.start_loc();
        let explored = BTreeSet::from([start]);
        let frontier = maze.cardinal_locs(start, 1);

        let view = View {
            maze: &maze,
            frontier: &frontier,
        };
        let mut agent = Agent::new(&view);
        let _ = agent.think(
            &view,
            Perception {
                loc: start,
                tile: maze.tile(start),
            },
        );

        Self {
            maze,
            agent,
            player: start,
            explored,
            frontier,
            score: 0,
            moves: 0,
            tick_length: Duration::ZERO,
            verbose: false,
        }
    }

    pub fn with_tick(mut self, tick_length: Duration) -> Self {
        self.tick_length = tick_length;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Runs ticks until the goal is reached, the score floor is hit, or the
    /// agent requests a move off the frontier (which forfeits the mission).
    pub fn run(&mut self) -> Outcome {
        if self.verbose {
            println!("{}", self.render());
        }

        while self.score > MIN_SCORE && self.player != self.maze.goal_loc() {
            if !self.tick_length.is_zero() {
                std::thread::sleep(self.tick_length);
            }

            let view = View {
                maze: &self.maze,
                frontier: &self.frontier,
            };
            let perception = Perception {
                loc: self.player,
                tile: self.maze.tile(self.player),
            };
            let request = self.agent.think(&view, perception);

            match request {
                Some(to) if self.frontier.contains(&to) => self.apply_move(to),
                // off-frontier or no move: forfeit
                _ => {
                    self.score = MIN_SCORE;
                    break;
                }
            }

            if self.verbose {
                println!("{}", self.render());
                println!("loc {:?}, score {}", self.player, self.score);
            }
        }

        Outcome {
            score: self.score,
            reached_goal: self.player == self.maze.goal_loc(),
            moves: self.moves,
        }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// Test hook: the agent's current belief about a location.
    pub fn safety_check(&self, loc: Loc) -> Safety {
        self.agent.safety(loc)
    }

    /// Test hook mirroring scripted play: forces the player to `to` without
    /// frontier validation and runs one deduction pass there.
    pub fn step_to(&mut self, to: Loc) {
        self.apply_move(to);

        let view = View {
            maze: &self.maze,
            frontier: &self.frontier,
        };
        let perception = Perception {
            loc: self.player,
            tile: self.maze.tile(self.player),
        };
        let _ = self.agent.think(&view, perception);
    }

    fn apply_move(&mut self, to: Loc) {
        let mut penalty = manhattan(self.player, to) as i32;
        if self.maze.is_pit(to) {
            penalty += PIT_STEP_PENALTY;
        }
        self.score -= penalty;
        self.moves += 1;

        self.player = to;
        self.explored.insert(to);
        self.frontier.extend(self.maze.cardinal_locs(to, 1));
        self.frontier.retain(|loc| !self.explored.contains(loc));
    }

    /// Omniscient maze and the agent's explored view, side by side.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for r in 0..self.maze.rows {
            for c in 0..self.maze.cols {
                out.push(self.true_cell((c, r)));
            }
            out.push('\t');
            for c in 0..self.maze.cols {
                out.push(self.agent_cell((c, r)));
            }
            out.push('\n');
        }
        out
    }

    fn true_cell(&self, loc: Loc) -> char {
        if loc == self.player {
            '@'
        } else if !self.maze.playable.contains(&loc) {
            'X'
        } else {
            tile_char(self.maze.tile(loc))
        }
    }

    fn agent_cell(&self, loc: Loc) -> char {
        if loc == self.player {
            '@'
        } else if !self.maze.playable.contains(&loc) {
            'X'
        } else if self.explored.contains(&loc) {
            tile_char(self.maze.tile(loc))
        } else {
            '?'
        }
    }
}

fn tile_char(tile: Tile) -> char {
    match tile {
        Tile::Safe => '.',
        Tile::Warning(count) => (b'0' + count) as char,
        Tile::Pit => 'P',
        Tile::Goal => 'G',
    }
}
