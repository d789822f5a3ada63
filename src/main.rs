use std::{path::PathBuf, time::Duration};

use clap::Parser;

use pitsweeper::{
    grid::{Maze, Mission},
    io,
};

/// Play a Pitsweeper mission with the inference agent.
#[derive(Parser)]
struct Args {
    /// Maze file; a built-in demo maze is played when omitted
    maze: Option<PathBuf>,

    /// Milliseconds to pause between moves
    #[arg(long, default_value_t = 0)]
    tick: u64,

    /// Print both maze views after every move
    #[arg(short, long)]
    verbose: bool,
}

const DEMO_MAZE: [&str; 7] = [
    "XXXXXX",
    "X...GX",
    "X..PPX",
    "X....X",
    "X..P.X",
    "X@...X",
    "XXXXXX",
];

fn main() {
    let args = Args::parse();

    let rows: Vec<String> = match &args.maze {
        Some(path) => {
            let mut file = std::fs::File::open(path).unwrap();
            io::read_maze(&mut file)
        }
        None => DEMO_MAZE.iter().map(|row| row.to_string()).collect(),
    };

    let mut mission = Mission::new(Maze::parse(&rows))
        .with_tick(Duration::from_millis(args.tick))
        .with_verbose(args.verbose);

    let outcome = mission.run();
    io::write_outcome(&mut std::io::stdout(), &outcome);
}
