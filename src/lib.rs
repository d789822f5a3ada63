pub mod agent;
pub mod grid;
pub mod io;
pub mod logic;
pub mod types;
