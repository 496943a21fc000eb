//! Solver for the turntable puzzle: a ring of small disks, one of them
//! blank, sits under a fixed ring of labelled large disks. The blank may
//! swap with its neighbour or with the disk as many places away as the
//! label it uncovers, and the goal is the sorted arrangement up to rotation.

pub mod error;
pub mod goal;
pub mod heuristic;
pub mod input;
pub mod puzzle;
pub mod render;
pub mod search;

pub use error::{PuzzleError, Result};
pub use goal::GoalPattern;
pub use heuristic::{Heuristic, RunBreaks, Uninformed};
pub use puzzle::{Move, Ring, Side};
pub use search::{astar, solve, SearchLimits, SearchNode, SearchOutcome, SearchResult, SearchStats};
