//! # node_astar
//!
//! Shortest paths on a fixed-size grid using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm). Every cell is connected to its
//! (up to) eight surrounding cells; cells can be toggled into obstacles between solves.
//!
//! A [NodeGrid] is built once and keeps its topology for its whole lifetime. A
//! [GridSolver](solver::GridSolver) resets the per-cell search state, runs the search and
//! leaves a chain of parent links from the end back to the start, which can be read with
//! [NodeGrid::path_to]. Connected components are tracked to avoid flood-filling the grid
//! when the end cannot be reached at all.
mod astar_search;
pub mod distance;
pub mod node_grid;
pub mod planner;
pub mod solver;

pub use distance::Metric;
pub use node_grid::{Node, NodeGrid, SearchState};
pub use planner::Planner;
pub use solver::{
    astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver, OpenListKind, SearchOutcome,
    SearchSettings,
};

/// Number of expansions after which a search is given up.
pub const MAX_TRIES: usize = 10_000;
/// Inline capacity of neighbour lists; a cell never has more than eight neighbours.
pub const N_SMALLVEC_SIZE: usize = 8;
