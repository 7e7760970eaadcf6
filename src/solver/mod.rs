use crate::{astar_search::search, node_grid::NodeGrid, MAX_TRIES};
use grid_util::point::Point;

pub mod astar;
pub mod dijkstra;

/// How the set of discovered but unexpanded cells is kept in order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpenListKind {
    /// A list that is stably re-sorted by global goal before every expansion. Every unvisited
    /// free neighbour is appended, duplicates included, and ties go to the earliest insertion.
    #[default]
    Sorted,
    /// A binary heap keyed on global goal and insertion order. Cells are pushed whenever their
    /// goal improves and stale entries are skipped when popped.
    Heap,
}

/// Knobs shared by every solver.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchSettings {
    /// Expansions after which a search is aborted.
    pub max_tries: usize,
    /// Whether obstacle neighbours still receive cost and parent updates. They are never
    /// expanded either way.
    pub relax_obstacles: bool,
    /// Whether to consult the grid's connected components and skip searching for an end that
    /// cannot be reached.
    pub prune_unreachable: bool,
    pub open_list: OpenListKind,
}

impl Default for SearchSettings {
    fn default() -> SearchSettings {
        SearchSettings {
            max_tries: MAX_TRIES,
            relax_obstacles: false,
            prune_unreachable: true,
            open_list: OpenListKind::Sorted,
        }
    }
}

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The end was reached; its parent chain leads back to the start.
    Found { expansions: usize },
    /// The open list ran dry before the end was reached.
    Exhausted { expansions: usize },
    /// More than the allowed number of expansions was needed.
    Aborted { expansions: usize },
    /// The connected components showed the end cannot be reached, no search was run.
    Unreachable,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }
    pub fn expansions(&self) -> usize {
        match *self {
            SearchOutcome::Found { expansions }
            | SearchOutcome::Exhausted { expansions }
            | SearchOutcome::Aborted { expansions } => expansions,
            SearchOutcome::Unreachable => 0,
        }
    }
}

pub trait GridSolver {
    fn settings(&self) -> &SearchSettings;

    /// Cost of moving between two neighbouring cells.
    fn cost(&self, p1: &Point, p2: &Point) -> f32;

    /// Estimated remaining cost from `p1` to the end `p2`.
    fn heuristic(&self, p1: &Point, p2: &Point) -> f32;

    /// Runs a search from `start` to `end`, leaving the parent links in `grid`.
    ///
    /// Panics if either point lies outside the grid.
    fn search(&self, grid: &mut NodeGrid, start: Point, end: Point) -> SearchOutcome {
        search(self, grid, start, end)
    }

    /// Returns whether a path from `start` to `end` was found. On success the path can be read
    /// back with [NodeGrid::path_to]; on failure the parent links are unspecified.
    fn solve(&self, grid: &mut NodeGrid, start: Point, end: Point) -> bool {
        self.search(grid, start, end).is_found()
    }

    /// Solves and reads the path back, start first.
    fn get_path_single_goal(
        &self,
        grid: &mut NodeGrid,
        start: Point,
        end: Point,
    ) -> Option<Vec<Point>> {
        if self.solve(grid, start, end) {
            Some(grid.path_to(&end))
        } else {
            None
        }
    }

    fn get_path_cost(&self, path: &[Point]) -> f32 {
        path.windows(2).map(|w| self.cost(&w[0], &w[1])).sum()
    }
}
