//! The search core shared by every [GridSolver]. Cell state lives in the [NodeGrid] itself, so a
//! search is a walk over indices: reset, seed the open list with the start, and keep expanding
//! the open cell with the lowest global goal until the end is expanded, the open list runs dry
//! or the expansion budget is spent.
use crate::node_grid::{Node, NodeGrid};
use crate::solver::{GridSolver, OpenListKind, SearchOutcome};
use grid_util::point::Point;
use log::{debug, info, warn};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::time::Instant;

pub(crate) trait OpenList {
    fn seed(&mut self, index: usize, nodes: &[Node]);
    /// Offers a neighbour of the cell being expanded. `improved` tells whether its goals were
    /// just lowered.
    fn offer(&mut self, index: usize, nodes: &[Node], improved: bool);
    /// The next cell to expand, or [None] if nothing is left.
    fn next(&mut self, nodes: &[Node]) -> Option<usize>;
    fn is_empty(&self) -> bool;
}

/// Re-sorted on every expansion using the live global goals, so entries never go stale in
/// order, only in being visited already.
#[derive(Default)]
pub(crate) struct SortedOpenList {
    entries: VecDeque<usize>,
}

impl OpenList for SortedOpenList {
    fn seed(&mut self, index: usize, _nodes: &[Node]) {
        self.entries.push_back(index);
    }

    fn offer(&mut self, index: usize, nodes: &[Node], _improved: bool) {
        let node = &nodes[index];
        if !node.state.visited && !node.obstacle {
            self.entries.push_back(index);
        }
    }

    fn next(&mut self, nodes: &[Node]) -> Option<usize> {
        // sort_by is stable, equal goals keep insertion order
        self.entries.make_contiguous().sort_by(|&a, &b| {
            nodes[a]
                .state
                .global_goal
                .total_cmp(&nodes[b].state.global_goal)
        });
        if self
            .entries
            .front()
            .is_some_and(|&ix| nodes[ix].state.visited)
        {
            self.entries.pop_front();
        }
        self.entries.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct SmallestCostHolder {
    estimated_cost: f32,
    order: usize,
    index: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: smallest estimate first, then earliest insertion
        match other.estimated_cost.total_cmp(&self.estimated_cost) {
            Ordering::Equal => other.order.cmp(&self.order),
            s => s,
        }
    }
}

#[derive(Default)]
pub(crate) struct HeapOpenList {
    to_see: BinaryHeap<SmallestCostHolder>,
    pushed: usize,
}

impl HeapOpenList {
    fn push(&mut self, index: usize, estimated_cost: f32) {
        self.to_see.push(SmallestCostHolder {
            estimated_cost,
            order: self.pushed,
            index,
        });
        self.pushed += 1;
    }
}

impl OpenList for HeapOpenList {
    fn seed(&mut self, index: usize, nodes: &[Node]) {
        self.push(index, nodes[index].state.global_goal);
    }

    fn offer(&mut self, index: usize, nodes: &[Node], improved: bool) {
        // Every drop in goal pushes a fresh entry, so an unvisited free cell always has one
        // carrying its current goal.
        let node = &nodes[index];
        if improved && !node.state.visited && !node.obstacle {
            self.push(index, node.state.global_goal);
        }
    }

    fn next(&mut self, nodes: &[Node]) -> Option<usize> {
        while let Some(SmallestCostHolder { index, .. }) = self.to_see.pop() {
            if !nodes[index].state.visited {
                return Some(index);
            }
        }
        None
    }

    fn is_empty(&self) -> bool {
        self.to_see.is_empty()
    }
}

pub(crate) fn search<S>(solver: &S, grid: &mut NodeGrid, start: Point, end: Point) -> SearchOutcome
where
    S: GridSolver + ?Sized,
{
    let settings = solver.settings();
    let Some(start_ix) = grid.index_of(&start) else {
        panic!("start {} lies outside the grid", start);
    };
    let Some(end_ix) = grid.index_of(&end) else {
        panic!("end {} lies outside the grid", end);
    };
    let start_time = Instant::now();
    grid.reset_search_state();

    if settings.prune_unreachable {
        grid.update();
        if grid.unreachable(&start, &end) {
            info!("{} is not reachable from {}", end, start);
            return SearchOutcome::Unreachable;
        }
    }

    let outcome = match settings.open_list {
        OpenListKind::Sorted => run(solver, grid, start_ix, end_ix, SortedOpenList::default()),
        OpenListKind::Heap => run(solver, grid, start_ix, end_ix, HeapOpenList::default()),
    };
    match outcome {
        SearchOutcome::Aborted { .. } => warn!(
            "Aborted search from {} to {}: no solution after {} tries",
            start, end, settings.max_tries
        ),
        SearchOutcome::Exhausted { expansions } => {
            info!("{} cannot be reached from {} ({} expansions)", end, start, expansions)
        }
        _ => {}
    }
    debug!(
        "astar took {} us, {} expansions",
        start_time.elapsed().as_micros(),
        outcome.expansions()
    );
    outcome
}

fn run<S, L>(
    solver: &S,
    grid: &mut NodeGrid,
    start_ix: usize,
    end_ix: usize,
    mut open: L,
) -> SearchOutcome
where
    S: GridSolver + ?Sized,
    L: OpenList,
{
    let settings = solver.settings();
    let end = grid.nodes[end_ix].position;
    {
        let start = &mut grid.nodes[start_ix];
        start.state.local_goal = 0.0;
        start.state.global_goal = solver.heuristic(&start.position, &end);
    }
    // The start is seeded unconditionally, even when it is an obstacle itself
    open.seed(start_ix, &grid.nodes);

    let mut current = start_ix;
    let mut tries = 0;
    while !open.is_empty() && current != end_ix {
        let Some(next) = open.next(&grid.nodes) else {
            break;
        };
        current = next;
        grid.nodes[current].state.visited = true;

        let current_local = grid.nodes[current].state.local_goal;
        let current_pos = grid.nodes[current].position;
        let neighbours = grid.nodes[current].neighbours.clone();
        for nb in neighbours {
            let node = &mut grid.nodes[nb];
            let mut improved = false;
            if !node.obstacle || settings.relax_obstacles {
                let candidate = current_local + solver.cost(&current_pos, &node.position);
                if candidate < node.state.local_goal {
                    node.state.parent = Some(current);
                    node.state.local_goal = candidate;
                    node.state.global_goal = candidate + solver.heuristic(&node.position, &end);
                    improved = true;
                }
            }
            open.offer(nb, &grid.nodes, improved);
        }

        tries += 1;
        if tries > settings.max_tries {
            return SearchOutcome::Aborted { expansions: tries };
        }
    }

    if current == end_ix {
        SearchOutcome::Found { expansions: tries }
    } else {
        SearchOutcome::Exhausted { expansions: tries }
    }
}
