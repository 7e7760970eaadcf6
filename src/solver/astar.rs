use grid_util::point::Point;

use crate::{
    distance::Metric,
    solver::{GridSolver, SearchSettings},
};

#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub metric: Metric,
    /// Scales the heuristic; values above 1.0 give Weighted A*, which expands fewer cells but
    /// may return longer paths.
    pub heuristic_factor: f32,
    pub settings: SearchSettings,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            metric: Metric::default(),
            heuristic_factor: 1.0,
            settings: SearchSettings::default(),
        }
    }
    pub fn with_metric(metric: Metric) -> AstarSolver {
        AstarSolver {
            metric,
            ..AstarSolver::new()
        }
    }
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl GridSolver for AstarSolver {
    fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    fn cost(&self, p1: &Point, p2: &Point) -> f32 {
        self.metric.distance(p1, p2)
    }

    /// Just the cost times a heuristic factor.
    fn heuristic(&self, p1: &Point, p2: &Point) -> f32 {
        self.cost(p1, p2) * self.heuristic_factor
    }
}

#[cfg(test)]
mod tests {
    use grid_util::grid::Grid;
    use itertools::Itertools;

    use super::*;
    use crate::{node_grid::NodeGrid, solver::OpenListKind, MAX_TRIES};

    fn solvers() -> Vec<AstarSolver> {
        [OpenListKind::Sorted, OpenListKind::Heap]
            .into_iter()
            .map(|open_list| {
                let mut solver = AstarSolver::new();
                solver.settings.open_list = open_list;
                solver
            })
            .collect()
    }

    fn assert_valid_path(grid: &NodeGrid, path: &[Point], start: Point, end: Point) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        for (a, b) in path.iter().tuple_windows() {
            assert!(grid.neighbours(a).any(|n| n == *b), "{} -> {} is not a step", a, b);
            assert!(!grid.is_obstacle(b));
        }
        assert!(path.iter().all_unique());
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        for solver in solvers() {
            let mut grid = NodeGrid::new(5, 5, false);
            let start = Point::new(2, 3);
            assert!(solver.solve(&mut grid, start, start));
            assert_eq!(grid.parent(&start), None);
            assert_eq!(grid.path_to(&start), vec![start]);
        }
    }

    /// On an open grid the corner to corner path is four diagonal steps.
    #[test]
    fn open_grid_diagonal() {
        for solver in solvers() {
            let mut grid = NodeGrid::new(5, 5, false);
            let start = Point::new(0, 0);
            let end = Point::new(4, 4);
            let path = solver.get_path_single_goal(&mut grid, start, end).unwrap();
            assert_eq!(path.len() - 1, 4);
            assert_valid_path(&grid, &path, start, end);
            let expected = 4.0 * std::f32::consts::SQRT_2;
            assert!((solver.get_path_cost(&path) - expected).abs() < 1e-4);
        }
    }

    /// Asserts that the optimal route around a single obstacle is found. Diagonal steps may pass
    /// the corners of obstacles.
    #[test]
    fn solve_simple_problem() {
        //  ___
        // |S  |
        // | # |
        // |  E|
        //  ___
        for solver in solvers() {
            let mut grid = NodeGrid::new(3, 3, false);
            grid.set(1, 1, true);
            let start = Point::new(0, 0);
            let end = Point::new(2, 2);
            let path = solver.get_path_single_goal(&mut grid, start, end).unwrap();
            assert_eq!(path.len(), 4);
            assert_valid_path(&grid, &path, start, end);
            assert!((solver.get_path_cost(&path) - (2.0 + 2f32.sqrt())).abs() < 1e-4);
        }
    }

    /// A full wall in column 2 separates the grid; opening one cell lets the search detour.
    #[test]
    fn wall_with_gap() {
        for solver in solvers() {
            for prune in [true, false] {
                let mut solver = solver.clone();
                solver.settings.prune_unreachable = prune;
                let mut grid = NodeGrid::new(5, 5, false);
                for y in 0..5 {
                    grid.set(2, y, true);
                }
                let start = Point::new(0, 0);
                let end = Point::new(4, 4);
                assert!(!solver.solve(&mut grid, start, end));

                grid.set(2, 4, false);
                let path = solver.get_path_single_goal(&mut grid, start, end).unwrap();
                assert_valid_path(&grid, &path, start, end);
                assert!(path.contains(&Point::new(2, 4)));
            }
        }
    }

    /// Walling in the end makes the search fail, whether or not components are consulted.
    #[test]
    fn enclosed_end() {
        for solver in solvers() {
            for prune in [true, false] {
                let mut solver = solver.clone();
                solver.settings.prune_unreachable = prune;
                let mut grid = NodeGrid::new(7, 7, false);
                let end = Point::new(4, 4);
                let ring = grid.neighbours(&end).collect::<Vec<_>>();
                for p in ring {
                    grid.set_point(p, true);
                }
                let outcome = solver.search(&mut grid, Point::new(0, 0), end);
                assert!(!outcome.is_found());
                if prune {
                    assert_eq!(outcome, crate::SearchOutcome::Unreachable);
                } else {
                    assert!(matches!(outcome, crate::SearchOutcome::Exhausted { .. }));
                }
            }
        }
    }

    /// Solving twice without changes yields the same parent chain.
    #[test]
    fn idempotent() {
        for solver in solvers() {
            let mut grid = NodeGrid::new(10, 8, false);
            for y in 1..8 {
                grid.set(4, y, true);
            }
            grid.set(7, 3, true);
            let start = Point::new(1, 6);
            let end = Point::new(8, 2);
            let first = solver.get_path_single_goal(&mut grid, start, end).unwrap();
            let states = grid.nodes().iter().map(|n| *n.state()).collect::<Vec<_>>();
            let second = solver.get_path_single_goal(&mut grid, start, end).unwrap();
            assert_eq!(first, second);
            assert!(grid.nodes().iter().map(|n| *n.state()).eq(states));
        }
    }

    /// A tight budget aborts; a larger one finds the optimal path.
    #[test]
    fn budget_monotonic() {
        for solver in solvers() {
            let mut grid = NodeGrid::new(12, 12, false);
            for x in 0..11 {
                grid.set(x, 6, true);
            }
            let start = Point::new(0, 0);
            let end = Point::new(0, 11);
            let mut tight = solver.clone();
            tight.settings.max_tries = 3;
            let outcome = tight.search(&mut grid, start, end);
            assert_eq!(outcome, crate::SearchOutcome::Aborted { expansions: 4 });

            let mut best = f32::INFINITY;
            for max_tries in [50, 200, MAX_TRIES] {
                let mut solver = solver.clone();
                solver.settings.max_tries = max_tries;
                if let Some(path) = solver.get_path_single_goal(&mut grid, start, end) {
                    assert_valid_path(&grid, &path, start, end);
                    let cost = solver.get_path_cost(&path);
                    assert!(cost <= best + 1e-4);
                    best = cost;
                }
            }
            assert!(best.is_finite());
        }
    }

    /// Obstacle cells only pick up a parent when obstacle relaxation is switched on.
    #[test]
    fn obstacle_relaxation() {
        for relax in [false, true] {
            let mut solver = AstarSolver::new();
            solver.settings.relax_obstacles = relax;
            solver.settings.prune_unreachable = false;
            let mut grid = NodeGrid::new(3, 1, false);
            grid.set(1, 0, true);
            let start = Point::new(0, 0);
            let end = Point::new(1, 0);
            assert!(!solver.solve(&mut grid, start, end));
            let expected = if relax { Some(start) } else { None };
            assert_eq!(grid.parent(&end), expected);
            assert!(!grid.node(&end).state().visited);
        }
    }

    /// Straight moves are free under the product metric, yet the search still succeeds.
    #[test]
    fn product_metric() {
        for open_list in [OpenListKind::Sorted, OpenListKind::Heap] {
            let mut solver = AstarSolver::with_metric(Metric::Product);
            solver.settings.open_list = open_list;
            let mut grid = NodeGrid::new(5, 5, false);
            let start = Point::new(0, 0);
            let end = Point::new(4, 4);
            let path = solver.get_path_single_goal(&mut grid, start, end).unwrap();
            assert_valid_path(&grid, &path, start, end);
            assert!(solver.get_path_cost(&path) <= 4.0);
        }
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_end() {
        let mut grid = NodeGrid::new(3, 3, false);
        AstarSolver::new().solve(&mut grid, Point::new(0, 0), Point::new(3, 0));
    }

    #[test]
    fn weighted_heuristic_still_paths() {
        let mut solver = AstarSolver::new();
        solver.heuristic_factor = 1.5;
        let mut grid = NodeGrid::new(10, 10, false);
        for y in 2..10 {
            grid.set(5, y, true);
        }
        let start = Point::new(1, 8);
        let end = Point::new(8, 8);
        let path = solver.get_path_single_goal(&mut grid, start, end).unwrap();
        assert_valid_path(&grid, &path, start, end);
    }
}
