use core::fmt;
use grid_util::grid::Grid;
use grid_util::point::Point;
use log::{info, warn};

use crate::{node_grid::NodeGrid, solver::GridSolver};

/// Keeps a grid, a solver and the current start and end together, and re-solves after every
/// edit so the parent links in the grid always describe the current configuration.
#[derive(Clone, Debug)]
pub struct Planner<S: GridSolver> {
    pub grid: NodeGrid,
    pub solver: S,
    start: Point,
    end: Point,
    solved: bool,
}

impl<S: GridSolver> Planner<S> {
    /// Panics if `start` or `end` lies outside `grid`.
    pub fn new(grid: NodeGrid, solver: S, start: Point, end: Point) -> Planner<S> {
        let mut planner = Planner {
            grid,
            solver,
            start,
            end,
            solved: false,
        };
        planner.resolve();
        planner
    }

    pub fn start(&self) -> Point {
        self.start
    }
    pub fn end(&self) -> Point {
        self.end
    }
    /// Whether the last solve found a path.
    pub fn solved(&self) -> bool {
        self.solved
    }

    /// The current path from start to end, if there is one.
    pub fn path(&self) -> Option<Vec<Point>> {
        if self.solved {
            Some(self.grid.path_to(&self.end))
        } else {
            None
        }
    }

    pub fn toggle_obstacle(&mut self, point: Point) -> bool {
        let blocked = self.grid.toggle(&point);
        info!("{} is now {}", point, if blocked { "blocked" } else { "free" });
        self.resolve()
    }
    pub fn set_start(&mut self, point: Point) -> bool {
        self.start = point;
        self.resolve()
    }
    pub fn set_end(&mut self, point: Point) -> bool {
        self.end = point;
        self.resolve()
    }

    /// Solves again with the current grid, start and end.
    pub fn resolve(&mut self) -> bool {
        self.solved = self.solver.solve(&mut self.grid, self.start, self.end);
        if !self.solved {
            warn!("No path from {} to {}", self.start, self.end);
        }
        self.solved
    }
}

impl<S: GridSolver> fmt::Display for Planner<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let path = self.path().unwrap_or_default();
        for y in 0..self.grid.height() as i32 {
            let line: String = (0..self.grid.width() as i32)
                .map(|x| {
                    let p = Point::new(x, y);
                    if p == self.start {
                        'S'
                    } else if p == self.end {
                        'E'
                    } else if self.grid.is_obstacle(&p) {
                        '#'
                    } else if path.contains(&p) {
                        '*'
                    } else {
                        '.'
                    }
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
