use grid_util::point::Point;

use crate::{
    distance::Metric,
    solver::{GridSolver, SearchSettings},
};

/// Uninformed search: the heuristic is always zero, so cells are expanded purely by their cost
/// from the start.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver {
    pub metric: Metric,
    pub settings: SearchSettings,
}

impl GridSolver for DijkstraSolver {
    fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    fn cost(&self, p1: &Point, p2: &Point) -> f32 {
        self.metric.distance(p1, p2)
    }

    fn heuristic(&self, _: &Point, _: &Point) -> f32 {
        0.0
    }
}
