use grid_util::point::Point;

/// Straight-line estimate between two cells, used both as step cost and as heuristic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Metric {
    /// `sqrt(dx² + dy²)`.
    #[default]
    Euclidean,
    /// `sqrt(dx² · dy²)`. Collapses to zero for cells sharing a row or column, which makes
    /// straight moves free. Kept to reproduce paths produced by older tools.
    Product,
}

impl Metric {
    pub fn distance(&self, p1: &Point, p2: &Point) -> f32 {
        let dx = (p1.x - p2.x) as i64;
        let dy = (p1.y - p2.y) as i64;
        match self {
            Metric::Euclidean => ((dx * dx + dy * dy) as f64).sqrt() as f32,
            Metric::Product => ((dx * dx * dy * dy) as f64).sqrt() as f32,
        }
    }
}
