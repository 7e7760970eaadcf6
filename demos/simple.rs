use grid_util::grid::Grid;
use grid_util::point::Point;
use node_astar::{AstarSolver, GridSolver, NodeGrid};

// In this example a path is found on a 5x5 grid with shape
//  _____
// |S    |
// |  #  |
// |  #  |
// |  #  |
// |  # E|
//  _____
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have an 8-neighborhood

fn main() {
    let mut grid = NodeGrid::new(5, 5, false);
    for y in 1..5 {
        grid.set(2, y, true);
    }
    println!("{}", grid);
    let solver = AstarSolver::new();
    let start = Point::new(0, 0);
    let end = Point::new(4, 4);
    match solver.get_path_single_goal(&mut grid, start, end) {
        Some(path) => {
            println!("Path (cost {:.3}):", solver.get_path_cost(&path));
            for p in path {
                println!("{:?}", p);
            }
        }
        None => println!("No path from {} to {}", start, end),
    }
}
