use grid_util::grid::Grid;
use grid_util::point::Point;
use node_astar::{AstarSolver, NodeGrid, Planner};

// Replays a series of edits on a 32x25 grid, the way an interactive front end would drive the
// planner: obstacles are toggled and the start and end are moved, each edit re-solving the path.

const MAP_WIDTH: usize = 32;
const MAP_HEIGHT: usize = 25;

fn main() {
    let grid = NodeGrid::new(MAP_WIDTH, MAP_HEIGHT, false);
    let mut planner = Planner::new(grid, AstarSolver::new(), Point::new(5, 5), Point::new(22, 18));
    println!("{}", planner);

    // A wall with a single gap at the bottom
    for y in 0..MAP_HEIGHT as i32 - 1 {
        planner.toggle_obstacle(Point::new(14, y));
    }
    println!("{}", planner);

    // Closing the gap cuts the grid in two
    let solved = planner.toggle_obstacle(Point::new(14, MAP_HEIGHT as i32 - 1));
    println!("{}solved: {}\n", planner, solved);

    planner.set_end(Point::new(2, 20));
    println!("{}", planner);

    planner.set_start(Point::new(30, 1));
    println!("{}solved: {}", planner, planner.solved());
    println!("{} obstacles", planner.grid.nodes().iter().filter(|n| n.obstacle).count());
}
