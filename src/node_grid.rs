use crate::N_SMALLVEC_SIZE;
use core::fmt;
use grid_util::grid::Grid;
use grid_util::point::Point;
use itertools::iproduct;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Per-search bookkeeping of a [Node]. Its [Default] is the state every cell is put back into
/// before a search starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchState {
    pub visited: bool,
    /// Best known cost from the start.
    pub local_goal: f32,
    /// `local_goal` plus the heuristic estimate to the end.
    pub global_goal: f32,
    /// Index of the cell this one was reached from.
    pub parent: Option<usize>,
}

impl Default for SearchState {
    fn default() -> SearchState {
        SearchState {
            visited: false,
            local_goal: f32::INFINITY,
            global_goal: f32::INFINITY,
            parent: None,
        }
    }
}

/// A single grid cell. Neighbours are stored as indices into the owning [NodeGrid] and are
/// fixed once the grid is built.
#[derive(Clone, Debug)]
pub struct Node {
    pub position: Point,
    pub obstacle: bool,
    pub(crate) neighbours: SmallVec<[usize; N_SMALLVEC_SIZE]>,
    pub(crate) state: SearchState,
}

impl Node {
    pub fn neighbours(&self) -> &[usize] {
        &self.neighbours
    }
    pub fn state(&self) -> &SearchState {
        &self.state
    }
}

/// [NodeGrid] owns every [Node] of a fixed-size grid, together with a [UnionFind] over the free
/// cells that is used to reject unreachable goals without searching. Blocking a cell can split
/// a component, so it only flags the components as dirty; [update](Self::update) regenerates
/// them. Implements [Grid] where a value of [true] marks an obstacle.
#[derive(Clone, Debug)]
pub struct NodeGrid {
    width: usize,
    height: usize,
    pub(crate) nodes: Vec<Node>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl NodeGrid {
    fn ix(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
    /// Index of the cell at `point`, or [None] if it lies outside the grid.
    pub fn index_of(&self, point: &Point) -> Option<usize> {
        if point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
        {
            Some(self.ix(point.x as usize, point.y as usize))
        } else {
            None
        }
    }
    pub fn point_of(&self, ix: usize) -> Point {
        self.nodes[ix].position
    }
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn contains(&self, point: &Point) -> bool {
        self.index_of(point).is_some()
    }
    /// Panics if `point` lies outside the grid.
    pub fn node(&self, point: &Point) -> &Node {
        &self.nodes[self.node_ix(point)]
    }
    pub fn is_obstacle(&self, point: &Point) -> bool {
        self.node(point).obstacle
    }
    /// Positions of the neighbours of `point`, orthogonal ones first.
    pub fn neighbours(&self, point: &Point) -> impl Iterator<Item = Point> + '_ {
        self.node(point)
            .neighbours
            .iter()
            .map(move |&n| self.nodes[n].position)
    }
    /// Flips the obstacle flag at `point` and returns the new value.
    pub fn toggle(&mut self, point: &Point) -> bool {
        let blocked = !self.is_obstacle(point);
        self.set(point.x as usize, point.y as usize, blocked);
        blocked
    }

    /// Puts every cell back into the default [SearchState].
    pub fn reset_search_state(&mut self) {
        for node in self.nodes.iter_mut() {
            node.state = SearchState::default();
        }
    }
    /// The cell the last search reached `point` from.
    pub fn parent(&self, point: &Point) -> Option<Point> {
        self.node(point).state.parent.map(|ix| self.nodes[ix].position)
    }
    /// Walks the parent links from `end` back to the first cell without a parent and returns
    /// the visited cells in start to end order. Only meaningful after a successful search.
    pub fn path_to(&self, end: &Point) -> Vec<Point> {
        let end_node = self.node(end);
        let mut path: Vec<Point> = std::iter::successors(Some(end_node), |node| {
            node.state.parent.map(|ix| &self.nodes[ix])
        })
        .take(self.nodes.len())
        .map(|node| node.position)
        .collect();
        path.reverse();
        path
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.node_ix(point))
    }
    fn node_ix(&self, point: &Point) -> usize {
        match self.index_of(point) {
            Some(ix) => ix,
            None => panic!(
                "{} lies outside the {}x{} grid",
                point, self.width, self.height
            ),
        }
    }
    /// Checks whether a search from `start` can ever expand `end`, based on the components as
    /// they were last generated. An obstacle start is still expanded, so it reaches whatever
    /// its free neighbours reach. An obstacle end is never expanded.
    pub fn reachable(&self, start: &Point, end: &Point) -> bool {
        let (Some(start_ix), Some(end_ix)) = (self.index_of(start), self.index_of(end)) else {
            return false;
        };
        if start_ix == end_ix {
            return true;
        }
        if self.nodes[end_ix].obstacle {
            return false;
        }
        if self.nodes[start_ix].obstacle {
            self.nodes[start_ix].neighbours.iter().any(|&n| {
                !self.nodes[n].obstacle && self.components.equiv(n, end_ix)
            })
        } else {
            self.components.equiv(start_ix, end_ix)
        }
    }
    /// Checks whether a search from `start` can never expand `end`.
    pub fn unreachable(&self, start: &Point, end: &Point) -> bool {
        !self.reachable(start, end)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            debug!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up free neighbours to the same components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.nodes.len());
        self.components_dirty = false;
        for (ix, node) in self.nodes.iter().enumerate() {
            if node.obstacle {
                continue;
            }
            for &n in node.neighbours.iter() {
                if !self.nodes[n].obstacle {
                    self.components.union(ix, n);
                }
            }
        }
    }

    fn link_neighbours(&mut self) {
        let (w, h) = (self.width, self.height);
        for (x, y) in iproduct!(0..w, 0..h) {
            let mut neighbours = SmallVec::<[usize; N_SMALLVEC_SIZE]>::new();
            if y > 0 {
                neighbours.push(self.ix(x, y - 1));
            }
            if y < h - 1 {
                neighbours.push(self.ix(x, y + 1));
            }
            if x > 0 {
                neighbours.push(self.ix(x - 1, y));
            }
            if x < w - 1 {
                neighbours.push(self.ix(x + 1, y));
            }
            // Diagonals
            if x > 0 && y > 0 {
                neighbours.push(self.ix(x - 1, y - 1));
            }
            if x > 0 && y < h - 1 {
                neighbours.push(self.ix(x - 1, y + 1));
            }
            if x < w - 1 && y > 0 {
                neighbours.push(self.ix(x + 1, y - 1));
            }
            if x < w - 1 && y < h - 1 {
                neighbours.push(self.ix(x + 1, y + 1));
            }
            let ix = self.ix(x, y);
            self.nodes[ix].neighbours = neighbours;
        }
    }
}

impl fmt::Display for NodeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for row in self.nodes.chunks(self.width) {
            let line: String = row
                .iter()
                .map(|node| if node.obstacle { '#' } else { '.' })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl Grid<bool> for NodeGrid {
    /// Builds a `width` x `height` grid and links every cell to its neighbours. The topology
    /// never changes afterwards.
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid dimensions must be positive, got {}x{}",
            width,
            height
        );
        let nodes = (0..width * height)
            .map(|ix| Node {
                position: Point::new((ix % width) as i32, (ix / width) as i32),
                obstacle: default_value,
                neighbours: SmallVec::new(),
                state: SearchState::default(),
            })
            .collect::<Vec<_>>();
        let mut base_grid = NodeGrid {
            width,
            height,
            nodes,
            components: UnionFind::new(width * height),
            components_dirty: true,
        };
        info!("Built {}x{} grid", width, height);
        base_grid.link_neighbours();
        debug!("Neighbours linked");
        base_grid
    }
    fn get(&self, x: usize, y: usize) -> bool {
        self.nodes[self.ix(x, y)].obstacle
    }
    /// Updates a position on the grid. Joins newly connected components and flags the components
    /// as dirty if components are (potentially) broken apart into multiple.
    fn set(&mut self, x: usize, y: usize, blocked: bool) {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) lies outside the {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        let ix = self.ix(x, y);
        if blocked {
            if !self.nodes[ix].obstacle {
                self.components_dirty = true;
            }
        } else {
            for &n in self.nodes[ix].neighbours.iter() {
                if !self.nodes[n].obstacle {
                    self.components.union(ix, n);
                }
            }
        }
        self.nodes[ix].obstacle = blocked;
    }
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }
}
