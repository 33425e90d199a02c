use std::{
    collections::{HashMap, HashSet},
    num::NonZeroUsize,
};

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
pub mod visualization;

use crate::{
    error::{MazeError, Result},
    maze::{CellPos, Grid},
    observer::Observer,
};
use astar::solve_astar;
use bfs::solve_bfs;
use dfs::solve_dfs;
use dijkstra::solve_dijkstra;
pub use visualization::Visualization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solver {
    Dfs,
    Bfs,
    Dijkstra,
    AStar { bidirectional: bool },
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Dijkstra => write!(f, "Dijkstra's Algorithm"),
            Solver::AStar {
                bidirectional: true,
            } => write!(f, "Bidirectional A* Search"),
            Solver::AStar {
                bidirectional: false,
            } => write!(f, "A* Search"),
        }
    }
}

/// Manhattan distance between two cells.
fn manhattan(a: CellPos, b: CellPos) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// Walks the parent links back from `end` and returns the route in forward order.
fn reconstruct_path(came_from: &HashMap<CellPos, CellPos>, end: CellPos) -> Vec<CellPos> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(&parent) = came_from.get(&current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

/// State shared by every search strategy during a single run.
struct Search<'s, 'a> {
    grid: &'s Grid,
    start: CellPos,
    goal: CellPos,
    explored: HashSet<CellPos>,
    observer: &'s mut Observer<'a, Visualization>,
}

impl Search<'_, '_> {
    /// Marks a popped cell as explored and advances the observer. The snapshot
    /// shows the route from the search root to `cell` as the solution so far.
    fn explore(&mut self, cell: CellPos, came_from: &HashMap<CellPos, CellPos>) -> Result<()> {
        self.explored.insert(cell);
        let (grid, start, goal, explored) = (self.grid, self.start, self.goal, &self.explored);
        self.observer.step(|| {
            Visualization::new(
                grid,
                Some(start),
                Some(goal),
                explored,
                &reconstruct_path(came_from, cell),
            )
        })
    }
}

/// Finds routes between two cells of a grid and keeps the outputs of the last run.
#[derive(Debug, Clone)]
pub struct MazeSolver<'g> {
    grid: &'g Grid,
    start: Option<CellPos>,
    end: Option<CellPos>,
    solution_path: Option<Vec<CellPos>>,
    explored: HashSet<CellPos>,
}

impl<'g> MazeSolver<'g> {
    /// Expansions between two progress notifications, unless the observer sets
    /// its own cadence.
    pub const PROGRESS_INTERVAL: NonZeroUsize = NonZeroUsize::new(5).unwrap();

    pub fn new(grid: &'g Grid) -> Self {
        MazeSolver {
            grid,
            start: None,
            end: None,
            solution_path: None,
            explored: HashSet::new(),
        }
    }

    pub fn start(&self) -> Option<CellPos> {
        self.start
    }

    pub fn end(&self) -> Option<CellPos> {
        self.end
    }

    /// Route found by the last run, start and end included.
    pub fn solution_path(&self) -> Option<&[CellPos]> {
        self.solution_path.as_deref()
    }

    /// Cells popped from a frontier and closed during the last run.
    pub fn explored_cells(&self) -> &HashSet<CellPos> {
        &self.explored
    }

    /// Sets the endpoints of the search. Missing endpoints get defaults: the start
    /// is the first open cell of the top row scanning left to right, the end the
    /// first open cell of the bottom row scanning right to left. If those rows
    /// have no open cell, the first (start) or last (end) open cell in row-major
    /// order is used.
    pub fn set_start_end(&mut self, start: Option<CellPos>, end: Option<CellPos>) -> Result<()> {
        let (start, end) = self.resolve_endpoints(start, end)?;
        tracing::debug!("[solver] Start {:?}, end {:?}", start, end);
        self.start = Some(start);
        self.end = Some(end);
        self.solution_path = None;
        self.explored.clear();
        Ok(())
    }

    fn resolve_endpoints(
        &self,
        start: Option<CellPos>,
        end: Option<CellPos>,
    ) -> Result<(CellPos, CellPos)> {
        let start = match start {
            Some(cell) => self.check_endpoint(cell)?,
            None => self.default_start()?,
        };
        let end = match end {
            Some(cell) => self.check_endpoint(cell)?,
            None => self.default_end()?,
        };
        Ok((start, end))
    }

    fn check_endpoint(&self, cell: CellPos) -> Result<CellPos> {
        if !self.grid.is_in_bounds(cell) {
            return Err(MazeError::InvalidStartOrEnd {
                pos: Some(cell),
                reason: "out of bounds",
            });
        }
        if !self.grid.is_cell_open(cell) {
            return Err(MazeError::InvalidStartOrEnd {
                pos: Some(cell),
                reason: "cell is a wall",
            });
        }
        Ok(cell)
    }

    fn open_cells(&self) -> impl DoubleEndedIterator<Item = CellPos> + '_ {
        let width = self.grid.width();
        (0..self.grid.height() * width)
            .map(move |idx| (idx / width, idx % width))
            .filter(|&cell| self.grid.is_cell_open(cell))
    }

    fn default_start(&self) -> Result<CellPos> {
        (0..self.grid.width())
            .map(|col| (0, col))
            .find(|&cell| self.grid.is_cell_open(cell))
            .or_else(|| self.open_cells().next())
            .ok_or(MazeError::InvalidStartOrEnd {
                pos: None,
                reason: "grid has no open cell",
            })
    }

    fn default_end(&self) -> Result<CellPos> {
        let last_row = self.grid.height() - 1;
        (0..self.grid.width())
            .rev()
            .map(|col| (last_row, col))
            .find(|&cell| self.grid.is_cell_open(cell))
            .or_else(|| self.open_cells().next_back())
            .ok_or(MazeError::InvalidStartOrEnd {
                pos: None,
                reason: "grid has no open cell",
            })
    }

    /// Solves without progress notifications.
    pub fn solve(&mut self, solver: Solver) -> Result<Option<Vec<CellPos>>> {
        self.solve_with(solver, &mut Observer::new())
    }

    /// Solves with the given strategy.
    ///
    /// Returns `Ok(None)` when the end cannot be reached from the start and
    /// [`MazeError::Cancelled`] when the observer's cancellation check fires.
    pub fn solve_with(
        &mut self,
        solver: Solver,
        observer: &mut Observer<'_, Visualization>,
    ) -> Result<Option<Vec<CellPos>>> {
        let (start, goal) = self.resolve_endpoints(self.start, self.end)?;
        self.start = Some(start);
        self.end = Some(goal);

        observer.begin(Self::PROGRESS_INTERVAL);
        tracing::debug!("[solver] Solving from {:?} to {:?} with {}", start, goal, solver);

        let mut search = Search {
            grid: self.grid,
            start,
            goal,
            explored: HashSet::new(),
            observer,
        };
        let result = match solver {
            Solver::Bfs => solve_bfs(&mut search),
            Solver::Dfs => solve_dfs(&mut search),
            Solver::Dijkstra => solve_dijkstra(&mut search),
            Solver::AStar { bidirectional } => solve_astar(&mut search, bidirectional),
        };
        self.explored = search.explored;

        match &result {
            Ok(Some(path)) => tracing::info!(
                "[solver] {} found a path of {} cells, explored {} cells",
                solver,
                path.len(),
                self.explored.len()
            ),
            Ok(None) => tracing::info!(
                "[solver] {} found no path, explored {} cells",
                solver,
                self.explored.len()
            ),
            Err(e) => tracing::info!("[solver] {} stopped: {}", solver, e),
        }
        self.solution_path = result.as_ref().ok().cloned().flatten();
        result
    }

    /// Categories of every grid entry for the current start, end, explored cells
    /// and solution.
    pub fn visualization(&self) -> Visualization {
        Visualization::new(
            self.grid,
            self.start,
            self.end,
            &self.explored,
            self.solution_path.as_deref().unwrap_or_default(),
        )
    }
}

/// Solve a grid between its default endpoints in one call.
pub fn solve_maze(grid: &Grid, solver: Solver) -> Result<Option<Vec<CellPos>>> {
    MazeSolver::new(grid).solve(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Difficulty, generate_maze};
    use crate::maze::VisualCell;

    const ALL_SOLVERS: [Solver; 5] = [
        Solver::Bfs,
        Solver::Dfs,
        Solver::Dijkstra,
        Solver::AStar {
            bidirectional: false,
        },
        Solver::AStar {
            bidirectional: true,
        },
    ];

    fn assert_valid_path(grid: &Grid, path: &[CellPos], start: CellPos, end: CellPos) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        for pair in path.windows(2) {
            assert!(
                grid.is_wall_open(pair[0], pair[1]),
                "{:?} -> {:?} is not an open passage",
                pair[0],
                pair[1]
            );
        }
        let unique = path.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), path.len(), "path revisits a cell");
    }

    #[test]
    fn test_default_endpoints() {
        let grid = Grid::new(4, 3).unwrap();
        let mut solver = MazeSolver::new(&grid);
        solver.set_start_end(None, None).unwrap();
        assert_eq!(solver.start(), Some((0, 0)));
        assert_eq!(solver.end(), Some((2, 3)));
    }

    #[test]
    fn test_default_endpoints_skip_closed_cells() {
        let grid: Grid = "\
#######
###...#
#.#.#.#
#...###
#######"
            .parse()
            .unwrap();
        let mut solver = MazeSolver::new(&grid);
        solver.set_start_end(None, None).unwrap();
        assert_eq!(solver.start(), Some((0, 1)));
        assert_eq!(solver.end(), Some((1, 1)));
    }

    #[test]
    fn test_default_endpoints_fall_back_to_row_major() {
        let grid: Grid = "\
#######
#######
#######
#.#.###
#######
#.#.###
#######
#######
#######"
            .parse()
            .unwrap();
        let mut solver = MazeSolver::new(&grid);
        solver.set_start_end(None, None).unwrap();
        assert_eq!(solver.start(), Some((1, 0)));
        assert_eq!(solver.end(), Some((2, 1)));
    }

    #[test]
    fn test_grid_without_open_cells() {
        let grid: Grid = "###\n###\n###".parse().unwrap();
        let mut solver = MazeSolver::new(&grid);
        assert!(matches!(
            solver.solve(Solver::Bfs),
            Err(MazeError::InvalidStartOrEnd { pos: None, .. })
        ));
    }

    #[test]
    fn test_invalid_endpoints_are_rejected() {
        let grid: Grid = "#######\n#..#..#\n#######".parse().unwrap();
        let mut solver = MazeSolver::new(&grid);
        assert_eq!(
            solver.set_start_end(Some((0, 3)), None),
            Err(MazeError::InvalidStartOrEnd {
                pos: Some((0, 3)),
                reason: "out of bounds"
            })
        );
        assert_eq!(
            solver.set_start_end(None, Some((0, 1))),
            Err(MazeError::InvalidStartOrEnd {
                pos: Some((0, 1)),
                reason: "cell is a wall"
            })
        );
        assert_eq!(solver.start(), None);
    }

    #[test]
    fn test_explicit_endpoint_is_kept_when_solving() {
        let grid = generate_maze(6, 6, Difficulty::Normal, Some(3)).unwrap();
        let mut solver = MazeSolver::new(&grid);
        solver.set_start_end(Some((3, 3)), None).unwrap();
        let path = solver.solve(Solver::Bfs).unwrap().unwrap();
        assert_valid_path(&grid, &path, (3, 3), (5, 5));
    }

    #[test]
    fn test_start_equals_end() {
        let grid = generate_maze(5, 5, Difficulty::Hard, Some(8)).unwrap();
        for solver in ALL_SOLVERS {
            let mut maze_solver = MazeSolver::new(&grid);
            maze_solver.set_start_end(Some((2, 2)), Some((2, 2))).unwrap();
            assert_eq!(maze_solver.solve(solver).unwrap(), Some(vec![(2, 2)]), "{solver}");
        }
    }

    #[test]
    fn test_single_cell_grid() {
        let grid = generate_maze(1, 1, Difficulty::Normal, Some(0)).unwrap();
        for solver in ALL_SOLVERS {
            assert_eq!(solve_maze(&grid, solver).unwrap(), Some(vec![(0, 0)]));
        }
    }

    #[test]
    fn test_corridor() {
        let grid: Grid = "#########\n#.......#\n#########".parse().unwrap();
        let expected = vec![(0, 0), (0, 1), (0, 2), (0, 3)];
        for solver in ALL_SOLVERS {
            assert_eq!(solve_maze(&grid, solver).unwrap(), Some(expected.clone()), "{solver}");
        }
    }

    #[test]
    fn test_all_solvers_find_valid_paths() {
        for seed in 0..10 {
            let grid = generate_maze(11, 7, Difficulty::Normal, Some(seed)).unwrap();
            let mut solver = MazeSolver::new(&grid);
            let bfs_len = solver.solve(Solver::Bfs).unwrap().unwrap().len();
            for algorithm in ALL_SOLVERS {
                let path = solver.solve(algorithm).unwrap().unwrap();
                assert_valid_path(&grid, &path, (0, 0), (6, 10));
                assert!(path.len() >= bfs_len, "{algorithm} shorter than BFS");
                // A spanning tree has a single simple path between two cells
                assert_eq!(path.len(), bfs_len, "{algorithm}");
            }
        }
    }

    #[test]
    fn test_shortest_path_on_grid_with_cycles() {
        // Open every wall: many routes, only the shortest ones have 7 cells
        let mut grid = Grid::new(4, 4).unwrap();
        for row in 0..4 {
            for col in 0..4 {
                grid.remove_wall_cell_after((row, col), crate::maze::Orientation::Vertical);
                grid.remove_wall_cell_after((row, col), crate::maze::Orientation::Horizontal);
            }
        }
        for solver in ALL_SOLVERS {
            let mut maze_solver = MazeSolver::new(&grid);
            let path = maze_solver.solve(solver).unwrap().unwrap();
            assert_valid_path(&grid, &path, (0, 0), (3, 3));
            if solver != Solver::Dfs {
                assert_eq!(path.len(), 7, "{solver}");
            } else {
                assert!(path.len() >= 7);
            }
        }
    }

    #[test]
    fn test_dfs_follows_neighbor_order() {
        // Right is tried before down, so DFS walks the top row first
        let mut grid = Grid::new(3, 2).unwrap();
        for col in 0..3 {
            grid.remove_wall_cell_after((0, col), crate::maze::Orientation::Vertical);
            grid.remove_wall_cell_after((0, col), crate::maze::Orientation::Horizontal);
        }
        let path = solve_maze(&grid, Solver::Dfs).unwrap().unwrap();
        assert_eq!(path, vec![(0, 0), (0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_outputs_are_retained() {
        let grid = generate_maze(8, 8, Difficulty::Normal, Some(12)).unwrap();
        let mut solver = MazeSolver::new(&grid);
        let path = solver.solve(Solver::Bfs).unwrap().unwrap();
        assert_eq!(solver.solution_path(), Some(path.as_slice()));
        assert!(solver.explored_cells().contains(&(0, 0)));
        assert!(path.iter().all(|cell| solver.explored_cells().contains(cell)));

        let viz = solver.visualization();
        assert_eq!(viz.cell((0, 0)), VisualCell::Start);
        assert_eq!(viz.cell((7, 7)), VisualCell::End);
        assert_eq!(viz.count(VisualCell::Start), 1);
        // Every cell and crossed wall of the route except the endpoints
        assert_eq!(viz.count(VisualCell::Solution), 2 * path.len() - 3);
    }

    #[test]
    fn test_progress_and_cancellation() {
        let grid = generate_maze(10, 10, Difficulty::Normal, Some(4)).unwrap();
        let mut frames = Vec::new();
        {
            let mut observer = Observer::new().every(1).on_progress(|viz: &Visualization| {
                frames.push(viz.count(VisualCell::Explored));
            });
            MazeSolver::new(&grid)
                .solve_with(Solver::Bfs, &mut observer)
                .unwrap()
                .unwrap();
        }
        assert!(!frames.is_empty());
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));

        let mut solver = MazeSolver::new(&grid);
        let mut observer = Observer::new().every(2).cancel_when(|| true);
        assert_eq!(
            solver.solve_with(Solver::AStar { bidirectional: true }, &mut observer),
            Err(MazeError::Cancelled)
        );
        assert_eq!(solver.solution_path(), None);
        assert!(!solver.explored_cells().is_empty());
    }
}
