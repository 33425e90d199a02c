//! Perfect maze generation with randomized Kruskal and maze solving with BFS,
//! DFS, Dijkstra and (bidirectional) A*.
//!
//! ```
//! use spanning_maze::{Difficulty, MazeSolver, Solver, generate_maze};
//!
//! let grid = generate_maze(8, 5, Difficulty::Normal, Some(7)).unwrap();
//! let mut solver = MazeSolver::new(&grid);
//! let path = solver.solve(Solver::Bfs).unwrap().unwrap();
//! assert_eq!(path.first(), Some(&(0, 0)));
//! assert_eq!(path.last(), Some(&(4, 7)));
//! ```

pub mod error;
pub mod generators;
pub mod maze;
pub mod observer;
pub mod solvers;

pub use error::{MazeError, Result};
pub use generators::{Difficulty, MazeGenerator, generate_maze};
pub use maze::{CellPos, Grid, GridCell, VisualCell};
pub use observer::Observer;
pub use solvers::{MazeSolver, Solver, Visualization, solve_maze};
