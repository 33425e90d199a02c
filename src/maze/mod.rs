pub mod cell;
pub mod grid;

pub use cell::{GridCell, VisualCell};
pub use grid::Grid;

/// Logical cell position as `(row, col)`.
pub type CellPos = (usize, usize);

/// Orientation of the wall slot following a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The wall to the right of a cell, between `(row, col)` and `(row, col + 1)`.
    Vertical,
    /// The wall below a cell, between `(row, col)` and `(row + 1, col)`.
    Horizontal,
}

impl Grid {
    /// Checks if the given cell position is within the bounds of the maze.
    pub fn is_in_bounds(&self, cell: CellPos) -> bool {
        cell.0 < self.height() && cell.1 < self.width()
    }

    /// Checks whether the cell is in bounds and its grid entry is a path.
    pub fn is_cell_open(&self, cell: CellPos) -> bool {
        self.is_in_bounds(cell) && self[Grid::cell_to_grid(cell)] == GridCell::Path
    }

    /// Grid coordinate of the wall slot following `from` in the given orientation,
    /// or `None` if `from` sits on the last column (vertical) or last row (horizontal).
    pub fn wall_after(&self, from: CellPos, orientation: Orientation) -> Option<(usize, usize)> {
        if !self.is_in_bounds(from) {
            return None;
        }
        match orientation {
            Orientation::Vertical => {
                (from.1 + 1 < self.width()).then_some((from.0 * 2 + 1, from.1 * 2 + 2))
            }
            Orientation::Horizontal => {
                (from.0 + 1 < self.height()).then_some((from.0 * 2 + 2, from.1 * 2 + 1))
            }
        }
    }

    /// Grid coordinate of the wall slot between two orthogonally adjacent cells.
    pub fn wall_between(&self, a: CellPos, b: CellPos) -> Option<(usize, usize)> {
        let (from, to) = (a.min(b), a.max(b));
        if from.0 == to.0 && from.1.checked_add(1) == Some(to.1) {
            self.wall_after(from, Orientation::Vertical)
        } else if from.1 == to.1 && from.0.checked_add(1) == Some(to.0) {
            self.wall_after(from, Orientation::Horizontal)
        } else {
            None
        }
    }

    /// Checks whether two adjacent cells are connected by an open wall slot.
    pub fn is_wall_open(&self, a: CellPos, b: CellPos) -> bool {
        self.wall_between(a, b)
            .is_some_and(|coord| self[coord] == GridCell::Path)
    }

    /// Removes the wall slot following `from` in the given orientation.
    ///
    /// Returns `true` if a wall was removed, `false` if the slot was already open
    /// or does not exist.
    pub fn remove_wall_cell_after(&mut self, from: CellPos, orientation: Orientation) -> bool {
        match self.wall_after(from, orientation) {
            Some(coord) if self[coord] == GridCell::Wall => {
                self.set(coord, GridCell::Path);
                true
            }
            _ => false,
        }
    }

    /// Reachable neighbors of a cell in the fixed order right, down, left, up.
    ///
    /// A neighbor is yielded when it is in bounds, open, and the wall slot between
    /// it and `cell` is open. The order decides tie-breaking in the solvers.
    pub fn neighbors(&self, cell: CellPos) -> impl Iterator<Item = CellPos> + '_ {
        let (row, col) = cell;
        // Out-of-range candidates wrap to usize::MAX and are filtered out below.
        [
            (row, col.wrapping_add(1)),
            (row.wrapping_add(1), col),
            (row, col.wrapping_sub(1)),
            (row.wrapping_sub(1), col),
        ]
        .into_iter()
        .filter(move |_| self.is_cell_open(cell))
        .filter(move |&next| self.is_cell_open(next) && self.is_wall_open(cell, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_wall() {
        let mut grid = Grid::new(5, 5).unwrap();
        assert!(grid.remove_wall_cell_after((1, 1), Orientation::Vertical));
        // Trying to remove the same wall again should return false
        assert!(!grid.remove_wall_cell_after((1, 1), Orientation::Vertical));
        // Check that the wall has been removed in the grid
        assert_eq!(grid[(3, 4)], GridCell::Path);
        assert!(grid.is_wall_open((1, 1), (1, 2)));
        assert!(grid.is_wall_open((1, 2), (1, 1)));
        // No wall after the last column
        assert!(!grid.remove_wall_cell_after((0, 4), Orientation::Vertical));
        assert!(!grid.remove_wall_cell_after((4, 0), Orientation::Horizontal));
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::new(5, 5).unwrap();
        assert!(!grid.is_in_bounds((5, 5)));
        assert!(!grid.is_in_bounds((0, 5)));
        assert!(!grid.is_in_bounds((5, 0)));
        assert!(grid.is_in_bounds((4, 4)));
    }

    #[test]
    fn test_wall_between() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(grid.wall_between((0, 0), (0, 1)), Some((1, 2)));
        assert_eq!(grid.wall_between((2, 1), (1, 1)), Some((4, 3)));
        assert_eq!(grid.wall_between((0, 0), (1, 1)), None);
        assert_eq!(grid.wall_between((0, 0), (0, 2)), None);
        assert_eq!(grid.wall_between((0, 0), (0, 0)), None);
    }

    #[test]
    fn test_neighbors_follow_fixed_order() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert_eq!(grid.neighbors((1, 1)).count(), 0);

        grid.remove_wall_cell_after((1, 1), Orientation::Vertical); // right
        grid.remove_wall_cell_after((1, 1), Orientation::Horizontal); // down
        grid.remove_wall_cell_after((1, 0), Orientation::Vertical); // left
        grid.remove_wall_cell_after((0, 1), Orientation::Horizontal); // up
        assert_eq!(
            grid.neighbors((1, 1)).collect::<Vec<_>>(),
            vec![(1, 2), (2, 1), (1, 0), (0, 1)]
        );
        // Borders never yield out-of-range neighbors
        assert_eq!(grid.neighbors((0, 1)).collect::<Vec<_>>(), vec![(1, 1)]);
        assert_eq!(grid.neighbors((5, 5)).count(), 0);
    }

    #[test]
    fn test_closed_cells_are_not_neighbors() {
        let grid: Grid = "#######\n#.....#\n#######".parse().unwrap();
        assert_eq!(grid.neighbors((0, 1)).collect::<Vec<_>>(), vec![(0, 2), (0, 0)]);

        let blocked: Grid = "#######\n#...#.#\n#######".parse().unwrap();
        assert_eq!(blocked.neighbors((0, 1)).collect::<Vec<_>>(), vec![(0, 0)]);

        let closed_cell: Grid = "#######\n#..#..#\n#######".parse().unwrap();
        // Cell (0, 1) itself is a wall, so it has no neighbors and is no neighbor
        assert_eq!(closed_cell.neighbors((0, 1)).count(), 0);
        assert_eq!(closed_cell.neighbors((0, 0)).count(), 0);
    }
}
