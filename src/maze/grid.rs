use std::{fmt, str::FromStr};

use super::cell::GridCell;
use crate::error::{MazeError, Result};

/// Binary occupancy grid of a maze.
///
/// A maze of `width` x `height` cells is stored as `2 * height + 1` rows by
/// `2 * width + 1` columns. Odd/odd entries are cells, entries with exactly one
/// even coordinate are wall slots between two adjacent cells, and even/even
/// entries are joints which are always walls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[GridCell]>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Checks cell dimensions and returns the matching grid size as `(rows, cols)`.
    pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<(usize, usize)> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions {
                width,
                height,
                reason: "width and height must be positive",
            });
        }
        // n cells in each dimension -> n + 1 walls -> 2n + 1 total
        height
            .checked_mul(2)
            .and_then(|r| r.checked_add(1))
            .zip(width.checked_mul(2).and_then(|c| c.checked_add(1)))
            .filter(|&(r, c)| r.checked_mul(c).is_some())
            .ok_or(MazeError::InvalidDimensions {
                width,
                height,
                reason: "grid size overflows usize",
            })
    }

    /// Creates a grid of `width` x `height` cells with every wall slot closed.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let (rows, cols) = Grid::check_dimensions(width, height)?;
        let mut grid = Grid {
            data: vec![GridCell::Wall; rows * cols].into_boxed_slice(),
            rows,
            cols,
        };
        (0..height).for_each(|row| {
            (0..width).for_each(|col| {
                grid.set(Grid::cell_to_grid((row, col)), GridCell::Path);
            });
        });
        Ok(grid)
    }

    /// Builds a grid from raw entries, `0` for a path and `1` for a wall, in
    /// row-major order.
    pub fn from_raw(rows: usize, cols: usize, entries: &[u8]) -> Result<Self> {
        Grid::check_shape(rows, cols, entries.len())?;
        let data = entries
            .iter()
            .map(|&value| {
                GridCell::try_from(value).map_err(|value| MazeError::InvalidGrid {
                    reason: format!("entry {value} is neither 0 (path) nor 1 (wall)"),
                })
            })
            .collect::<Result<Box<[GridCell]>>>()?;
        Ok(Grid { data, rows, cols })
    }

    fn check_shape(rows: usize, cols: usize, len: usize) -> Result<()> {
        if rows < 3 || cols < 3 || rows % 2 == 0 || cols % 2 == 0 {
            return Err(MazeError::InvalidGrid {
                reason: format!("grid must be at least 3x3 with odd sides, got {rows}x{cols}"),
            });
        }
        if rows.checked_mul(cols) != Some(len) {
            return Err(MazeError::InvalidGrid {
                reason: format!(
                    "expected {} entries for a {rows}x{cols} grid, got {len}",
                    rows.saturating_mul(cols)
                ),
            });
        }
        Ok(())
    }

    /// Number of cell columns.
    pub fn width(&self) -> usize {
        self.cols / 2
    }

    /// Number of cell rows.
    pub fn height(&self) -> usize {
        self.rows / 2
    }

    /// Number of grid rows, walls included.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns, walls included.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.data
    }

    fn ravel_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn is_in_grid_bounds(&self, coord: (usize, usize)) -> bool {
        coord.0 < self.rows && coord.1 < self.cols
    }

    pub fn get(&self, coord: (usize, usize)) -> Option<GridCell> {
        self.is_in_grid_bounds(coord)
            .then(|| self.data[self.ravel_index(coord.0, coord.1)])
    }

    pub fn set(&mut self, coord: (usize, usize), cell: GridCell) {
        let idx = self.ravel_index(coord.0, coord.1);
        self.data[idx] = cell;
    }

    /// Maps a cell position to its grid coordinate.
    pub fn cell_to_grid(cell: (usize, usize)) -> (usize, usize) {
        (cell.0 * 2 + 1, cell.1 * 2 + 1)
    }

    /// Maps a grid coordinate back to a cell position. Only odd/odd in-bounds
    /// coordinates name a cell.
    pub fn grid_to_cell(&self, coord: (usize, usize)) -> Option<(usize, usize)> {
        (self.is_in_grid_bounds(coord) && coord.0 % 2 == 1 && coord.1 % 2 == 1)
            .then_some((coord.0 / 2, coord.1 / 2))
    }

    /// Flat index of a cell, as used by the union-find during generation.
    pub fn cell_index(&self, cell: (usize, usize)) -> usize {
        cell.0 * self.width() + cell.1
    }

    /// Number of open wall slots, i.e. passages between adjacent cells.
    pub fn open_wall_count(&self) -> usize {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .filter(|&(row, col)| (row + col) % 2 == 1)
            .filter(|&coord| self[coord] == GridCell::Path)
            .count()
    }
}

impl std::ops::Index<(usize, usize)> for Grid {
    type Output = GridCell;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols) {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = MazeError;

    /// Parses the text form of a grid: one line per row, `#` for walls and
    /// `.` or a space for paths. Blank leading and trailing lines are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let lines = s
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .skip_while(|line| line.trim().is_empty())
            .collect::<Vec<_>>();
        let lines = match lines.iter().rposition(|line| !line.trim().is_empty()) {
            Some(last) => &lines[..=last],
            None => &[][..],
        };

        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        let mut data = Vec::with_capacity(rows * cols);
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(MazeError::InvalidGrid {
                    reason: format!(
                        "row {row} has {} entries, expected {cols}",
                        line.chars().count()
                    ),
                });
            }
            for symbol in line.chars() {
                let cell = GridCell::from_symbol(symbol).ok_or_else(|| MazeError::InvalidGrid {
                    reason: format!("unexpected symbol {symbol:?} in row {row}"),
                })?;
                data.push(cell);
            }
        }
        Grid::check_shape(rows, cols, data.len())?;
        Ok(Grid {
            data: data.into_boxed_slice(),
            rows,
            cols,
        })
    }
}
