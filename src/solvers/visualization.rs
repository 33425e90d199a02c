use std::{collections::HashSet, fmt};

use crate::maze::{CellPos, Grid, VisualCell};

/// Per-entry category grid of a solver run, the same shape as the maze grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visualization {
    data: Box<[VisualCell]>,
    rows: usize,
    cols: usize,
}

impl Visualization {
    /// Layers the categories in order: walls and paths from the grid, then
    /// explored cells, then the solution route, then start and end.
    pub fn new(
        grid: &Grid,
        start: Option<CellPos>,
        end: Option<CellPos>,
        explored: &HashSet<CellPos>,
        path: &[CellPos],
    ) -> Self {
        let mut data = grid
            .cells()
            .iter()
            .map(|&cell| VisualCell::from(cell))
            .collect::<Box<[_]>>();
        let cols = grid.cols();
        let mut mark = |coord: (usize, usize), category: VisualCell| {
            data[coord.0 * cols + coord.1] = category;
        };

        explored
            .iter()
            .filter(|&&cell| grid.is_cell_open(cell))
            .for_each(|&cell| mark(Grid::cell_to_grid(cell), VisualCell::Explored));

        path.iter()
            .filter(|&&cell| grid.is_in_bounds(cell))
            .for_each(|&cell| mark(Grid::cell_to_grid(cell), VisualCell::Solution));
        path.windows(2)
            .filter_map(|pair| grid.wall_between(pair[0], pair[1]))
            .for_each(|slot| mark(slot, VisualCell::Solution));

        for (cell, category) in [(start, VisualCell::Start), (end, VisualCell::End)] {
            if let Some(cell) = cell.filter(|&cell| grid.is_in_bounds(cell)) {
                mark(Grid::cell_to_grid(cell), category);
            }
        }

        Visualization {
            data,
            rows: grid.rows(),
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Category of the entry holding the given cell.
    pub fn cell(&self, cell: CellPos) -> VisualCell {
        self[Grid::cell_to_grid(cell)]
    }

    /// Number of entries in the given category.
    pub fn count(&self, category: VisualCell) -> usize {
        self.data.iter().filter(|&&c| c == category).count()
    }
}

impl std::ops::Index<(usize, usize)> for Visualization {
    type Output = VisualCell;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[index.0 * self.cols + index.1]
    }
}

impl fmt::Display for Visualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols) {
            for cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers() {
        let grid: Grid = "\
#######
#.....#
#.#####
#.....#
#######"
            .parse()
            .unwrap();
        let explored = HashSet::from([(0, 0), (0, 1), (1, 0), (1, 1)]);
        let path = [(0, 0), (1, 0), (1, 1)];
        let viz = Visualization::new(&grid, Some((0, 0)), Some((1, 1)), &explored, &path);

        assert_eq!((viz.rows(), viz.cols()), (5, 7));
        assert_eq!(viz.cell((0, 0)), VisualCell::Start);
        assert_eq!(viz.cell((1, 1)), VisualCell::End);
        assert_eq!(viz.cell((1, 0)), VisualCell::Solution);
        assert_eq!(viz.cell((0, 1)), VisualCell::Explored);
        assert_eq!(viz.cell((0, 2)), VisualCell::Path);
        // Wall slots crossed by the route
        assert_eq!(viz[(2, 1)], VisualCell::Solution);
        assert_eq!(viz[(3, 2)], VisualCell::Solution);
        // Passage between explored cells which is not on the route
        assert_eq!(viz[(1, 2)], VisualCell::Path);
        assert_eq!(viz[(0, 0)], VisualCell::Wall);
        assert_eq!(viz.count(VisualCell::Solution), 3);
        assert_eq!(viz.count(VisualCell::Start) + viz.count(VisualCell::End), 2);
    }

    #[test]
    fn test_display_has_one_line_per_row() {
        let grid = Grid::new(2, 2).unwrap();
        let viz = Visualization::new(&grid, None, None, &HashSet::new(), &[]);
        assert_eq!(viz.to_string().lines().count(), 5);
        assert_eq!(viz.count(VisualCell::Path), 4);
    }
}
