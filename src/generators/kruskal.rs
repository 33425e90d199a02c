use rand::{Rng, seq::SliceRandom};

use super::{Difficulty, union_find::UnionFind};
use crate::{
    error::Result,
    maze::{CellPos, Grid, Orientation},
    observer::Observer,
};

/// Wall slot between two adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Wall {
    /// Cell on the top or left side of the wall.
    pub from: CellPos,
    pub orientation: Orientation,
}

impl Wall {
    /// Cell on the bottom or right side of the wall.
    pub fn to(&self) -> CellPos {
        match self.orientation {
            Orientation::Vertical => (self.from.0, self.from.1 + 1),
            Orientation::Horizontal => (self.from.0 + 1, self.from.1),
        }
    }

    /// Grid coordinate of the wall slot itself.
    pub fn slot(&self) -> (usize, usize) {
        let (row, col) = Grid::cell_to_grid(self.from);
        match self.orientation {
            Orientation::Vertical => (row, col + 1),
            Orientation::Horizontal => (row + 1, col),
        }
    }

    /// Manhattan offset between the wall slot and its first adjacent cell, in grid
    /// coordinates. Used as the ordering key of the easy policy.
    fn straightness_key(&self) -> usize {
        let slot = self.slot();
        let cell = Grid::cell_to_grid(self.from);
        slot.0.abs_diff(cell.0) + slot.1.abs_diff(cell.1)
    }
}

/// All walls between adjacent cells: the walls separating horizontal neighbours
/// first, then those separating vertical neighbours, each in row-major order.
pub(crate) fn collect_walls(width: usize, height: usize) -> Vec<Wall> {
    let vertical = (0..height).flat_map(|row| {
        (0..width.saturating_sub(1)).map(move |col| Wall {
            from: (row, col),
            orientation: Orientation::Vertical,
        })
    });
    let horizontal = (0..height.saturating_sub(1)).flat_map(|row| {
        (0..width).map(move |col| Wall {
            from: (row, col),
            orientation: Orientation::Horizontal,
        })
    });
    vertical.chain(horizontal).collect()
}

/// Orders the candidate walls according to the difficulty policy.
pub(crate) fn order_walls<R: Rng + ?Sized>(
    walls: &mut [Wall],
    difficulty: Difficulty,
    rng: &mut R,
) {
    walls.shuffle(rng);
    match difficulty {
        Difficulty::Easy => walls.sort_by_key(Wall::straightness_key),
        Difficulty::Normal => {}
        Difficulty::Hard => {
            walls.shuffle(rng);
            walls.shuffle(rng);
        }
    }
}

/// Carves a spanning tree into `grid` with randomized Kruskal.
///
/// Every wall whose two cells are still in different components is opened;
/// the others would close a cycle and stay. The observer advances once per
/// removed wall.
pub(crate) fn randomized_kruskal<R: Rng + ?Sized>(
    grid: &mut Grid,
    difficulty: Difficulty,
    rng: &mut R,
    observer: &mut Observer<'_, Grid>,
) -> Result<usize> {
    let (width, height) = (grid.width(), grid.height());

    let mut walls = collect_walls(width, height);
    debug_assert_eq!(walls.len(), height * (width - 1) + width * (height - 1));
    order_walls(&mut walls, difficulty, rng);

    let mut uf = UnionFind::new(width * height);
    let mut removed = 0;
    for wall in walls {
        let idx1 = grid.cell_index(wall.from);
        let idx2 = grid.cell_index(wall.to());
        // If cells are not yet connected, remove the wall between them
        if uf.union(idx1, idx2) {
            grid.remove_wall_cell_after(wall.from, wall.orientation);
            removed += 1;
            tracing::trace!("[generator] Removed wall at {:?}", wall.slot());
            let snapshot: &Grid = grid;
            observer.step(|| snapshot)?;
        }
    }

    debug_assert_eq!(uf.component_count(), 1);
    Ok(removed)
}
