use std::collections::{HashMap, HashSet};

use super::{Search, reconstruct_path};
use crate::{error::Result, maze::CellPos};

/// Depth-first search. Returns the first route found, which need not be the shortest.
pub(super) fn solve_dfs(search: &mut Search<'_, '_>) -> Result<Option<Vec<CellPos>>> {
    let grid = search.grid;
    let mut stack = vec![search.start];
    let mut visited = HashSet::from([search.start]);
    let mut came_from = HashMap::new();

    while let Some(current) = stack.pop() {
        search.explore(current, &came_from)?;

        if current == search.goal {
            return Ok(Some(reconstruct_path(&came_from, current)));
        }

        // Push in reverse so the first neighbor in the fixed order is popped first
        let neighbors = grid.neighbors(current).collect::<Vec<_>>();
        for neighbor in neighbors.into_iter().rev() {
            if visited.insert(neighbor) {
                came_from.insert(neighbor, current);
                stack.push(neighbor);
            }
        }
    }

    Ok(None) // No path found
}
