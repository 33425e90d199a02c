use std::collections::{HashMap, HashSet, VecDeque};

use super::{Search, reconstruct_path};
use crate::{error::Result, maze::CellPos};

/// Breadth-first search: the first route reaching the goal has the fewest steps.
pub(super) fn solve_bfs(search: &mut Search<'_, '_>) -> Result<Option<Vec<CellPos>>> {
    let grid = search.grid;
    let mut queue = VecDeque::from([search.start]);
    let mut visited = HashSet::from([search.start]);
    let mut came_from = HashMap::new();

    while let Some(current) = queue.pop_front() {
        search.explore(current, &came_from)?;

        if current == search.goal {
            return Ok(Some(reconstruct_path(&came_from, current)));
        }

        for neighbor in grid.neighbors(current) {
            // Visited on enqueue, so every cell enters the queue at most once
            if visited.insert(neighbor) {
                came_from.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }

    Ok(None) // No path found
}
