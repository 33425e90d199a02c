use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap, HashSet},
};

use super::{Search, reconstruct_path};
use crate::{error::Result, maze::CellPos};

pub(super) fn solve_dijkstra(search: &mut Search<'_, '_>) -> Result<Option<Vec<CellPos>>> {
    let grid = search.grid;

    // Priority queue for Dijkstra's algorithm
    // Using Reverse to turn the max-heap into a min-heap; ties go to the smaller position
    let mut pq: BinaryHeap<Reverse<(usize, CellPos)>> = BinaryHeap::new();
    pq.push(Reverse((0, search.start)));

    // Minimum known cost to reach each cell
    let mut costs = HashMap::from([(search.start, 0)]);
    let mut came_from = HashMap::new();
    let mut closed = HashSet::new();

    while let Some(Reverse((cost, current))) = pq.pop() {
        // Stale entry left behind by a later, cheaper relaxation
        if !closed.insert(current) {
            continue;
        }

        search.explore(current, &came_from)?;

        if current == search.goal {
            return Ok(Some(reconstruct_path(&came_from, current)));
        }

        let new_cost = cost + 1; // Uniform cost for each step
        for neighbor in grid.neighbors(current) {
            if closed.contains(&neighbor) {
                continue;
            }
            let is_cheaper = costs
                .get(&neighbor)
                .is_none_or(|&existing_cost| new_cost < existing_cost);
            if is_cheaper {
                costs.insert(neighbor, new_cost);
                came_from.insert(neighbor, current);
                pq.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    Ok(None) // No path found
}
