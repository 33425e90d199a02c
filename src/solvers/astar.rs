use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap, HashSet},
};

use super::{Search, manhattan, reconstruct_path};
use crate::{
    error::Result,
    maze::{CellPos, Grid},
};

/// One direction of an A* search: a frontier ordered by estimated total cost
/// towards `target`, plus the bookkeeping needed to rebuild routes.
struct Frontier {
    target: CellPos,
    /// Entries are `(cost so far + Manhattan distance to target, cell)`.
    /// A cell may appear more than once; closed cells are skipped on pop.
    open: BinaryHeap<Reverse<(usize, CellPos)>>,
    closed: HashSet<CellPos>,
    came_from: HashMap<CellPos, CellPos>,
    traveling_cost: HashMap<CellPos, usize>,
}

impl Frontier {
    fn new(root: CellPos, target: CellPos) -> Self {
        Frontier {
            target,
            open: BinaryHeap::from([Reverse((manhattan(root, target), root))]),
            closed: HashSet::new(),
            came_from: HashMap::new(),
            traveling_cost: HashMap::from([(root, 0)]),
        }
    }

    /// Pops the best cell which has not been closed yet.
    fn pop(&mut self) -> Option<CellPos> {
        while let Some(Reverse((_, cell))) = self.open.pop() {
            if !self.closed.contains(&cell) {
                return Some(cell);
            }
        }
        None
    }

    /// Relaxes the neighbors of a freshly closed cell. Returns the first improved
    /// neighbor which the opposite direction has already closed: the meeting point.
    fn relax(
        &mut self,
        grid: &Grid,
        current: CellPos,
        other_closed: &HashSet<CellPos>,
    ) -> Option<CellPos> {
        let new_cost = self.traveling_cost[&current] + 1;
        for neighbor in grid.neighbors(current) {
            if self.closed.contains(&neighbor) {
                continue;
            }
            let is_cheaper = self
                .traveling_cost
                .get(&neighbor)
                .is_none_or(|&existing_cost| new_cost < existing_cost);
            if !is_cheaper {
                continue;
            }
            self.came_from.insert(neighbor, current);
            self.traveling_cost.insert(neighbor, new_cost);
            self.open
                .push(Reverse((new_cost + manhattan(neighbor, self.target), neighbor)));

            if other_closed.contains(&neighbor) {
                return Some(neighbor);
            }
        }
        None
    }
}

/// Joins the forward route to the meeting point with the backward route from it.
fn join_at(forward: &Frontier, backward: &Frontier, meeting_point: CellPos) -> Vec<CellPos> {
    let mut path = reconstruct_path(&forward.came_from, meeting_point);
    let mut suffix = reconstruct_path(&backward.came_from, meeting_point);
    suffix.reverse();
    // The meeting point already ends the forward half
    path.extend(suffix.into_iter().skip(1));
    path
}

/// A* with the Manhattan heuristic, optionally searching from both ends at once.
///
/// Each round the forward frontier takes one step, then the backward frontier
/// if there is one. The search stops at the first meeting point, which is exact
/// on mazes without cycles but only an approximation of the shortest route
/// otherwise. Exhausting either frontier means the ends are disconnected.
pub(super) fn solve_astar(
    search: &mut Search<'_, '_>,
    bidirectional: bool,
) -> Result<Option<Vec<CellPos>>> {
    let grid = search.grid;
    let mut forward = Frontier::new(search.start, search.goal);
    let mut backward = Frontier::new(search.goal, search.start);

    loop {
        let Some(current) = forward.pop() else {
            break;
        };
        forward.closed.insert(current);
        search.explore(current, &forward.came_from)?;
        if current == forward.target {
            return Ok(Some(reconstruct_path(&forward.came_from, current)));
        }
        if let Some(meeting_point) = forward.relax(grid, current, &backward.closed) {
            tracing::debug!("[solver] Frontiers met at {:?}", meeting_point);
            return Ok(Some(join_at(&forward, &backward, meeting_point)));
        }

        if !bidirectional {
            continue;
        }

        let Some(current) = backward.pop() else {
            break;
        };
        backward.closed.insert(current);
        search.explore(current, &backward.came_from)?;
        if current == backward.target {
            let mut path = reconstruct_path(&backward.came_from, current);
            path.reverse();
            return Ok(Some(path));
        }
        if let Some(meeting_point) = backward.relax(grid, current, &forward.closed) {
            tracing::debug!("[solver] Frontiers met at {:?}", meeting_point);
            return Ok(Some(join_at(&forward, &backward, meeting_point)));
        }
    }

    Ok(None) // No path found
}
