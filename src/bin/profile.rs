use std::time::Instant;

use spanning_maze::{Difficulty, MazeSolver, Solver, generate_maze};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(1);

    let solvers = [
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
    for iteration in 0..num_iters {
        let timer = Instant::now();
        let grid = generate_maze(
            u8::MAX as usize,
            u8::MAX as usize,
            Difficulty::Normal,
            Some(iteration as u64),
        )?;
        tracing::info!("[profile] Generation took {:?}", timer.elapsed());

        for solver in solvers {
            let timer = Instant::now();
            let mut maze_solver = MazeSolver::new(&grid);
            let path = maze_solver.solve(solver)?;
            tracing::info!(
                "[profile] {} took {:?}, path of {} cells, explored {} cells",
                solver,
                timer.elapsed(),
                path.map_or(0, |p| p.len()),
                maze_solver.explored_cells().len()
            );
        }
    }
    Ok(())
}
