//! Generate a maze, solve it, and print the result to the terminal

use std::{
    collections::HashSet,
    io::{Write, stdout},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use clap::{Parser, ValueEnum};
use crossterm::{cursor, queue, terminal};
use spanning_maze::{Difficulty, Grid, MazeGenerator, MazeSolver, Observer, Solver, Visualization};
use tracing::Level;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SolverArg {
    Bfs,
    Dfs,
    Dijkstra,
    Astar,
}

/// Randomized Kruskal maze generator and solver
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells
    #[arg(long, default_value_t = 20)]
    width: usize,

    /// Maze height in cells
    #[arg(long, default_value_t = 10)]
    height: usize,

    /// Order in which walls are considered during generation
    #[arg(short, long, value_enum, default_value_t = DifficultyArg::Normal)]
    difficulty: DifficultyArg,

    /// Solving algorithm
    #[arg(short, long, value_enum, default_value_t = SolverArg::Astar)]
    solver: SolverArg,

    /// Run A* from the start only instead of from both ends
    #[arg(long)]
    unidirectional: bool,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Redraw the maze while it is generated and solved
    #[arg(short, long)]
    animate: bool,

    /// Animation frame length in milliseconds
    #[arg(long, default_value_t = 30)]
    frame_ms: u64,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

/// Clears the terminal and draws one frame.
fn render_frame(frame: &Visualization, frame_length: Duration) -> std::io::Result<()> {
    let mut stdout = stdout();
    queue!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0),
    )?;
    write!(stdout, "{frame}")?;
    stdout.flush()?;
    std::thread::sleep(frame_length);
    Ok(())
}

fn grid_frame(grid: &Grid) -> Visualization {
    Visualization::new(grid, None, None, &HashSet::new(), &[])
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = match &args.log_file {
        Some(path) => {
            let directory = path.parent().filter(|p| !p.as_os_str().is_empty());
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid log file path: {}", path.display()))?;
            let appender =
                tracing_appender::rolling::never(directory.unwrap_or(Path::new(".")), file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    };

    let frame_length = Duration::from_millis(args.frame_ms);
    let solver = match args.solver {
        SolverArg::Bfs => Solver::Bfs,
        SolverArg::Dfs => Solver::Dfs,
        SolverArg::Dijkstra => Solver::Dijkstra,
        SolverArg::Astar => Solver::AStar {
            bidirectional: !args.unidirectional,
        },
    };

    let timer = Instant::now();
    let mut generator = MazeGenerator::new(args.width, args.height, args.difficulty.into())?
        .with_seed(args.seed);
    if args.animate {
        generator = generator.on_progress(Observer::new().on_progress(move |grid: &Grid| {
            if let Err(e) = render_frame(&grid_frame(grid), frame_length) {
                tracing::warn!("Failed to render frame: {}", e);
            }
        }));
    }
    let grid = generator.generate()?;
    tracing::debug!("Generation took {:?}", timer.elapsed());

    let mut maze_solver = MazeSolver::new(&grid);
    let timer = Instant::now();
    let path = if args.animate {
        let mut observer = Observer::new().on_progress(move |frame: &Visualization| {
            if let Err(e) = render_frame(frame, frame_length) {
                tracing::warn!("Failed to render frame: {}", e);
            }
        });
        maze_solver.solve_with(solver, &mut observer)?
    } else {
        maze_solver.solve(solver)?
    };
    tracing::debug!("Solving took {:?}", timer.elapsed());

    let mut stdout = stdout();
    if args.animate {
        queue!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
        )?;
    }
    write!(stdout, "{}", maze_solver.visualization())?;
    write!(
        stdout,
        "{}x{} {} maze, {}: ",
        generator.width(),
        generator.height(),
        generator.difficulty(),
        solver
    )?;
    match path {
        Some(path) => writeln!(
            stdout,
            "path of {} cells, {} cells explored",
            path.len(),
            maze_solver.explored_cells().len()
        )?,
        None => writeln!(stdout, "no path found")?,
    }
    stdout.flush()?;
    Ok(())
}
