use std::num::NonZeroUsize;

use rand::{Rng, SeedableRng, rngs::StdRng};

mod kruskal;
pub mod union_find;

use crate::{error::Result, maze::Grid, observer::Observer};
use kruskal::randomized_kruskal;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Policy deciding the order in which candidate walls are considered.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Shuffle, then stable-sort by the straight-path key.
    Easy,
    /// A single uniform shuffle.
    #[default]
    Normal,
    /// Two additional shuffles after the initial one.
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Normal => write!(f, "Normal"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Builds perfect mazes with randomized Kruskal's algorithm.
pub struct MazeGenerator<'a> {
    width: usize,
    height: usize,
    difficulty: Difficulty,
    seed: Option<u64>,
    observer: Observer<'a, Grid>,
}

impl<'a> MazeGenerator<'a> {
    /// Wall removals between two progress notifications, unless the observer
    /// sets its own cadence.
    pub const PROGRESS_INTERVAL: NonZeroUsize = NonZeroUsize::new(50).unwrap();

    /// Validates the dimensions up front; no grid is allocated until generation.
    pub fn new(width: usize, height: usize, difficulty: Difficulty) -> Result<Self> {
        // Allocation-free check of the same constraints `Grid::new` enforces
        Grid::check_dimensions(width, height)?;
        Ok(MazeGenerator {
            width,
            height,
            difficulty,
            seed: None,
            observer: Observer::new(),
        })
    }

    /// Fixes the random seed; `None` draws from OS entropy on every run.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Installs an observer which sees the grid while walls are being removed.
    pub fn on_progress(mut self, observer: Observer<'a, Grid>) -> Self {
        self.observer = observer;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Generates a maze from the configured seed.
    pub fn generate(&mut self) -> Result<Grid> {
        let mut rng = get_rng(self.seed);
        self.generate_with_rng(&mut rng)
    }

    /// Generates a maze drawing all randomness from `rng`.
    pub fn generate_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Grid> {
        let mut grid = Grid::new(self.width, self.height)?;
        self.observer.begin(Self::PROGRESS_INTERVAL);
        tracing::debug!(
            "[generator] Generating {}x{} maze ({})",
            self.width,
            self.height,
            self.difficulty
        );

        let removed = randomized_kruskal(&mut grid, self.difficulty, rng, &mut self.observer)?;

        tracing::info!(
            "[generator] Generated {}x{} maze, removed {} walls",
            self.width,
            self.height,
            removed
        );
        Ok(grid)
    }
}

/// Generate a maze in one call.
pub fn generate_maze(
    width: usize,
    height: usize,
    difficulty: Difficulty,
    seed: Option<u64>,
) -> Result<Grid> {
    MazeGenerator::new(width, height, difficulty)?
        .with_seed(seed)
        .generate()
}
