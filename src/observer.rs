use std::{borrow::Borrow, fmt, num::NonZeroUsize};

use crate::error::{MazeError, Result};

/// Progress callback plus cancellation check, invoked by the generator and the
/// solvers at a fixed cadence.
///
/// Every call to [`Observer::step`] advances a counter. On every `interval`-th
/// step the cancellation check runs first and, if it does not cancel, the
/// progress callback receives a read-only snapshot. Snapshots are only built
/// when a callback is installed.
pub struct Observer<'a, T> {
    interval: Option<NonZeroUsize>,
    steps: usize,
    on_progress: Option<Box<dyn FnMut(&T) + 'a>>,
    is_cancelled: Option<Box<dyn FnMut() -> bool + 'a>>,
}

impl<T> Default for Observer<'_, T> {
    fn default() -> Self {
        Self {
            interval: None,
            steps: 0,
            on_progress: None,
            is_cancelled: None,
        }
    }
}

impl<T> fmt::Debug for Observer<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("interval", &self.interval)
            .field("steps", &self.steps)
            .field("on_progress", &self.on_progress.is_some())
            .field("is_cancelled", &self.is_cancelled.is_some())
            .finish()
    }
}

impl<'a, T> Observer<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify on every `interval`-th step instead of the caller's default cadence.
    /// An interval of zero is treated as one.
    pub fn every(mut self, interval: usize) -> Self {
        self.interval = Some(NonZeroUsize::new(interval).unwrap_or(NonZeroUsize::MIN));
        self
    }

    pub fn on_progress(mut self, callback: impl FnMut(&T) + 'a) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Install a check which aborts the running operation with
    /// [`MazeError::Cancelled`] once it returns `true`.
    pub fn cancel_when(mut self, check: impl FnMut() -> bool + 'a) -> Self {
        self.is_cancelled = Some(Box::new(check));
        self
    }

    /// Cadence in use, falling back to `default` when none was configured.
    pub fn interval_or(&self, default: NonZeroUsize) -> NonZeroUsize {
        self.interval.unwrap_or(default)
    }

    /// Starts a new run: resets the step counter and fixes the cadence.
    pub(crate) fn begin(&mut self, default_interval: NonZeroUsize) {
        self.steps = 0;
        self.interval = Some(self.interval_or(default_interval));
    }

    /// Number of steps taken in the current run.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub(crate) fn step<S: Borrow<T>>(&mut self, snapshot: impl FnOnce() -> S) -> Result<()> {
        self.steps += 1;
        let interval = self.interval.map_or(1, NonZeroUsize::get);
        if self.steps % interval != 0 {
            return Ok(());
        }
        if let Some(is_cancelled) = self.is_cancelled.as_mut() {
            if is_cancelled() {
                tracing::debug!("[observer] Cancelled after {} steps", self.steps);
                return Err(MazeError::Cancelled);
            }
        }
        if let Some(on_progress) = self.on_progress.as_mut() {
            on_progress(snapshot().borrow());
        }
        Ok(())
    }
}
