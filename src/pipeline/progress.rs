// Progress reporting hook for the fragment scoring loop.
//
// The pipeline stays free of terminal concerns; the CLI plugs a progress bar
// in through this trait.

/// Receives progress as fragments are scored.
pub trait Progress {
    /// Scoring is about to begin over `total` fragments.
    fn start(&self, total: usize);
    /// One more fragment has been scored.
    fn advance(&self);
    /// Scoring finished.
    fn finish(&self);
}

/// Discards all progress events.
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&self, _total: usize) {}
    fn advance(&self) {}
    fn finish(&self) {}
}
