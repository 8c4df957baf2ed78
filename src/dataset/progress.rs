use tracing::info;

/// Sink for preload progress. The dataset reports the total up front and
/// one tick per decoded sample; nothing is read back.
pub trait Progress {
    fn begin(&mut self, total: usize);
    fn advance(&mut self, done: usize);
    fn finish(&mut self);
}

/// Default sink: logs roughly every tenth of the total via tracing.
pub struct LogProgress {
    total: usize,
    step: usize,
}

impl LogProgress {
    pub fn new() -> Self {
        LogProgress { total: 0, step: 1 }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.step = (total / 10).max(1);
        info!(total, "preloading dataset");
    }

    fn advance(&mut self, done: usize) {
        if done % self.step == 0 {
            info!(done, total = self.total, "preload progress");
        }
    }

    fn finish(&mut self) {
        info!(total = self.total, "preload complete");
    }
}

/// Silent sink.
pub struct NoProgress;

impl Progress for NoProgress {
    fn begin(&mut self, _total: usize) {}
    fn advance(&mut self, _done: usize) {}
    fn finish(&mut self) {}
}
