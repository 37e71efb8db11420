/// Running counters for the marker lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionMetrics {
    placed: usize,
    removed: usize,
    cleared: usize,
}

impl SessionMetrics {
    pub fn record_placed(&mut self) {
        self.placed += 1;
    }

    pub fn record_removed(&mut self) {
        self.removed += 1;
    }

    /// Counts clear actions that actually dropped markers.
    pub fn record_cleared(&mut self, dropped: usize) {
        if dropped > 0 {
            self.cleared += 1;
        }
    }

    pub fn placed(&self) -> usize {
        self.placed
    }

    pub fn removed(&self) -> usize {
        self.removed
    }

    pub fn cleared(&self) -> usize {
        self.cleared
    }

    pub fn snapshot(&self) -> (usize, usize, usize) {
        (self.placed, self.removed, self.cleared)
    }
}
