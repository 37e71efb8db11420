use log::info;
use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 20;

/// Session event log: every entry goes to the `log` facade and the most
/// recent ones are kept for display.
pub struct ActivityLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl ActivityLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&mut self, message: String) {
        info!("{}", message);
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message);
    }

    /// Oldest first.
    pub fn entries(&self) -> &VecDeque<String> {
        &self.entries
    }

    pub fn recent(&self, count: usize) -> impl Iterator<Item = &String> {
        self.entries.iter().rev().take(count)
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_entries_fall_off() {
        let mut log = ActivityLog::with_capacity(3);
        for i in 0..5 {
            log.record(format!("event {i}"));
        }
        assert_eq!(log.entries().len(), 3);
        assert_eq!(log.entries().front().unwrap(), "event 2");
        assert_eq!(log.recent(1).next().unwrap(), "event 4");
    }
}
