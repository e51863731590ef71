use std::collections::VecDeque;

use shared::protocol::ActionLogEntry;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Bounded log of successful commands, oldest dropped first.
#[derive(Debug, Clone)]
pub struct ActionHistory {
    limit: usize,
    entries: VecDeque<ActionLogEntry>,
}

impl ActionHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            entries: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
        }
    }

    pub fn record(&mut self, entry: ActionLogEntry) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ActionLogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&ActionLogEntry> {
        self.entries.back()
    }

    pub fn to_vec(&self) -> Vec<ActionLogEntry> {
        self.entries.iter().cloned().collect()
    }
}
