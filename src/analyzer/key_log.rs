//! Ordered log of key events and the per-label press counter.

use itertools::Itertools;
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Down,
    Up,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyLogEntry {
    pub id: u64,
    pub timestamp_ms: u64,
    pub display: String,
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
    pub code: String,
}

/// Entries in arrival order. With a capacity set, the oldest entries are dropped first. Ids keep
/// increasing across evictions and are only restarted by [`KeyLog::clear`].
#[derive(Debug, Clone, Default)]
pub struct KeyLog {
    entries: VecDeque<KeyLogEntry>,
    max_entries: Option<usize>,
    next_id: u64,
}

impl KeyLog {
    /// `max_entries == 0` means unbounded.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: (max_entries > 0).then_some(max_entries),
            next_id: 0,
        }
    }

    pub fn push(
        &mut self,
        timestamp_ms: u64,
        kind: EntryKind,
        display: String,
        code: String,
        delay_ms: Option<u64>,
    ) -> &KeyLogEntry {
        if let Some(max) = self.max_entries {
            while self.entries.len() >= max {
                self.entries.pop_front();
            }
        }
        self.entries.push_back(KeyLogEntry {
            id: self.next_id,
            timestamp_ms,
            display,
            kind,
            delay_ms,
            code,
        });
        self.next_id += 1;
        &self.entries[self.entries.len() - 1]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_id = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &KeyLogEntry> {
        self.entries.iter()
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &KeyLogEntry> {
        self.entries.iter().rev()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCount {
    pub key: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default)]
pub struct KeyFrequency {
    /// label -> (count, first seen order)
    counts: HashMap<String, (u64, u64)>,
    seen: u64,
}

impl KeyFrequency {
    pub fn record(&mut self, label: &str) -> u64 {
        if let Some((count, _)) = self.counts.get_mut(label) {
            *count += 1;
            return *count;
        }
        self.counts.insert(label.to_owned(), (1, self.seen));
        self.seen += 1;
        1
    }

    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).map(|(c, _)| *c).unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.counts.clear();
        self.seen = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Highest count; ties go to the label seen first.
    pub fn most_frequent(&self) -> Option<KeyCount> {
        self.top_n(1).into_iter().next()
    }

    pub fn top_n(&self, n: usize) -> Vec<KeyCount> {
        self.counts
            .iter()
            .sorted_by(|(_, (c1, o1)), (_, (c2, o2))| c2.cmp(c1).then(o1.cmp(o2)))
            .take(n)
            .map(|(key, (count, _))| KeyCount {
                key: key.clone(),
                count: *count,
            })
            .collect()
    }
}
