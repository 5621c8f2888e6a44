use std::collections::{BTreeMap, VecDeque};

use blixt_core::Phase;

use crate::strike::StrikeCategory;

/// What kind of storm event occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StormEventKind {
    /// The storm moved to another step.
    PhaseChanged {
        /// The previous step.
        from: Phase,
        /// The new step.
        to: Phase,
    },
    /// A strike became visible.
    StrikeFired {
        /// The kind of discharge.
        category: StrikeCategory,
    },
    /// The flash of the current strike ended.
    StrikeCleared,
}

/// One entry in the storm log.
#[derive(Debug, Clone)]
pub struct StormEvent {
    /// Frame counter when it happened.
    pub frame: u64,
    /// What happened.
    pub kind: StormEventKind,
    /// Short text for logs and reports.
    pub description: String,
}

impl StormEvent {
    /// Record `kind` at `frame`.
    pub fn new(frame: u64, kind: StormEventKind, description: impl Into<String>) -> Self {
        Self {
            frame,
            kind,
            description: description.into(),
        }
    }
}

/// Bounded history of storm events, newest last.
///
/// A capacity of zero keeps everything.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: VecDeque<StormEvent>,
    capacity: usize,
}

impl EventLog {
    /// An empty log holding at most `capacity` events.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Record an event, evicting the oldest once full.
    pub fn push(&mut self, event: StormEvent) {
        if self.capacity > 0 && self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(event);
    }

    /// Events from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &StormEvent> {
        self.entries.iter()
    }

    /// The most recent event.
    pub fn last(&self) -> Option<&StormEvent> {
        self.entries.back()
    }

    /// How many strikes of each category are in the log.
    pub fn strike_counts(&self) -> BTreeMap<StrikeCategory, usize> {
        self.iter()
            .filter_map(|event| match event.kind {
                StormEventKind::StrikeFired { category } => Some(category),
                _ => None,
            })
            .fold(BTreeMap::new(), |mut counts, category| {
                *counts.entry(category).or_insert(0) += 1;
                counts
            })
    }

    /// Number of events held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded since the last clear.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
