//! Bounded log of state changes.
//!
//! The log is diagnostic only: it never influences which state a
//! "return to previous" transition resolves to.

use super::state::{State, StateId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single state change.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransitionRecord {
    /// Name of the state that was exited
    pub from: String,
    pub from_id: StateId,
    /// Name of the state that was entered
    pub to: String,
    pub to_id: StateId,
    /// Tick during which the change happened (1-based)
    pub tick: u64,
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    pub fn new<T>(from: &State<T>, to: &State<T>, tick: u64) -> Self {
        Self {
            from: from.name().to_string(),
            from_id: from.id(),
            to: to.name().to_string(),
            to_id: to.id(),
            tick,
            timestamp: Utc::now(),
        }
    }
}

/// Ring buffer of the most recent state changes.
///
/// # Example
///
/// ```rust
/// use demeanor::core::{State, TransitionLog, TransitionRecord};
///
/// let idle = State::<()>::empty("Idle");
/// let walk = State::<()>::empty("Walk");
///
/// let mut log = TransitionLog::with_capacity(2);
/// log.record(TransitionRecord::new(&idle, &walk, 1));
/// log.record(TransitionRecord::new(&walk, &idle, 2));
/// log.record(TransitionRecord::new(&idle, &walk, 3));
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.path(), vec!["Walk", "Idle", "Walk"]);
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct TransitionLog {
    capacity: usize,
    records: VecDeque<TransitionRecord>,
}

impl Default for TransitionLog {
    fn default() -> Self {
        Self::with_capacity(crate::config::DEFAULT_HISTORY_CAPACITY)
    }
}

impl TransitionLog {
    /// Create an empty log keeping at most `capacity` records.
    ///
    /// A capacity of zero disables recording. Storage grows on demand, so
    /// the capacity is only an upper bound.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::new(),
        }
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    /// State names traversed by the retained records: the source of the
    /// oldest record, then the target of each record.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Wall-clock time between the oldest and newest retained record.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
