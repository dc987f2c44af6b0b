use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{period::Period, storage::KeyValueStore, summary};

use super::Record;

pub const EXPENSES_KEY: &str = "expenses";
pub const INCOMES_KEY: &str = "incomes";

/// Callback invoked with the full collection after every mutation.
pub type Listener = Box<dyn Fn(&[Record])>;

/// In-memory collection of records bound to one key in the persistence
/// backend. Every mutation rewrites the stored JSON synchronously before
/// notifying subscribers, so observers and storage always agree.
pub struct RecordStore {
    key: String,
    records: Vec<Record>,
    kv: Arc<dyn KeyValueStore>,
    listeners: Vec<Listener>,
}

impl RecordStore {
    /// Loads the collection stored under `key`. Missing or corrupt stored
    /// text yields an empty collection; corruption is logged, not raised.
    pub fn load(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let records = match kv.get(&key) {
            Some(data) => match serde_json::from_str(&data) {
                Ok(records) => records,
                Err(err) => {
                    tracing::warn!(key, %err, "discarding corrupt record collection");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Self {
            key,
            records,
            kv,
            listeners: Vec::new(),
        }
    }

    pub fn expenses(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::load(kv, EXPENSES_KEY)
    }

    pub fn incomes(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::load(kv, INCOMES_KEY)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Registers an observer invoked after every mutation.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    /// Inserts a new record at the front of the collection.
    pub fn add(&mut self, record: Record) -> Uuid {
        let id = record.id;
        self.records.insert(0, record);
        self.persist();
        self.notify();
        id
    }

    /// Replaces the record with the matching id. The id itself is immutable
    /// and survives the edit. Returns whether a record was found.
    pub fn edit(&mut self, id: Uuid, updated: Record) -> bool {
        match self.records.iter_mut().find(|record| record.id == id) {
            Some(existing) => {
                *existing = Record { id, ..updated };
                self.persist();
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Removes the record with the matching id. Returns whether one existed.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        if self.records.len() == before {
            return false;
        }
        self.persist();
        self.notify();
        true
    }

    /// Clears the whole collection. Safe to call repeatedly.
    pub fn reset(&mut self) {
        self.records.clear();
        self.persist();
        self.notify();
    }

    /// Records inside the rolling budget window for `period`, most recent
    /// first. Ties on the timestamp keep their stored order.
    pub fn filtered(&self, period: Period, now: DateTime<Utc>) -> Vec<&Record> {
        let window = period.rolling_window(now);
        let mut dated: Vec<(&Record, DateTime<Utc>)> = summary::filter_by_window(&self.records, &window)
            .into_iter()
            .filter_map(|record| record.parsed_date().map(|date| (record, date)))
            .collect();
        dated.sort_by(|a, b| b.1.cmp(&a.1));
        dated.into_iter().map(|(record, _)| record).collect()
    }

    /// Live spend for `period`: the sum of amounts inside its rolling
    /// window. This is always recomputed; stored budget `spent` figures are
    /// never consulted.
    pub fn spent(&self, period: Period, now: DateTime<Utc>) -> f64 {
        let window = period.rolling_window(now);
        summary::sum_amounts(summary::filter_by_window(&self.records, &window))
    }

    fn persist(&self) {
        match serde_json::to_string(&self.records) {
            Ok(json) => self.kv.set(&self.key, &json),
            Err(err) => tracing::error!(key = %self.key, %err, "failed to serialize records"),
        }
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.records);
        }
    }
}
