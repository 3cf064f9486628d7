//! Homework records and the record set.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{AgendaError, Tier, Timestamp};

/// A stored homework item.
///
/// `priority` is derived from `due_date`/`sub_date` on every write; clients
/// cannot set it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeworkRecord {
    pub name: String,
    pub course: String,
    pub due_date: Timestamp,
    pub sub_date: Timestamp,
    pub priority: Tier,
}

impl HomeworkRecord {
    /// The record-set key.
    pub fn key(&self) -> Timestamp {
        self.sub_date
    }
}

/// Client payload for create/replace.
///
/// Unknown fields (including any `priority`) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeworkDraft {
    pub name: String,
    pub course: String,
    pub due_date: Timestamp,
    pub sub_date: Timestamp,
}

impl HomeworkDraft {
    /// Parse-or-fail step that runs before `upsert`.
    pub fn from_json(raw: &str) -> Result<Self, AgendaError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn into_record(self, priority: Tier) -> HomeworkRecord {
        HomeworkRecord {
            name: self.name,
            course: self.course,
            due_date: self.due_date,
            sub_date: self.sub_date,
            priority,
        }
    }
}

/// Delete payload: only `subDate` is read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordKey {
    pub sub_date: Timestamp,
}

impl RecordKey {
    pub fn from_json(raw: &str) -> Result<Self, AgendaError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Snapshot of the record set, keyed by `subDate`, in insertion order.
///
/// Serializes as a JSON object: `{"<subDate>": {record}, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordSet(IndexMap<Timestamp, HomeworkRecord>);

impl RecordSet {
    pub fn new(records: IndexMap<Timestamp, HomeworkRecord>) -> Self {
        Self(records)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &Timestamp) -> Option<&HomeworkRecord> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &Timestamp) -> bool {
        self.0.contains_key(key)
    }

    pub fn records(&self) -> impl Iterator<Item = &HomeworkRecord> {
        self.0.values()
    }
}
