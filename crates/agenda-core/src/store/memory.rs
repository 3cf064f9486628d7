//! In-memory record store implementation.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::Mutex;
use tracing::debug;

use super::{RecordStore, bootstrap_drafts};
use crate::domain::{
    AgendaError, HomeworkDraft, HomeworkRecord, PriorityPolicy, RecordSet, Timestamp,
};

/// In-memory record state.
struct InMemoryRecordState {
    /// All records, keyed by subDate (single source of truth).
    /// Insertion order is the listing order; an overwrite keeps its slot.
    records: IndexMap<Timestamp, HomeworkRecord>,

    policy: PriorityPolicy,
}

impl InMemoryRecordState {
    fn new(policy: PriorityPolicy) -> Self {
        Self {
            records: IndexMap::new(),
            policy,
        }
    }

    fn upsert(&mut self, draft: HomeworkDraft) -> HomeworkRecord {
        let priority = self.policy.classify(&draft.due_date, &draft.sub_date);
        let record = draft.into_record(priority);
        let key = record.key();
        // same instant may arrive in another offset: the key follows the latest write
        let replaced = match self.records.shift_remove_full(&key) {
            Some((index, _, _)) => {
                self.records.shift_insert(index, key, record.clone());
                true
            }
            None => {
                self.records.insert(key, record.clone());
                false
            }
        };
        debug!(
            sub_date = %record.sub_date,
            priority = ?record.priority,
            replaced,
            "record stored"
        );
        record
    }

    fn remove(&mut self, key: &Timestamp) -> Option<HomeworkRecord> {
        // shift_remove keeps the listing order of the remaining records
        let removed = self.records.shift_remove(key);
        debug!(sub_date = %key, found = removed.is_some(), "record removed");
        removed
    }
}

/// In-memory record store.
///
/// All operations go through one mutex, so concurrent handlers on a
/// multi-thread runtime never observe a half-applied write.
pub struct InMemoryRecordStore {
    state: Mutex<InMemoryRecordState>,
}

impl InMemoryRecordStore {
    pub fn new(policy: PriorityPolicy) -> Self {
        Self {
            state: Mutex::new(InMemoryRecordState::new(policy)),
        }
    }

    /// Store pre-loaded with the bootstrap records.
    pub fn seeded(policy: PriorityPolicy) -> Result<Self, AgendaError> {
        let mut state = InMemoryRecordState::new(policy);
        for draft in bootstrap_drafts()? {
            state.upsert(draft);
        }
        Ok(Self {
            state: Mutex::new(state),
        })
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new(PriorityPolicy::standard())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list(&self) -> Result<RecordSet, AgendaError> {
        let state = self.state.lock().await;
        Ok(RecordSet::new(state.records.clone()))
    }

    async fn upsert(&self, draft: HomeworkDraft) -> Result<HomeworkRecord, AgendaError> {
        let mut state = self.state.lock().await;
        Ok(state.upsert(draft))
    }

    async fn remove(&self, key: &Timestamp) -> Result<Option<HomeworkRecord>, AgendaError> {
        let mut state = self.state.lock().await;
        Ok(state.remove(key))
    }

    async fn len(&self) -> Result<usize, AgendaError> {
        let state = self.state.lock().await;
        Ok(state.records.len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{Tier, classify};

    fn draft(name: &str, due: &str, sub: &str) -> HomeworkDraft {
        HomeworkDraft {
            name: name.to_string(),
            course: "Webware".to_string(),
            due_date: Timestamp::parse(due).unwrap(),
            sub_date: Timestamp::parse(sub).unwrap(),
        }
    }

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[tokio::test]
    async fn seeded_store_lists_bootstrap_in_order() {
        let store = InMemoryRecordStore::seeded(PriorityPolicy::standard()).unwrap();
        let set = store.list().await.unwrap();

        let names: Vec<_> = set.records().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a2-shortstack", "CSS Grid Garden", "Project 2"]);

        let tiers: Vec<_> = set.records().map(|r| r.priority).collect();
        assert_eq!(tiers, vec![Tier::High, Tier::High, Tier::Low]);
        for record in set.records() {
            assert_eq!(record.priority, classify(&record.due_date, &record.sub_date));
        }
    }

    #[tokio::test]
    async fn upsert_derives_priority() {
        let store = InMemoryRecordStore::default();
        let due = "2021-09-09T11:59:00-0400";

        let high = store
            .upsert(draft("a", due, "2021-09-08T11:59:00-0400"))
            .await
            .unwrap();
        let medium = store
            .upsert(draft("b", due, "2021-09-06T11:59:00-0400"))
            .await
            .unwrap();
        let low = store
            .upsert(draft("c", due, "2021-09-01T11:59:00-0400"))
            .await
            .unwrap();

        assert_eq!(high.priority, Tier::High);
        assert_eq!(medium.priority, Tier::Medium);
        assert_eq!(low.priority, Tier::Low);
        assert_eq!(store.len().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn upsert_same_key_overwrites() {
        let store = InMemoryRecordStore::default();
        let sub = "2021-09-06T11:59:00-0400";
        store
            .upsert(draft("first", "2021-09-09T11:59:00-0400", sub))
            .await
            .unwrap();
        store
            .upsert(draft("other", "2021-09-09T11:59:00-0400", "2021-09-07T00:00:00-0400"))
            .await
            .unwrap();
        let replaced = store
            .upsert(draft("second", "2021-09-07T11:59:00-0400", sub))
            .await
            .unwrap();

        let set = store.list().await.unwrap();
        assert_eq!(set.len(), 2);
        let stored = set.get(&ts(sub)).unwrap();
        assert_eq!(stored, &replaced);
        assert_eq!(stored.name, "second");
        assert_eq!(stored.priority, Tier::High);
        // overwrite keeps the first slot
        assert_eq!(set.records().next().unwrap().name, "second");
    }

    #[tokio::test]
    async fn same_instant_in_another_offset_is_the_same_key() {
        let store = InMemoryRecordStore::default();
        store
            .upsert(draft("a", "2021-09-09T11:59:00-0400", "2021-09-08T11:59:00-0400"))
            .await
            .unwrap();
        store
            .upsert(draft("b", "2021-09-09T11:59:00-0400", "2021-09-08T15:59:00Z"))
            .await
            .unwrap();
        store
            .upsert(draft("c", "2021-09-09T11:59:00-0400", "2021-09-08T12:00:00-0400"))
            .await
            .unwrap();
        assert_eq!(store.len().await.unwrap(), 2);

        let set = store.list().await.unwrap();
        let names: Vec<_> = set.records().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);

        let json = serde_json::to_value(&set).unwrap();
        assert!(json.get("2021-09-08T11:59:00-0400").is_none());
        assert_eq!(json["2021-09-08T15:59:00+0000"]["name"], "b");
        assert_eq!(json["2021-09-08T15:59:00+0000"]["subDate"], "2021-09-08T15:59:00+0000");
    }

    #[tokio::test]
    async fn remove_deletes_key() {
        let store = InMemoryRecordStore::seeded(PriorityPolicy::standard()).unwrap();
        let key = ts("2021-09-08T12:00:00-0400");

        let removed = store.remove(&key).await.unwrap();
        assert_eq!(removed.unwrap().name, "CSS Grid Garden");

        let set = store.list().await.unwrap();
        assert!(!set.contains_key(&key));
        let names: Vec<_> = set.records().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a2-shortstack", "Project 2"]);
    }

    #[tokio::test]
    async fn remove_absent_key_is_none() {
        let store = InMemoryRecordStore::seeded(PriorityPolicy::standard()).unwrap();
        let removed = store.remove(&ts("2030-01-01T00:00:00Z")).await.unwrap();
        assert!(removed.is_none());
        assert_eq!(store.len().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn concurrent_upserts_keep_one_record_per_key() {
        let store = Arc::new(InMemoryRecordStore::default());
        let mut handles = Vec::new();
        for i in 0..32u32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                // 8 distinct keys, each written 4 times
                let sub = format!("2021-09-0{}T10:00:00-0400", i % 8 + 1);
                store
                    .upsert(draft(&format!("hw-{i}"), "2021-09-09T11:59:00-0400", &sub))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.len().await.unwrap(), 8);
    }
}
