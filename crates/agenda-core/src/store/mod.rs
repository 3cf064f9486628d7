//! Store module: the RecordStore port, its in-memory implementation, and the
//! bootstrap record set.

mod memory;
mod seed;

pub use memory::InMemoryRecordStore;
pub use seed::bootstrap_drafts;

use async_trait::async_trait;

use crate::domain::{AgendaError, HomeworkDraft, HomeworkRecord, RecordSet, Timestamp};

/// RecordStore port (interface).
/// Records live in memory today; this trait is the seam for a persistent
/// implementation later.
///
/// Design intent:
/// - The store owns priority derivation: callers hand over a draft, never a tier.
/// - `upsert` backs both create and replace.
/// - `remove` of an absent key is not an error here; the caller decides.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Snapshot in insertion order.
    async fn list(&self) -> Result<RecordSet, AgendaError>;

    /// Classify and store under `draft.sub_date`, overwriting any existing record.
    async fn upsert(&self, draft: HomeworkDraft) -> Result<HomeworkRecord, AgendaError>;

    /// Remove by key, returning the removed record if there was one.
    async fn remove(&self, key: &Timestamp) -> Result<Option<HomeworkRecord>, AgendaError>;

    async fn len(&self) -> Result<usize, AgendaError>;
}
