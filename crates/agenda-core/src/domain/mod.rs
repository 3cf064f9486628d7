//! Domain model (timestamps, homework records, priority tiers, errors).

pub mod errors;
pub mod priority;
pub mod record;
pub mod timestamp;

pub use self::errors::AgendaError;
pub use self::priority::{PriorityPolicy, Tier, classify};
pub use self::record::{HomeworkDraft, HomeworkRecord, RecordKey, RecordSet};
pub use self::timestamp::Timestamp;
