//! agenda-core
//!
//! Core building blocks for the homework agenda service.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（timestamp, record, priority, errors）
//! - **store**: RecordStore trait + in-memory implementation + bootstrap data
//! - **gate**: リクエスト単位の判定（AccessGate, availability check）
//! - **ports**: 外部との境界（BackingStore, AuthSessionAdapter）
//!
//! HTTP の配線は `agenda-server` 側にあり、このクレートは I/O を持たない。

pub mod domain;
pub mod gate;
pub mod ports;
pub mod store;

pub use domain::{
    AgendaError, HomeworkDraft, HomeworkRecord, PriorityPolicy, RecordKey, RecordSet, Tier,
    Timestamp, classify,
};
pub use gate::{AccessGate, GateDecision, PathClass, ensure_available};
pub use ports::{AccessToken, AuthSessionAdapter, BackingStore, ReadinessFlag, SESSION_COOKIE};
pub use store::{InMemoryRecordStore, RecordStore};
