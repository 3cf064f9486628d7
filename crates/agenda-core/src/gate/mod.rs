//! Gate - リクエスト単位の判定
//!
//! サーバーはリクエストごとに次の順で評価します：
//! 1. availability: backing store が ready でなければ 503
//! 2. access: path と session cookie の有無から allow / redirect を決定
//!
//! どちらも純粋な判定で、I/O は持ちません。

pub mod access;
pub mod availability;

pub use self::access::{AccessGate, GateDecision, PathClass};
pub use self::availability::ensure_available;
