//! BackingStore port - 依存先の liveness だけを公開
//!
//! record はまだ memory 上にしかなく、backing store は読み書きされません。
//! ここで扱うのは「ready かどうか」のシグナルのみです。

use std::sync::atomic::{AtomicBool, Ordering};

/// BackingStore は ready かどうかを返す
///
/// # Thread Safety
/// - `Send + Sync` を要求（すべての request handler から参照される）
pub trait BackingStore: Send + Sync {
    fn is_ready(&self) -> bool;
}

/// ReadinessFlag は外部から更新される ready フラグ
#[derive(Debug, Default)]
pub struct ReadinessFlag {
    ready: AtomicBool,
}

impl ReadinessFlag {
    pub fn new(ready: bool) -> Self {
        Self {
            ready: AtomicBool::new(ready),
        }
    }

    pub fn mark_ready(&self) {
        self.set(true);
    }

    pub fn mark_unavailable(&self) {
        self.set(false);
    }

    /// Set the flag, returning the previous value.
    pub fn set(&self, ready: bool) -> bool {
        self.ready.swap(ready, Ordering::AcqRel)
    }
}

impl BackingStore for ReadinessFlag {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}
