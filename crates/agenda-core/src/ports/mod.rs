//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! core は外部システム（backing store, OAuth provider）の詳細を知らず、
//! 判定に必要な値（ready かどうか、token の有無）だけを受け取ります。
//!
//! # 実装
//! - **ReadinessFlag**: BackingStore の最小実装（probe が更新する）
//! - AuthSessionAdapter の本番実装は `agenda-server` の GitHub adapter

pub mod auth_session;
pub mod backing_store;

// 主要な trait を再エクスポート
pub use self::auth_session::{AccessToken, AuthSessionAdapter, SESSION_COOKIE};
pub use self::backing_store::{BackingStore, ReadinessFlag};
