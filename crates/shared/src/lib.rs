//! # TourFlow 共有ユーティリティ
//!
//! API サーバーとインフラ層の双方から使われる、ビジネスロジックを含まない
//! 型と仕組みを提供する。
//!
//! ## モジュール構成
//!
//! - [`error_response`] - RFC 9457 Problem Details 形式のエラーレスポンス
//! - [`message_response`] - `{ "message": ... }` 形式の簡易レスポンス
//! - [`health`] - ヘルスチェック / Readiness のレスポンス型
//! - [`observability`] - トレーシング初期化とリクエストスパン
//! - `canonical_log` - リクエスト完了サマリログ（`observability` feature）

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod health;
pub mod message_response;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
pub use message_response::MessageResponse;
