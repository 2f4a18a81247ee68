//! # TourFlow インフラ層
//!
//! 外部システム（PostgreSQL）との接続と、暗号処理（パスワードハッシュ / JWT）を担当する。
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続プールとマイグレーション
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - Argon2id によるハッシュ化と検証
//! - [`token`] - アクセストークン（JWT）の発行
//! - [`repository`] - リポジトリ実装
//! - `mock` - インメモリモック（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use tourflow_infra::{db, repository::PostgresTourRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/tourflow").await?;
//!     db::run_migrations(&pool).await?;
//!     let tours = PostgresTourRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;
pub mod token;

pub use error::{InfraError, InfraErrorKind};
pub use password::{Argon2PasswordHasher, PasswordChecker, PasswordHasher};
pub use token::{AccessToken, JwtTokenIssuer, TokenIssuer};
