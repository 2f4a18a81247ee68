//! # TourFlow ドメイン層
//!
//! ユーザーとツアー（ステップの並びで構成されるガイド付きウォークスルー）の
//! ドメインモデルを定義する。I/O には一切依存しない。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`user`] - ユーザーエンティティと値オブジェクト
//! - [`tour`] - ツアー集約と埋め込みステップ
//! - [`password`] - 平文パスワード / ハッシュ / 検証結果
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメインエラー
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tourflow_domain::tour::{NewTour, Tour, TourId, TourTitle};
//!
//! let tour = Tour::new(NewTour {
//!     id:          TourId::new(),
//!     title:       TourTitle::new("Onboarding")?,
//!     description: String::new(),
//!     published:   true,
//!     now:         chrono::Utc::now(),
//! });
//!
//! assert_eq!(tour.views(), 0);
//! assert!(tour.steps().is_empty());
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod password;
pub mod tour;
pub mod user;

pub use error::DomainError;
