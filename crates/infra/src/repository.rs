//! # リポジトリ実装
//!
//! ユースケース層が使うリポジトリトレイトと、その PostgreSQL 実装を提供する。
//! トレイト経由で注入するため、テストではインメモリモックに差し替えられる。

pub mod tour_repository;
pub mod user_repository;

pub use tour_repository::{PostgresTourRepository, TourRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
