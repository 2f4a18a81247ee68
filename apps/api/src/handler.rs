//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - ハンドラは薄く保ち、ビジネスロジックはユースケース層に委譲する

pub mod auth;
pub mod health;
pub mod tour;

pub use auth::{AuthState, login, signup};
pub use health::{ReadinessState, health_check, readiness_check};
pub use tour::{
    TourState,
    append_step,
    create_tour,
    delete_tour,
    get_tour,
    list_steps,
    list_tours,
    update_tour,
};
