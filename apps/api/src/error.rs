//! # API エラー定義
//!
//! ユースケース・ハンドラが返すエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラーの階層
//!
//! ```text
//! DomainError / InfraError
//!        ↓ From
//! ApiError
//!        ↓ IntoResponse
//! HTTP レスポンス（RFC 9457 ErrorResponse）
//! ```
//!
//! ## マッピング
//!
//! | ApiError | HTTP Status | detail |
//! |----------|-------------|--------|
//! | `BadRequest` | 400 | 入力エラーの内容 |
//! | `UserAlreadyExists` | 400 | `User already exists` |
//! | `InvalidCredentials` | 400 | `Invalid credentials` |
//! | `NotFound` | 404 | `Tour not found` など |
//! | `Database` | 500 | `Server error`（固定） |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tourflow_domain::DomainError;
use tourflow_infra::InfraError;
use tourflow_shared::ErrorResponse;

/// API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 入力が不正
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 既に登録済みのメールアドレス
    #[error("ユーザーは既に存在します")]
    UserAlreadyExists,

    /// メールアドレスまたはパスワードが一致しない
    #[error("認証情報が不正です")]
    InvalidCredentials,

    /// リソースが存在しない
    #[error("{entity} が見つかりません")]
    NotFound { entity: &'static str },

    /// インフラ層のエラー
    #[error("インフラエラー: {0}")]
    Database(#[from] InfraError),
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation(msg) => Self::BadRequest(msg),
            DomainError::NotFound { entity_type, .. } => Self::NotFound {
                entity: entity_type,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::BadRequest(msg) => ErrorResponse::bad_request(msg.clone()),
            ApiError::UserAlreadyExists => ErrorResponse::new(
                "user-already-exists",
                "User Already Exists",
                400,
                "User already exists",
            ),
            ApiError::InvalidCredentials => ErrorResponse::new(
                "invalid-credentials",
                "Invalid Credentials",
                400,
                "Invalid credentials",
            ),
            ApiError::NotFound { entity } => ErrorResponse::not_found(format!("{entity} not found")),
            ApiError::Database(e) => {
                tracing::error!(
                    error.kind = "infrastructure",
                    span_trace = %e.span_trace(),
                    "インフラエラー: {}",
                    e
                );
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}
