//! # 認証ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /api/signup` - ユーザー登録
//! - `POST /api/login` - ログイン（アクセストークン発行）
//!
//! 入力の必須チェックはユースケース側で行うため、リクエスト型のフィールドは
//! すべて省略可能（省略時は空文字列）としている。

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tourflow_domain::user::User;
use tourflow_shared::MessageResponse;
use uuid::Uuid;

use crate::{
    error::ApiError,
    usecase::{AuthUseCase, LoginInput, SignupInput},
};

/// 認証ハンドラの共有状態
pub struct AuthState {
    pub usecase: Arc<dyn AuthUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// ユーザー登録リクエスト
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub name:     String,
    pub email:    String,
    pub password: String,
}

/// ログインリクエスト
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email:    String,
    pub password: String,
}

/// ログインユーザーの公開情報
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id:    Uuid,
    pub name:  String,
    pub email: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id:    *user.id().as_uuid(),
            name:  user.name().as_str().to_string(),
            email: user.email().as_str().to_string(),
        }
    }
}

/// ログインレスポンス
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user:  UserDto,
}

// --- ハンドラ ---

/// POST /api/signup
///
/// 成功時は 201 と確認メッセージを返す。ユーザー情報やトークンは返さない。
#[tracing::instrument(skip_all)]
pub async fn signup(
    State(state): State<Arc<AuthState>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .usecase
        .signup(SignupInput {
            name:     req.name,
            email:    req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// POST /api/login
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<Arc<AuthState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let output = state
        .usecase
        .login(LoginInput {
            email:    req.email,
            password: req.password,
        })
        .await?;

    let response = LoginResponse {
        user:  UserDto::from(&output.user),
        token: output.token.into_string(),
    };

    Ok((StatusCode::OK, Json(response)))
}
