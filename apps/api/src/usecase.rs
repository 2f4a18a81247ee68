//! # ユースケース層
//!
//! ハンドラから呼ばれるアプリケーションロジック。
//! リポジトリ・パスワードハッシャ・トークン発行・時計はすべてトレイト経由で注入する。

pub mod auth;
pub mod tour;

use async_trait::async_trait;
pub use auth::{AuthUseCaseImpl, LoginInput, LoginOutput, SignupInput};
pub use tour::{CreateTourInput, TourUseCaseImpl, UpdateTourInput};
use tourflow_domain::tour::{Step, Tour, TourId};

use crate::error::ApiError;

/// 認証ユースケーストレイト
#[async_trait]
pub trait AuthUseCase: Send + Sync {
    /// ユーザーを登録する
    ///
    /// 既存のメールアドレスなら `UserAlreadyExists`。
    async fn signup(&self, input: SignupInput) -> Result<(), ApiError>;

    /// 資格情報を検証してアクセストークンを発行する
    ///
    /// メールアドレス不明・パスワード不一致はどちらも `InvalidCredentials`。
    async fn login(&self, input: LoginInput) -> Result<LoginOutput, ApiError>;
}

/// ツアーユースケーストレイト
#[async_trait]
pub trait TourUseCase: Send + Sync {
    async fn create_tour(&self, input: CreateTourInput) -> Result<Tour, ApiError>;

    async fn list_tours(&self) -> Result<Vec<Tour>, ApiError>;

    /// ツアーを取得する。公開中なら閲覧数を 1 加算した結果を返す。
    async fn get_tour(&self, id: &TourId) -> Result<Tour, ApiError>;

    async fn update_tour(&self, id: &TourId, input: UpdateTourInput) -> Result<Tour, ApiError>;

    /// ツアーを削除する。存在しない ID でも成功扱い。
    async fn delete_tour(&self, id: &TourId) -> Result<(), ApiError>;

    async fn append_step(&self, id: &TourId, step: Step) -> Result<Tour, ApiError>;

    async fn list_steps(&self, id: &TourId) -> Result<Vec<Step>, ApiError>;
}
