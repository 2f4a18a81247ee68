//! # 認証ユースケース
//!
//! サインアップとログインを実装する。
//!
//! ## タイミング攻撃対策
//!
//! ログイン時にユーザーが存在しない場合もダミーハッシュで検証を実行し、
//! 処理時間を均一化する。

use std::sync::Arc;

use async_trait::async_trait;
use tourflow_domain::{
    clock::Clock,
    password::{PasswordHash, PlainPassword},
    user::{Email, NewUser, User, UserId, UserName},
};
use tourflow_infra::{
    AccessToken,
    PasswordChecker,
    PasswordHasher,
    TokenIssuer,
    repository::UserRepository,
};

use super::AuthUseCase;
use crate::error::ApiError;

/// ダミーハッシュ（有効な Argon2id 形式、どの入力とも一致しない）
const DUMMY_HASH: &str = "$argon2id$v=19$m=65536,t=1,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// サインアップの入力
pub struct SignupInput {
    pub name:     String,
    pub email:    String,
    pub password: String,
}

/// ログインの入力
pub struct LoginInput {
    pub email:    String,
    pub password: String,
}

/// ログインの結果
#[derive(Debug)]
pub struct LoginOutput {
    pub token: AccessToken,
    pub user:  User,
}

/// 認証ユースケースの実装
pub struct AuthUseCaseImpl {
    user_repository:  Arc<dyn UserRepository>,
    password_hasher:  Arc<dyn PasswordHasher>,
    password_checker: Arc<dyn PasswordChecker>,
    token_issuer:     Arc<dyn TokenIssuer>,
    clock:            Arc<dyn Clock>,
}

impl AuthUseCaseImpl {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        password_checker: Arc<dyn PasswordChecker>,
        token_issuer: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            password_checker,
            token_issuer,
            clock,
        }
    }

    /// ダミーハッシュで検証を実行する（タイミング攻撃対策）
    fn dummy_verification(&self, password: &PlainPassword) {
        let dummy_hash = PasswordHash::new(DUMMY_HASH);
        // 結果は使わない
        let _ = self.password_checker.verify(password, &dummy_hash);
    }
}

#[async_trait]
impl AuthUseCase for AuthUseCaseImpl {
    #[tracing::instrument(skip_all)]
    async fn signup(&self, input: SignupInput) -> Result<(), ApiError> {
        let name = UserName::new(input.name)?;
        let email = Email::new(input.email)?;
        let password = PlainPassword::new(input.password)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(ApiError::UserAlreadyExists);
        }

        let password_hash = self.password_hasher.hash(&password)?;
        let user = User::new(NewUser {
            id: UserId::new(),
            name,
            email,
            password_hash,
            now: self.clock.now(),
        });

        // 事前チェック後に同じメールアドレスが登録された場合は一意制約で検出される
        match self.user_repository.insert(&user).await {
            Ok(()) => {}
            Err(e) if e.is_conflict() => return Err(ApiError::UserAlreadyExists),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = %user.id(), "ユーザーを登録しました");
        Ok(())
    }

    #[tracing::instrument(skip_all)]
    async fn login(&self, input: LoginInput) -> Result<LoginOutput, ApiError> {
        let Ok(password) = PlainPassword::new(input.password) else {
            return Err(ApiError::InvalidCredentials);
        };
        let user = match Email::new(input.email) {
            Ok(email) => self.user_repository.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            self.dummy_verification(&password);
            return Err(ApiError::InvalidCredentials);
        };

        let result = self.password_checker.verify(&password, user.password_hash())?;
        if !result.is_match() {
            tracing::info!(user_id = %user.id(), "パスワードが一致しませんでした");
            return Err(ApiError::InvalidCredentials);
        }

        let token = self.token_issuer.issue(user.id(), self.clock.now())?;
        Ok(LoginOutput { token, user })
    }
}
