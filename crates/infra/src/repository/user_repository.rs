//! # UserRepository
//!
//! ユーザーの永続化を担当するリポジトリ。
//!
//! メールアドレスの一意性は `users_email_key` 制約で保証する。
//! 事前チェックをすり抜けた同時登録は、挿入時の一意制約違反を
//! [`InfraError::conflict`] に変換して呼び出し元へ返す。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tourflow_domain::{
    password::PasswordHash,
    user::{Email, User, UserId, UserName, UserRecord},
};
use uuid::Uuid;

use crate::error::InfraError;

/// メールアドレスの一意制約名
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// メールアドレス（完全一致）でユーザーを検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(user))`: ユーザーが見つかった場合
    /// - `Ok(None)`: ユーザーが見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError>;

    /// ユーザーを登録する
    ///
    /// メールアドレスが既に使われている場合は `Conflict` を返す。
    async fn insert(&self, user: &User) -> Result<(), InfraError>;
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id:            Uuid,
    name:          String,
    email:         String,
    password_hash: String,
    created_at:    DateTime<Utc>,
    updated_at:    DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = InfraError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User::from_db(UserRecord {
            id:            UserId::from_uuid(row.id),
            name:          UserName::new(row.name).map_err(|e| InfraError::unexpected(e.to_string()))?,
            email:         Email::new(row.email).map_err(|e| InfraError::unexpected(e.to_string()))?,
            password_hash: PasswordHash::new(row.password_hash),
            created_at:    row.created_at,
            updated_at:    row.updated_at,
        }))
    }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(user_id = %user.id()))]
    async fn insert(&self, user: &User) -> Result<(), InfraError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.name().as_str())
        .bind(user.email().as_str())
        .bind(user.password_hash().as_str())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e, EMAIL_UNIQUE_CONSTRAINT) => {
                Err(InfraError::conflict("User", user.email().as_str()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// 指定した一意制約への違反かどうか
fn is_unique_violation(error: &sqlx::Error, constraint: &str) -> bool {
    match error {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
