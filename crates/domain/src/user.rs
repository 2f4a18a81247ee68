//! # ユーザー
//!
//! サインアップで作成され、ログインで認証されるアカウント。
//!
//! ## 不変条件
//!
//! - `email` はシステム全体で一意（永続化層の一意制約で保証する）
//! - パスワードはハッシュ化された形でのみ保持する

use chrono::{DateTime, Utc};

use crate::password::PasswordHash;

define_uuid_id! {
    /// ユーザー ID
    pub struct UserId;
}

define_required_string! {
    /// 表示名
    pub struct UserName {
        label: "Name",
    }
}

define_required_string! {
    /// メールアドレス
    ///
    /// 形式チェックは行わず、存在のみを要求する。一意性の判定は完全一致。
    pub struct Email {
        label: "Email",
    }
}

/// ユーザー作成パラメータ
pub struct NewUser {
    pub id:            UserId,
    pub name:          UserName,
    pub email:         Email,
    pub password_hash: PasswordHash,
    pub now:           DateTime<Utc>,
}

/// DB から復元する際のパラメータ
pub struct UserRecord {
    pub id:            UserId,
    pub name:          UserName,
    pub email:         Email,
    pub password_hash: PasswordHash,
    pub created_at:    DateTime<Utc>,
    pub updated_at:    DateTime<Utc>,
}

/// ユーザーエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:            UserId,
    name:          UserName,
    email:         Email,
    password_hash: PasswordHash,
    created_at:    DateTime<Utc>,
    updated_at:    DateTime<Utc>,
}

impl User {
    /// 新しいユーザーを作成する
    pub fn new(params: NewUser) -> Self {
        Self {
            id:            params.id,
            name:          params.name,
            email:         params.email,
            password_hash: params.password_hash,
            created_at:    params.now,
            updated_at:    params.now,
        }
    }

    /// 既存のデータからユーザーを復元する
    pub fn from_db(record: UserRecord) -> Self {
        Self {
            id:            record.id,
            name:          record.name,
            email:         record.email,
            password_hash: record.password_hash,
            created_at:    record.created_at,
            updated_at:    record.updated_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
