//! # テスト用モック
//!
//! ユースケース / ハンドラのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! tourflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tourflow_domain::{
    password::{PasswordHash, PasswordVerifyResult, PlainPassword},
    tour::{Step, Tour, TourId, TourReplacement},
    user::{Email, User},
};

use crate::{
    error::InfraError,
    password::{PasswordChecker, PasswordHasher},
    repository::{TourRepository, UserRepository},
};

// ===== MockUserRepository =====

/// メールアドレスの一意性を模倣するユーザーリポジトリ
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されているユーザー数
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// 保存されているユーザーのスナップショット
    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email() == email)
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), InfraError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email() == user.email()) {
            return Err(InfraError::conflict("User", user.email().as_str()));
        }
        users.push(user.clone());
        Ok(())
    }
}

// ===== MockTourRepository =====

/// 挿入順を保持するツアーリポジトリ
#[derive(Clone, Default)]
pub struct MockTourRepository {
    tours: Arc<Mutex<Vec<Tour>>>,
}

impl MockTourRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// ID に一致するツアーを変換して置き換え、結果を返す
    fn update_with(&self, id: &TourId, f: impl FnOnce(Tour) -> Tour) -> Option<Tour> {
        let mut tours = self.tours.lock().unwrap();
        let pos = tours.iter().position(|t| t.id() == id)?;
        let updated = f(tours[pos].clone());
        tours[pos] = updated.clone();
        Some(updated)
    }
}

#[async_trait]
impl TourRepository for MockTourRepository {
    async fn find_all(&self) -> Result<Vec<Tour>, InfraError> {
        Ok(self.tours.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &TourId) -> Result<Option<Tour>, InfraError> {
        Ok(self
            .tours
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id() == id)
            .cloned())
    }

    async fn insert(&self, tour: &Tour) -> Result<(), InfraError> {
        self.tours.lock().unwrap().push(tour.clone());
        Ok(())
    }

    async fn record_view(
        &self,
        id: &TourId,
        now: DateTime<Utc>,
    ) -> Result<Option<Tour>, InfraError> {
        Ok(self.update_with(id, |tour| tour.record_view(now)))
    }

    async fn replace(
        &self,
        id: &TourId,
        replacement: &TourReplacement,
        now: DateTime<Utc>,
    ) -> Result<Option<Tour>, InfraError> {
        Ok(self.update_with(id, |tour| tour.replace(replacement.clone(), now)))
    }

    async fn append_step(
        &self,
        id: &TourId,
        step: &Step,
        now: DateTime<Utc>,
    ) -> Result<Option<Tour>, InfraError> {
        Ok(self.update_with(id, |tour| tour.with_step_appended(step.clone(), now)))
    }

    async fn delete(&self, id: &TourId) -> Result<(), InfraError> {
        self.tours.lock().unwrap().retain(|t| t.id() != id);
        Ok(())
    }
}

// ===== MockPasswordHasher =====

/// Argon2 を使わない高速なハッシュ実装
///
/// 平文そのものは保存しないが、暗号学的な強度はない。
#[derive(Clone, Copy, Default)]
pub struct MockPasswordHasher;

impl MockPasswordHasher {
    const PREFIX: &'static str = "mock$";

    fn digest(password: &PlainPassword) -> String {
        let reversed: String = password.as_str().chars().rev().collect();
        format!("{}{}", Self::PREFIX, reversed)
    }
}

impl PasswordHasher for MockPasswordHasher {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        Ok(PasswordHash::new(Self::digest(password)))
    }
}

impl PasswordChecker for MockPasswordHasher {
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        if !hash.as_str().starts_with(Self::PREFIX) {
            return Err(InfraError::password_hash("不正なハッシュ形式"));
        }
        Ok(PasswordVerifyResult::from(Self::digest(password) == hash.as_str()))
    }
}
