//! # ドメイン層エラー定義
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 必須項目の欠落 |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//!
//! 一意制約違反（既存メールアドレス）はストレージで検出するため、
//! インフラ層の `InfraError::conflict` として表現する。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// 入力値がルールに違反している
    #[error("{0}")]
    Validation(String),

    /// 指定された ID のエンティティが存在しない
    #[error("{entity_type} not found: {id}")]
    NotFound {
        /// エンティティの種類（"Tour", "User"）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },
}
