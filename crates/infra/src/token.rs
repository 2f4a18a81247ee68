//! # アクセストークン
//!
//! ログイン成功時に返す HS256 署名の JWT を発行する。
//!
//! クレームは `sub`（ユーザー ID）、`iat`、`exp`（`iat` + 1 時間）。
//! 失効やリフレッシュの仕組みは持たない。

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tourflow_domain::user::UserId;

use crate::InfraError;

/// トークンの有効期間（秒）
const TOKEN_TTL_SECS: i64 = 3600;

/// JWT クレーム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// ユーザー ID
    pub sub: String,
    /// 発行時刻（UNIX 秒）
    pub iat: i64,
    /// 有効期限（UNIX 秒）
    pub exp: i64,
}

/// 署名済みアクセストークン
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// トークン発行を担当するトレイト
pub trait TokenIssuer: Send + Sync {
    /// ユーザーに対するアクセストークンを発行する
    fn issue(&self, user_id: &UserId, now: DateTime<Utc>) -> Result<AccessToken, InfraError>;
}

/// HS256 JWT による実装
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    #[cfg(any(test, feature = "test-utils"))]
    decoding_key: jsonwebtoken::DecodingKey,
}

impl JwtTokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            #[cfg(any(test, feature = "test-utils"))]
            decoding_key: jsonwebtoken::DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// 署名と有効期限を検証してクレームを取り出す
    ///
    /// トークンを検証するルートはないため、発行結果の確認用に
    /// テストと `test-utils` feature でのみ提供する。
    #[cfg(any(test, feature = "test-utils"))]
    pub fn decode(&self, token: &str) -> Result<Claims, InfraError> {
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &self.decoding_key,
            &jsonwebtoken::Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: &UserId, now: DateTime<Utc>) -> Result<AccessToken, InfraError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + TOKEN_TTL_SECS,
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(AccessToken(token))
    }
}
