//! # メッセージレスポンス
//!
//! 作成・削除系エンドポイントが返す `{ "message": "..." }` 形式のボディ。

use serde::{Deserialize, Serialize};

/// 処理結果を人間向けの一文で返すレスポンス
///
/// ```
/// use tourflow_shared::MessageResponse;
///
/// let response = MessageResponse::new("Tour deleted");
/// assert_eq!(response.message, "Tour deleted");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializeでmessageフィールドのみを出力する() {
        let json = serde_json::to_value(MessageResponse::new("User created successfully")).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "message": "User created successfully" })
        );
    }
}
