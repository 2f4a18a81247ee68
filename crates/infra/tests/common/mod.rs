//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するエンティティ生成ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use tourflow_domain::{
    password::PasswordHash,
    tour::{NewTour, Step, Tour, TourId, TourTitle},
    user::{Email, NewUser, User, UserId, UserName},
};

/// テスト用の固定日時
pub fn test_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// 固定日時から `secs` 秒後
pub fn test_later(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
}

/// 指定メールアドレスのユーザーを作成
pub fn create_test_user(email: &str) -> User {
    User::new(NewUser {
        id:            UserId::new(),
        name:          UserName::new("Test User").unwrap(),
        email:         Email::new(email).unwrap(),
        password_hash: PasswordHash::new("$argon2id$v=19$m=65536,t=1,p=1$dummy$dummy"),
        now:           test_now(),
    })
}

/// ステップなしのツアーを作成
pub fn create_test_tour(title: &str, published: bool, now: DateTime<Utc>) -> Tour {
    Tour::new(NewTour {
        id: TourId::new(),
        title: TourTitle::new(title).unwrap(),
        description: format!("{title} の説明"),
        published,
        now,
    })
}

/// 連番のステップを作成
pub fn create_test_step(order: i32) -> Step {
    Step {
        title:    format!("Step {order}"),
        content:  format!("content {order}"),
        selector: format!("#step-{order}"),
        order,
    }
}
