//! # ツアー
//!
//! ツアーは順序付きステップの並びで構成されるガイド付きウォークスルー。
//! ステップはツアーに埋め込まれた値であり、独立した識別子やライフサイクルを持たない。
//!
//! ## 不変条件
//!
//! - `views` は減少しない。増えるのは公開中のツアーが取得されたときだけ
//! - ステップは追加順に保持する。`order` の一意性や並び順は検証しない
//! - 更新（[`Tour::replace`]）はタイトル・説明・公開フラグ・ステップを丸ごと置き換える
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tourflow_domain::tour::{NewTour, Step, Tour, TourId, TourTitle};
//!
//! let now = chrono::Utc::now();
//! let tour = Tour::new(NewTour {
//!     id:          TourId::new(),
//!     title:       TourTitle::new("Onboarding")?,
//!     description: String::new(),
//!     published:   true,
//!     now,
//! })
//! .with_step_appended(
//!     Step {
//!         title:    "Welcome".to_string(),
//!         content:  "Start here".to_string(),
//!         selector: "#nav".to_string(),
//!         order:    1,
//!     },
//!     now,
//! );
//!
//! assert_eq!(tour.steps().len(), 1);
//! assert_eq!(tour.record_view(now).views(), 1);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_uuid_id! {
    /// ツアー ID
    pub struct TourId;
}

define_required_string! {
    /// ツアーのタイトル
    pub struct TourTitle {
        label: "Title",
    }
}

/// ステップ
///
/// ツアー内の 1 地点。`selector` で UI 要素を指す。
/// JSONB 列にそのまま格納するため serde 表現がそのまま永続化形式になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    pub title:    String,
    pub content:  String,
    pub selector: String,
    pub order:    i32,
}

/// ツアー作成パラメータ
pub struct NewTour {
    pub id:          TourId,
    pub title:       TourTitle,
    pub description: String,
    pub published:   bool,
    pub now:         DateTime<Utc>,
}

/// 全置換更新のパラメータ
#[derive(Debug, Clone)]
pub struct TourReplacement {
    pub title:       TourTitle,
    pub description: String,
    pub published:   bool,
    pub steps:       Vec<Step>,
}

/// DB から復元する際のパラメータ
pub struct TourRecord {
    pub id:          TourId,
    pub title:       TourTitle,
    pub description: String,
    pub views:       i64,
    pub published:   bool,
    pub steps:       Vec<Step>,
    pub created_at:  DateTime<Utc>,
    pub updated_at:  DateTime<Utc>,
}

/// ツアー集約
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    id:          TourId,
    title:       TourTitle,
    description: String,
    views:       i64,
    published:   bool,
    steps:       Vec<Step>,
    created_at:  DateTime<Utc>,
    updated_at:  DateTime<Utc>,
}

impl Tour {
    /// 新しいツアーを作成する
    ///
    /// 閲覧数 0、ステップなしで開始する。
    pub fn new(params: NewTour) -> Self {
        Self {
            id:          params.id,
            title:       params.title,
            description: params.description,
            views:       0,
            published:   params.published,
            steps:       Vec::new(),
            created_at:  params.now,
            updated_at:  params.now,
        }
    }

    /// 既存のデータからツアーを復元する
    pub fn from_db(record: TourRecord) -> Self {
        Self {
            id:          record.id,
            title:       record.title,
            description: record.description,
            views:       record.views,
            published:   record.published,
            steps:       record.steps,
            created_at:  record.created_at,
            updated_at:  record.updated_at,
        }
    }

    pub fn id(&self) -> &TourId {
        &self.id
    }

    pub fn title(&self) -> &TourTitle {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn views(&self) -> i64 {
        self.views
    }

    pub fn published(&self) -> bool {
        self.published
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }


    /// 内容を丸ごと置き換えた新しいインスタンスを返す
    ///
    /// `views` と `created_at` は保持する。
    pub fn replace(self, replacement: TourReplacement, now: DateTime<Utc>) -> Self {
        Self {
            title: replacement.title,
            description: replacement.description,
            published: replacement.published,
            steps: replacement.steps,
            updated_at: now,
            ..self
        }
    }

    /// ステップを末尾に追加した新しいインスタンスを返す
    pub fn with_step_appended(mut self, step: Step, now: DateTime<Utc>) -> Self {
        self.steps.push(step);
        self.updated_at = now;
        self
    }

    /// 1 回の閲覧を記録した新しいインスタンスを返す
    ///
    /// 非公開のツアーは変化しない。
    pub fn record_view(self, now: DateTime<Utc>) -> Self {
        if !self.published {
            return self;
        }
        Self {
            views: self.views + 1,
            updated_at: now,
            ..self
        }
    }
}
