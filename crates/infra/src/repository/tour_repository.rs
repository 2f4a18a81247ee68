//! # TourRepository
//!
//! ツアーの永続化を担当するリポジトリ。
//!
//! ステップは `tours.steps`（JSONB 配列）に埋め込んで保存する。
//! 閲覧数の加算とステップ追加はどちらも単一の UPDATE 文で行い、
//! アプリケーションメモリ上での read-modify-write をしない。
//! 全置換更新は後勝ち（バージョン検査なし）。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, types::Json};
use tourflow_domain::tour::{Step, Tour, TourId, TourRecord, TourReplacement, TourTitle};
use uuid::Uuid;

use crate::error::InfraError;

/// ツアーリポジトリトレイト
#[async_trait]
pub trait TourRepository: Send + Sync {
    /// 全ツアーを作成順に取得する
    async fn find_all(&self) -> Result<Vec<Tour>, InfraError>;

    /// ID でツアーを取得する（副作用なし）
    async fn find_by_id(&self, id: &TourId) -> Result<Option<Tour>, InfraError>;

    /// ツアーを登録する
    async fn insert(&self, tour: &Tour) -> Result<(), InfraError>;

    /// 閲覧を記録して最新のツアーを返す
    ///
    /// 公開中なら `views` を 1 加算し、非公開なら何も変えずに返す。
    /// 存在しない場合は `Ok(None)`。
    async fn record_view(
        &self,
        id: &TourId,
        now: DateTime<Utc>,
    ) -> Result<Option<Tour>, InfraError>;

    /// タイトル・説明・公開フラグ・ステップを丸ごと置き換える
    ///
    /// 存在しない場合は `Ok(None)`。
    async fn replace(
        &self,
        id: &TourId,
        replacement: &TourReplacement,
        now: DateTime<Utc>,
    ) -> Result<Option<Tour>, InfraError>;

    /// ステップを末尾に追加して更新後のツアーを返す
    ///
    /// 存在しない場合は `Ok(None)`。
    async fn append_step(
        &self,
        id: &TourId,
        step: &Step,
        now: DateTime<Utc>,
    ) -> Result<Option<Tour>, InfraError>;

    /// ツアーを削除する（存在しなくてもエラーにしない）
    async fn delete(&self, id: &TourId) -> Result<(), InfraError>;
}

#[derive(sqlx::FromRow)]
struct TourRow {
    id:          Uuid,
    title:       String,
    description: String,
    views:       i64,
    published:   bool,
    steps:       Json<Vec<Step>>,
    created_at:  DateTime<Utc>,
    updated_at:  DateTime<Utc>,
}

impl TryFrom<TourRow> for Tour {
    type Error = InfraError;

    fn try_from(row: TourRow) -> Result<Self, Self::Error> {
        Ok(Tour::from_db(TourRecord {
            id:          TourId::from_uuid(row.id),
            title:       TourTitle::new(row.title)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            description: row.description,
            views:       row.views,
            published:   row.published,
            steps:       row.steps.0,
            created_at:  row.created_at,
            updated_at:  row.updated_at,
        }))
    }
}

/// 取得系クエリで共通の列リスト
const TOUR_COLUMNS: &str = "id, title, description, views, published, steps, created_at, updated_at";

/// PostgreSQL 実装の TourRepository
#[derive(Debug, Clone)]
pub struct PostgresTourRepository {
    pool: PgPool,
}

impl PostgresTourRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TourRepository for PostgresTourRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Tour>, InfraError> {
        let sql = format!("SELECT {TOUR_COLUMNS} FROM tours ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, TourRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Tour::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &TourId) -> Result<Option<Tour>, InfraError> {
        let sql = format!("SELECT {TOUR_COLUMNS} FROM tours WHERE id = $1");
        let row = sqlx::query_as::<_, TourRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Tour::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %tour.id()))]
    async fn insert(&self, tour: &Tour) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO tours (id, title, description, views, published, steps, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(tour.id().as_uuid())
        .bind(tour.title().as_str())
        .bind(tour.description())
        .bind(tour.views())
        .bind(tour.published())
        .bind(Json(tour.steps()))
        .bind(tour.created_at())
        .bind(tour.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn record_view(
        &self,
        id: &TourId,
        now: DateTime<Utc>,
    ) -> Result<Option<Tour>, InfraError> {
        // 公開中なら加算した行、非公開なら現在の行を返す
        let sql = format!(
            r#"
            WITH viewed AS (
                UPDATE tours
                SET views = views + 1, updated_at = $2
                WHERE id = $1 AND published
                RETURNING {TOUR_COLUMNS}
            )
            SELECT {TOUR_COLUMNS} FROM viewed
            UNION ALL
            SELECT {TOUR_COLUMNS} FROM tours
            WHERE id = $1 AND NOT EXISTS (SELECT 1 FROM viewed)
            "#
        );
        let row = sqlx::query_as::<_, TourRow>(&sql)
            .bind(id.as_uuid())
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Tour::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn replace(
        &self,
        id: &TourId,
        replacement: &TourReplacement,
        now: DateTime<Utc>,
    ) -> Result<Option<Tour>, InfraError> {
        let sql = format!(
            r#"
            UPDATE tours
            SET title = $2, description = $3, published = $4, steps = $5, updated_at = $6
            WHERE id = $1
            RETURNING {TOUR_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, TourRow>(&sql)
            .bind(id.as_uuid())
            .bind(replacement.title.as_str())
            .bind(&replacement.description)
            .bind(replacement.published)
            .bind(Json(&replacement.steps))
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Tour::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn append_step(
        &self,
        id: &TourId,
        step: &Step,
        now: DateTime<Utc>,
    ) -> Result<Option<Tour>, InfraError> {
        let sql = format!(
            r#"
            UPDATE tours
            SET steps = steps || jsonb_build_array($2::jsonb), updated_at = $3
            WHERE id = $1
            RETURNING {TOUR_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, TourRow>(&sql)
            .bind(id.as_uuid())
            .bind(Json(step))
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Tour::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &TourId) -> Result<(), InfraError> {
        sqlx::query("DELETE FROM tours WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
