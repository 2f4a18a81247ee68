//! # ツアーユースケース
//!
//! ツアーの作成・一覧・取得・全置換更新・削除と、ステップの追加・一覧を実装する。

use std::sync::Arc;

use async_trait::async_trait;
use tourflow_domain::{
    DomainError,
    clock::Clock,
    tour::{NewTour, Step, Tour, TourId, TourReplacement, TourTitle},
};
use tourflow_infra::repository::TourRepository;

use super::TourUseCase;
use crate::error::ApiError;

/// ツアー作成の入力
pub struct CreateTourInput {
    pub title:       String,
    pub description: String,
    pub published:   bool,
}

/// ツアー更新（全置換）の入力
pub struct UpdateTourInput {
    pub title:       String,
    pub description: String,
    pub published:   bool,
    pub steps:       Vec<Step>,
}

/// ツアーユースケースの実装
pub struct TourUseCaseImpl {
    tour_repository: Arc<dyn TourRepository>,
    clock:           Arc<dyn Clock>,
}

impl TourUseCaseImpl {
    pub fn new(tour_repository: Arc<dyn TourRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            tour_repository,
            clock,
        }
    }
}

fn tour_not_found(id: &TourId) -> ApiError {
    DomainError::NotFound {
        entity_type: "Tour",
        id:          id.to_string(),
    }
    .into()
}

#[async_trait]
impl TourUseCase for TourUseCaseImpl {
    async fn create_tour(&self, input: CreateTourInput) -> Result<Tour, ApiError> {
        let tour = Tour::new(NewTour {
            id:          TourId::new(),
            title:       TourTitle::new(input.title)?,
            description: input.description,
            published:   input.published,
            now:         self.clock.now(),
        });

        self.tour_repository.insert(&tour).await?;

        tracing::info!(tour_id = %tour.id(), "ツアーを作成しました");
        Ok(tour)
    }

    async fn list_tours(&self) -> Result<Vec<Tour>, ApiError> {
        Ok(self.tour_repository.find_all().await?)
    }

    async fn get_tour(&self, id: &TourId) -> Result<Tour, ApiError> {
        self.tour_repository
            .record_view(id, self.clock.now())
            .await?
            .ok_or_else(|| tour_not_found(id))
    }

    async fn update_tour(&self, id: &TourId, input: UpdateTourInput) -> Result<Tour, ApiError> {
        let replacement = TourReplacement {
            title:       TourTitle::new(input.title)?,
            description: input.description,
            published:   input.published,
            steps:       input.steps,
        };

        self.tour_repository
            .replace(id, &replacement, self.clock.now())
            .await?
            .ok_or_else(|| tour_not_found(id))
    }

    async fn delete_tour(&self, id: &TourId) -> Result<(), ApiError> {
        self.tour_repository.delete(id).await?;
        tracing::info!(tour_id = %id, "ツアーを削除しました");
        Ok(())
    }

    async fn append_step(&self, id: &TourId, step: Step) -> Result<Tour, ApiError> {
        self.tour_repository
            .append_step(id, &step, self.clock.now())
            .await?
            .ok_or_else(|| tour_not_found(id))
    }

    async fn list_steps(&self, id: &TourId) -> Result<Vec<Step>, ApiError> {
        let tour = self
            .tour_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| tour_not_found(id))?;

        Ok(tour.steps().to_vec())
    }
}
