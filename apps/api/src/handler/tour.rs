//! # ツアーハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /api/tours` - ツアー作成
//! - `GET /api/tours` - ツアー一覧
//! - `GET /api/tours/{id}` - ツアー取得（公開中なら閲覧数を加算）
//! - `PUT /api/tours/{id}` - ツアー更新（全置換）
//! - `DELETE /api/tours/{id}` - ツアー削除
//! - `POST /api/tours/{id}/steps` - ステップ追加
//! - `GET /api/tours/{id}/steps` - ステップ一覧

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tourflow_domain::tour::{Step, Tour, TourId};
use tourflow_shared::MessageResponse;
use uuid::Uuid;

use crate::{
    error::ApiError,
    usecase::{CreateTourInput, TourUseCase, UpdateTourInput},
};

/// ツアーハンドラの共有状態
pub struct TourState {
    pub usecase: Arc<dyn TourUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// ステップ DTO
///
/// リクエストでは全フィールド省略可能。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepDto {
    pub title:    String,
    pub content:  String,
    pub selector: String,
    pub order:    i32,
}

impl From<&Step> for StepDto {
    fn from(step: &Step) -> Self {
        Self {
            title:    step.title.clone(),
            content:  step.content.clone(),
            selector: step.selector.clone(),
            order:    step.order,
        }
    }
}

impl From<StepDto> for Step {
    fn from(dto: StepDto) -> Self {
        Self {
            title:    dto.title,
            content:  dto.content,
            selector: dto.selector,
            order:    dto.order,
        }
    }
}

/// ツアー DTO
#[derive(Debug, Serialize)]
pub struct TourDto {
    pub id:          Uuid,
    pub title:       String,
    pub description: String,
    pub views:       i64,
    pub published:   bool,
    pub steps:       Vec<StepDto>,
    pub created_at:  DateTime<Utc>,
    pub updated_at:  DateTime<Utc>,
}

impl From<&Tour> for TourDto {
    fn from(tour: &Tour) -> Self {
        Self {
            id:          *tour.id().as_uuid(),
            title:       tour.title().as_str().to_string(),
            description: tour.description().to_string(),
            views:       tour.views(),
            published:   tour.published(),
            steps:       tour.steps().iter().map(StepDto::from).collect(),
            created_at:  tour.created_at(),
            updated_at:  tour.updated_at(),
        }
    }
}

/// 確認メッセージとツアーを併せて返すレスポンス
#[derive(Debug, Serialize)]
pub struct TourEnvelope {
    pub message: String,
    pub tour:    TourDto,
}

impl TourEnvelope {
    fn new(message: &str, tour: &Tour) -> Self {
        Self {
            message: message.to_string(),
            tour:    TourDto::from(tour),
        }
    }
}

/// ツアー作成リクエスト
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTourRequest {
    pub title:       String,
    pub description: String,
    pub published:   bool,
}

/// ツアー更新リクエスト
///
/// 省略したフィールドは既定値（空文字列 / `false` / 空配列）で置き換わる。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTourRequest {
    pub title:       String,
    pub description: String,
    pub published:   bool,
    pub steps:       Vec<StepDto>,
}

// --- ハンドラ ---

/// POST /api/tours
#[tracing::instrument(skip_all)]
pub async fn create_tour(
    State(state): State<Arc<TourState>>,
    Json(req): Json<CreateTourRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tour = state
        .usecase
        .create_tour(CreateTourInput {
            title:       req.title,
            description: req.description,
            published:   req.published,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TourEnvelope::new("Tour created successfully", &tour)),
    ))
}

/// GET /api/tours
#[tracing::instrument(skip_all)]
pub async fn list_tours(
    State(state): State<Arc<TourState>>,
) -> Result<impl IntoResponse, ApiError> {
    let tours = state.usecase.list_tours().await?;
    let dtos: Vec<TourDto> = tours.iter().map(TourDto::from).collect();

    Ok(Json(dtos))
}

/// GET /api/tours/{id}
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_tour(
    State(state): State<Arc<TourState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let tour = state.usecase.get_tour(&TourId::from_uuid(id)).await?;

    Ok(Json(TourDto::from(&tour)))
}

/// PUT /api/tours/{id}
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_tour(
    State(state): State<Arc<TourState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTourRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tour = state
        .usecase
        .update_tour(
            &TourId::from_uuid(id),
            UpdateTourInput {
                title:       req.title,
                description: req.description,
                published:   req.published,
                steps:       req.steps.into_iter().map(Step::from).collect(),
            },
        )
        .await?;

    Ok(Json(TourEnvelope::new("Tour updated", &tour)))
}

/// DELETE /api/tours/{id}
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_tour(
    State(state): State<Arc<TourState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.usecase.delete_tour(&TourId::from_uuid(id)).await?;

    Ok(Json(MessageResponse::new("Tour deleted")))
}

/// POST /api/tours/{id}/steps
#[tracing::instrument(skip_all, fields(%id))]
pub async fn append_step(
    State(state): State<Arc<TourState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<StepDto>,
) -> Result<impl IntoResponse, ApiError> {
    let tour = state
        .usecase
        .append_step(&TourId::from_uuid(id), Step::from(req))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TourEnvelope::new("Step added", &tour)),
    ))
}

/// GET /api/tours/{id}/steps
#[tracing::instrument(skip_all, fields(%id))]
pub async fn list_steps(
    State(state): State<Arc<TourState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let steps = state.usecase.list_steps(&TourId::from_uuid(id)).await?;
    let dtos: Vec<StepDto> = steps.iter().map(StepDto::from).collect();

    Ok(Json(dtos))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Method, Request},
        routing::get,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tourflow_domain::clock::SystemClock;
    use tourflow_infra::mock::MockTourRepository;
    use tower::ServiceExt;

    use super::*;
    use crate::usecase::TourUseCaseImpl;

    fn create_test_app() -> Router {
        let usecase = TourUseCaseImpl::new(
            Arc::new(MockTourRepository::new()),
            Arc::new(SystemClock),
        );
        let state = Arc::new(TourState {
            usecase: Arc::new(usecase),
        });

        Router::new()
            .route("/api/tours", get(list_tours).post(create_tour))
            .route(
                "/api/tours/{id}",
                get(get_tour).put(update_tour).delete(delete_tour),
            )
            .route("/api/tours/{id}/steps", get(list_steps).post(append_step))
            .with_state(state)
    }

    fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn create(app: &Router, title: &str, published: bool) -> String {
        let (status, body) = send(
            app,
            request(
                Method::POST,
                "/api/tours",
                Some(json!({"title": title, "published": published})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["tour"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_create_tour_201と作成したツアーを返す() {
        let app = create_test_app();

        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/api/tours",
                Some(json!({"title": "Onboarding", "description": "Intro"})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Tour created successfully");
        assert_eq!(body["tour"]["title"], "Onboarding");
        assert_eq!(body["tour"]["description"], "Intro");
        assert_eq!(body["tour"]["views"], 0);
        assert_eq!(body["tour"]["published"], false);
        assert_eq!(body["tour"]["steps"], json!([]));
    }

    #[tokio::test]
    async fn test_create_tour_タイトルなしは400() {
        let app = create_test_app();

        let (status, body) = send(
            &app,
            request(Method::POST, "/api/tours", Some(json!({"published": true}))),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Title is required");
    }

    #[tokio::test]
    async fn test_list_tours_作成済みのツアーを配列で返す() {
        let app = create_test_app();
        create(&app, "First", true).await;
        create(&app, "Second", false).await;

        let (status, body) = send(&app, request(Method::GET, "/api/tours", None)).await;

        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_get_tour_公開中なら閲覧ごとに加算される() {
        let app = create_test_app();
        let id = create(&app, "Onboarding", true).await;
        let uri = format!("/api/tours/{id}");

        let (_, first) = send(&app, request(Method::GET, &uri, None)).await;
        let (status, second) = send(&app, request(Method::GET, &uri, None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["views"], 1);
        assert_eq!(second["views"], 2);
    }

    #[tokio::test]
    async fn test_get_tour_存在しなければ404() {
        let app = create_test_app();
        let uri = format!("/api/tours/{}", Uuid::now_v7());

        let (status, body) = send(&app, request(Method::GET, &uri, None)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Tour not found");
    }

    #[tokio::test]
    async fn test_get_tour_uuidでないidは400() {
        let app = create_test_app();

        let (status, _) = send(&app, request(Method::GET, "/api/tours/not-a-uuid", None)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_tour_全置換された結果を返す() {
        let app = create_test_app();
        let id = create(&app, "Old", false).await;

        let (status, body) = send(
            &app,
            request(
                Method::PUT,
                &format!("/api/tours/{id}"),
                Some(json!({
                    "title": "New",
                    "published": true,
                    "steps": [{"title": "Only", "order": 1}],
                })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Tour updated");
        assert_eq!(body["tour"]["title"], "New");
        assert_eq!(body["tour"]["published"], true);
        assert_eq!(
            body["tour"]["steps"],
            json!([{"title": "Only", "content": "", "selector": "", "order": 1}])
        );
    }

    #[tokio::test]
    async fn test_update_tour_存在しなければ404() {
        let app = create_test_app();

        let (status, _) = send(
            &app,
            request(
                Method::PUT,
                &format!("/api/tours/{}", Uuid::now_v7()),
                Some(json!({"title": "New"})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_tour_存在有無にかかわらず200() {
        let app = create_test_app();
        let id = create(&app, "Onboarding", true).await;

        for uri in [format!("/api/tours/{id}"), format!("/api/tours/{}", Uuid::now_v7())] {
            let (status, body) = send(&app, request(Method::DELETE, &uri, None)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"message": "Tour deleted"}));
        }

        let (status, _) = send(
            &app,
            request(Method::GET, &format!("/api/tours/{id}"), None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_append_step_201と更新後のツアーを返し一覧に反映される() {
        let app = create_test_app();
        let id = create(&app, "Onboarding", false).await;
        let uri = format!("/api/tours/{id}/steps");

        let (status, body) = send(
            &app,
            request(
                Method::POST,
                &uri,
                Some(json!({"title": "Welcome", "content": "Hi", "selector": "#nav", "order": 1})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Step added");
        assert_eq!(body["tour"]["steps"].as_array().unwrap().len(), 1);

        let (status, steps) = send(&app, request(Method::GET, &uri, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            steps,
            json!([{"title": "Welcome", "content": "Hi", "selector": "#nav", "order": 1}])
        );
    }

    #[tokio::test]
    async fn test_ステップ操作は存在しないツアーに404() {
        let app = create_test_app();
        let uri = format!("/api/tours/{}/steps", Uuid::now_v7());

        let (post_status, _) = send(
            &app,
            request(Method::POST, &uri, Some(json!({"title": "x"}))),
        )
        .await;
        let (get_status, _) = send(&app, request(Method::GET, &uri, None)).await;

        assert_eq!(post_status, StatusCode::NOT_FOUND);
        assert_eq!(get_status, StatusCode::NOT_FOUND);
    }
}
