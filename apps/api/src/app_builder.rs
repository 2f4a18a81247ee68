//! # アプリケーション構築
//!
//! ルーター構築とミドルウェアの適用を担当する。
//! `main.rs` はインフラ初期化・DI・サーバー起動に集中する。
//!
//! ## ミドルウェアの順序
//!
//! `.layer()` は後に追加したものほど外側になる。リクエストは外側から
//! CORS → リクエスト ID 採番 → トレーススパン → Canonical Log → ID 伝播 → ハンドラ
//! の順に通過する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tourflow_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{
    AuthState,
    ReadinessState,
    TourState,
    append_step,
    create_tour,
    delete_tour,
    get_tour,
    health_check,
    list_steps,
    list_tours,
    login,
    readiness_check,
    signup,
    update_tour,
};

/// 全ルートとミドルウェアを組み立てた Router を返す
pub fn build_router(
    auth_state: Arc<AuthState>,
    tour_state: Arc<TourState>,
    readiness_state: Arc<ReadinessState>,
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .merge(
            Router::new()
                .route("/api/signup", post(signup))
                .route("/api/login", post(login))
                .with_state(auth_state),
        )
        .merge(
            Router::new()
                .route("/api/tours", get(list_tours).post(create_tour))
                .route(
                    "/api/tours/{id}",
                    get(get_tour).put(update_tour).delete(delete_tour),
                )
                .route("/api/tours/{id}/steps", get(list_steps).post(append_step))
                .with_state(tour_state),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(CorsLayer::permissive())
}
