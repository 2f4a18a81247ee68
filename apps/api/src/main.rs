//! # TourFlow API サーバー起動
//!
//! 環境変数から設定を読み込み、DB 接続・マイグレーション・DI を行ってから
//! HTTP サーバーを起動する。

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::net::TcpListener;
use tourflow_api::{
    app_builder::build_router,
    config::ApiConfig,
    handler::{AuthState, ReadinessState, TourState},
    usecase::{AuthUseCaseImpl, TourUseCaseImpl},
};
use tourflow_domain::clock::{Clock, SystemClock};
use tourflow_infra::{
    Argon2PasswordHasher,
    JwtTokenIssuer,
    db,
    repository::{PostgresTourRepository, PostgresUserRepository},
};
use tourflow_shared::observability::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("tourflow-api"));
    let _tracing_guard = tracing::info_span!("app", service = "tourflow-api").entered();

    let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!("API サーバーを起動します: {}:{}", config.host, config.port);

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let password_hasher = Arc::new(
        Argon2PasswordHasher::new().context("パスワードハッシャの初期化に失敗しました")?,
    );

    let auth_usecase = AuthUseCaseImpl::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        password_hasher.clone(),
        password_hasher,
        Arc::new(JwtTokenIssuer::new(&config.jwt_secret)),
        clock.clone(),
    );
    let auth_state = Arc::new(AuthState {
        usecase: Arc::new(auth_usecase),
    });

    let tour_usecase = TourUseCaseImpl::new(Arc::new(PostgresTourRepository::new(pool)), clock);
    let tour_state = Arc::new(TourState {
        usecase: Arc::new(tour_usecase),
    });

    let app = build_router(auth_state, tour_state, readiness_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
