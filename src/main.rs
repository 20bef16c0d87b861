//! Volunteer Hours API Server
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Client (Frontend)                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum Web Server                         │
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                      Routes Layer                        ││
//! │  │  /health  /api/users  /api/students/*  /api/logs/*      ││
//! │  │  /api/leaderboard                                       ││
//! │  └─────────────────────────────────────────────────────────┘│
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                    Services Layer                        ││
//! │  │  AccountDirectory  HourLedger  AccoladeEngine           ││
//! │  └─────────────────────────────────────────────────────────┘│
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                    Data Layer                            ││
//! │  │  PostgreSQL (SQLx)                                      ││
//! │  └─────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use volunteer_hours_api::{routes, AppState, Config, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 환경변수 로드
    dotenvy::dotenv().ok();

    // 로깅 초기화
    // RUST_LOG=debug,sqlx=warn 형태로 레벨 제어 가능
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "volunteer_hours_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting Volunteer Hours API Server");

    // 설정 로드
    let config = Config::from_env()?;
    tracing::info!("📋 Configuration loaded");

    // 데이터베이스 연결
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("🗄️  Database connected");

    // 마이그레이션 실행
    db.run_migrations().await?;
    tracing::info!("📦 Migrations completed");

    // 앱 상태 구성 (서비스 초기화 포함)
    let port = config.port;
    let state = AppState::new(db, config);
    tracing::info!("🧾 Ledger services initialized");

    // 라우터 구성
    let app = create_router(state);

    // 서버 시작
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("🌐 Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// 라우터 생성
///
/// # Route Structure
///
/// ```text
/// GET  /health                        - 서버 상태 확인
///
/// POST /api/signup                    - 계정 생성
/// POST /api/login                     - 자격 증명 검증
/// GET  /api/users                     - 계정 목록 (?role= 필터)
///
/// POST /api/students/:id/logs         - 시간 승인 요청
/// GET  /api/students/:id/logs         - 학생 기록 목록
/// GET  /api/students/:id/accolades    - 학생 accolade 목록
///
/// GET  /api/logs/pending              - 미검토 기록 목록
/// POST /api/logs                      - staff 직접 기록 + 확정
/// PUT  /api/logs/:id/confirm          - 기록 확정
/// PUT  /api/logs/:id/deny             - 기록 거절
///
/// GET  /api/leaderboard               - 학생 순위
/// ```
fn create_router(state: AppState) -> Router {
    // CORS 설정
    // 프로덕션에서는 특정 도메인만 허용, 개발 환경에서는 localhost 허용
    let cors = if state.config.is_production() {
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "https://yourdomain.com".to_string());
        let origins: Vec<_> = allowed_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        // Health check
        .route("/health", get(routes::health::health_check))
        // Auth
        .route("/api/signup", post(routes::auth::signup))
        .route("/api/login", post(routes::auth::login))
        // Users
        .route("/api/users", get(routes::users::list_users))
        // Student
        .route(
            "/api/students/:id/logs",
            post(routes::student::request_hours).get(routes::student::student_logs),
        )
        .route(
            "/api/students/:id/accolades",
            get(routes::student::student_accolades),
        )
        // Staff review
        .route("/api/logs/pending", get(routes::staff::pending_logs))
        .route("/api/logs", post(routes::staff::log_hours))
        .route("/api/logs/:id/confirm", put(routes::staff::confirm_log))
        .route("/api/logs/:id/deny", put(routes::staff::deny_log))
        // Leaderboard
        .route("/api/leaderboard", get(routes::leaderboard::get_leaderboard))
        // 미들웨어
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // 상태 주입
        .with_state(state)
}
