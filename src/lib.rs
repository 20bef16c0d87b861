//! Volunteer Hours API Library
//!
//! # Overview
//!
//! 학생 봉사 시간 추적 서비스의 백엔드 API.
//! 학생이 시간 승인을 요청하고, staff가 확정/거절하며, 누계가 쌓이면
//! 마일스톤 accolade가 자동으로 수여된다.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Axum Web Server                      │
//! │  ┌──────────────────────────────────────────────────────┐│
//! │  │                    Routes Layer                       ││
//! │  │  /health  /api/users  /api/students/*  /api/logs/*   ││
//! │  └──────────────────────────────────────────────────────┘│
//! │  ┌──────────────────────────────────────────────────────┐│
//! │  │                   Services Layer                      ││
//! │  │  AccountDirectory  HourLedger  AccoladeEngine         ││
//! │  │  LeaderboardView                                      ││
//! │  └──────────────────────────────────────────────────────┘│
//! │  ┌──────────────────────────────────────────────────────┐│
//! │  │                     Data Layer                        ││
//! │  │  LedgerStore trait → PostgreSQL (SQLx)                ││
//! │  └──────────────────────────────────────────────────────┘│
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: 환경 설정 관리
//! - `error`: 에러 타입 및 처리
//! - `routes`: HTTP 엔드포인트 핸들러
//! - `services`: 비즈니스 로직 (원장, 수여 엔진, 리더보드, 디렉터리)
//! - `db`: 데이터베이스 연동 (store trait + Postgres 구현)
//! - `types`: 공통 타입 정의

use std::sync::Arc;

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod services;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use db::Database;
pub use error::ApiError;
pub use services::{AccoladeEngine, AccountDirectory, HourLedger, LeaderboardView};

/// 애플리케이션 전역 상태
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub directory: Arc<AccountDirectory>,
    pub ledger: Arc<HourLedger>,
    pub accolades: Arc<AccoladeEngine>,
    pub leaderboard: Arc<LeaderboardView>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Database를 store로 공유하는 서비스 일체 구성
    pub fn new(db: Database, config: Config) -> Self {
        let db = Arc::new(db);
        let store: Arc<dyn db::LedgerStore> = db.clone();

        let directory = Arc::new(AccountDirectory::new(store.clone()));
        let accolades = Arc::new(AccoladeEngine::new(store.clone()));
        let ledger = Arc::new(HourLedger::new(store.clone(), accolades.clone()));
        let leaderboard = Arc::new(LeaderboardView::new(store));

        Self {
            db,
            directory,
            ledger,
            accolades,
            leaderboard,
            config: Arc::new(config),
        }
    }
}
