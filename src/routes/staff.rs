//! Staff Review Endpoints
//!
//! pending 목록, 직접 기록(log_hours), 확정/거절.
//!
//! 행위자 staff id는 요청 본문으로 명시적으로 전달된다. 역할 검증은
//! 코어(HourLedger)가 수행한다.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::student::LogView;
use crate::error::ApiError;
use crate::types::LogStatus;
use crate::AppState;

// ============ Request/Response Types ============

#[derive(Debug, Deserialize)]
pub struct LogHoursBody {
    pub staff_id: i64,
    pub student_id: i64,
    pub hours: i32,
}

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    pub staff_id: i64,
}

/// staff 검토 화면용 pending 기록 표현
#[derive(Debug, Serialize)]
pub struct PendingLogView {
    pub id: i64,
    pub student: String,
    pub hours: i32,
    pub status: LogStatus,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub message: String,
    pub log: LogView,
}

// ============ Handlers ============

/// GET /api/logs/pending
///
/// 전체 requested 기록, 생성 순서
pub async fn pending_logs(
    State(state): State<AppState>,
) -> Result<Json<Vec<PendingLogView>>, ApiError> {
    let logs = state.ledger.pending_logs().await?;

    let mut views = Vec::with_capacity(logs.len());
    for log in logs {
        // 조회 실패는 빈 줄이 아니라 500으로 드러나야 함
        let student = state.directory.find_account(log.student_id).await?.username;
        views.push(PendingLogView {
            id: log.id,
            student,
            hours: log.hours,
            status: log.status,
            created_at: log.format_created_time(),
        });
    }
    Ok(Json(views))
}

/// POST /api/logs
///
/// staff가 요청 단계 없이 직접 기록 + 확정
pub async fn log_hours(
    State(state): State<AppState>,
    Json(body): Json<LogHoursBody>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let log = state
        .ledger
        .log_hours(body.staff_id, body.student_id, body.hours)
        .await?;
    let view = super::student::log_view(&state.directory, &log).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewResponse {
            message: format!(
                "Logged {} hours for student {} successfully",
                body.hours, body.student_id
            ),
            log: view,
        }),
    ))
}

/// PUT /api/logs/:id/confirm
pub async fn confirm_log(
    State(state): State<AppState>,
    Path(log_id): Path<i64>,
    Json(body): Json<ReviewBody>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let log = state.ledger.confirm_hours(body.staff_id, log_id).await?;
    let view = super::student::log_view(&state.directory, &log).await?;

    Ok(Json(ReviewResponse {
        message: "Log confirmed successfully".to_string(),
        log: view,
    }))
}

/// PUT /api/logs/:id/deny
pub async fn deny_log(
    State(state): State<AppState>,
    Path(log_id): Path<i64>,
    Json(body): Json<ReviewBody>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let log = state.ledger.deny_hours(body.staff_id, log_id).await?;
    let view = super::student::log_view(&state.directory, &log).await?;

    Ok(Json(ReviewResponse {
        message: "Log denied successfully".to_string(),
        log: view,
    }))
}
