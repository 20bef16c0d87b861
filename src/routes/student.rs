//! Student Endpoints
//!
//! 시간 승인 요청, 본인 기록 / accolade 조회.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::HourLog;
use crate::error::ApiError;
use crate::services::AccountDirectory;
use crate::types::LogStatus;
use crate::AppState;

// ============ Request/Response Types ============

#[derive(Debug, Deserialize)]
pub struct RequestHoursBody {
    pub hours: i32,
}

#[derive(Debug, Serialize)]
pub struct RequestHoursResponse {
    pub message: String,
    pub log: LogView,
}

/// 학생 화면용 기록 표현
#[derive(Debug, Serialize)]
pub struct LogView {
    pub id: i64,
    pub hours: i32,
    pub status: LogStatus,
    /// 검토한 staff의 username, 미검토면 "pending"
    /// (코어 모델의 staff 참조는 nullable — sentinel은 표현 계층에서만)
    pub confirmed_by: String,
    pub created_at: String,
    pub reviewed_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccoladeView {
    pub milestone: i32,
    pub name: String,
    pub awarded_at: String,
}

// ============ Handlers ============

/// POST /api/students/:id/logs
///
/// 시간 승인 요청 생성 (status=requested)
pub async fn request_hours(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    Json(body): Json<RequestHoursBody>,
) -> Result<(StatusCode, Json<RequestHoursResponse>), ApiError> {
    let log = state.ledger.request_hours(student_id, body.hours).await?;
    let view = log_view(&state.directory, &log).await?;

    Ok((
        StatusCode::CREATED,
        Json(RequestHoursResponse {
            message: format!("Requested {} hours successfully", body.hours),
            log: view,
        }),
    ))
}

/// GET /api/students/:id/logs
///
/// 학생의 모든 기록, 생성 순서
pub async fn student_logs(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<Vec<LogView>>, ApiError> {
    let logs = state.ledger.logs_for_student(student_id).await?;

    let mut views = Vec::with_capacity(logs.len());
    for log in &logs {
        views.push(log_view(&state.directory, log).await?);
    }
    Ok(Json(views))
}

/// GET /api/students/:id/accolades
///
/// 마일스톤 오름차순 accolade 목록
pub async fn student_accolades(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<Vec<AccoladeView>>, ApiError> {
    let accolades = state.accolades.student_accolades(student_id).await?;
    let table = state.accolades.milestones();

    Ok(Json(
        accolades
            .into_iter()
            .map(|a| AccoladeView {
                milestone: a.milestone,
                name: table
                    .name_of(a.milestone)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{} hours", a.milestone)),
                awarded_at: a.format_awarded_time(),
            })
            .collect(),
    ))
}

// ============ Helpers ============

/// staff username 해석 포함 표시용 변환
///
/// "pending" sentinel은 staff 참조가 없는 경우에만 — 조회 실패는
/// 그대로 전파한다 (에러를 유효한 표시 상태로 가장하지 않음).
pub(super) async fn log_view(
    directory: &AccountDirectory,
    log: &HourLog,
) -> Result<LogView, ApiError> {
    let confirmed_by = match log.staff_id {
        Some(staff_id) => directory.find_account(staff_id).await?.username,
        None => "pending".to_string(),
    };

    Ok(LogView {
        id: log.id,
        hours: log.hours,
        status: log.status,
        confirmed_by,
        created_at: log.format_created_time(),
        reviewed_at: log.format_reviewed_time(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::db::{LedgerStore, MemoryStore};
    use crate::types::Role;

    #[tokio::test]
    async fn test_unreviewed_log_renders_pending_sentinel() {
        let store = Arc::new(MemoryStore::new());
        let student = store
            .insert_account("bob", "hash", Role::Student, Utc::now())
            .await
            .unwrap();
        let log = store
            .insert_requested_log(student.id, 5, Utc::now())
            .await
            .unwrap();
        let directory = AccountDirectory::new(store);

        let view = log_view(&directory, &log).await.unwrap();
        assert_eq!(view.confirmed_by, "pending");
        assert_eq!(view.status, LogStatus::Requested);
        assert_eq!(view.reviewed_at, None);
    }

    #[tokio::test]
    async fn test_confirmed_log_renders_staff_username() {
        let store = Arc::new(MemoryStore::new());
        let staff = store
            .insert_account("sally", "hash", Role::Staff, Utc::now())
            .await
            .unwrap();
        let student = store
            .insert_account("bob", "hash", Role::Student, Utc::now())
            .await
            .unwrap();
        let log = store
            .insert_confirmed_log(staff.id, student.id, 5, Utc::now())
            .await
            .unwrap();
        let directory = AccountDirectory::new(store);

        let view = log_view(&directory, &log).await.unwrap();
        assert_eq!(view.confirmed_by, "sally");
        assert_eq!(view.status, LogStatus::Confirmed);
        assert!(view.reviewed_at.is_some());
    }

    #[tokio::test]
    async fn test_missing_staff_account_is_an_error_not_pending() {
        let store = Arc::new(MemoryStore::new());
        let student = store
            .insert_account("bob", "hash", Role::Student, Utc::now())
            .await
            .unwrap();
        let mut log = store
            .insert_requested_log(student.id, 5, Utc::now())
            .await
            .unwrap();
        // 존재하지 않는 staff를 가리키는 기록 (FK가 막는 상태지만,
        // 조회 실패가 "pending"으로 위장되지 않는지 확인)
        log.staff_id = Some(999);
        let directory = AccountDirectory::new(store);

        let err = log_view(&directory, &log).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
