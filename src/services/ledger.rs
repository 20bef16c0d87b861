//! Hour-Log Ledger
//!
//! Owns the hour-log lifecycle: request → confirm / deny, plus staff direct
//! logging. Confirmed hours feed the student's running total and trigger the
//! accolade engine.
//!
//! # Design Decision
//!
//! 역할 검증은 HTTP 경계에서도 하지만 여기서 한 번 더 한다 (defense in
//! depth). 모든 연산이 행위자 id를 명시적 인자로 받는다 — 프레임워크의
//! 암묵적 current-user 컨텍스트에 의존하지 않음.
//!
//! 전이 + 누계 증가의 원자성과 동시 confirm/deny의 승자 단일성은
//! `LedgerStore` 구현이 보장하고, 여기서는 가드에 걸린 경우를
//! InvalidState로 번역한다.

use std::sync::Arc;

use chrono::Utc;

use crate::db::{Account, HourLog, LedgerStore};
use crate::error::ApiError;
use crate::services::AccoladeEngine;

/// 시간 기록 원장
pub struct HourLedger {
    store: Arc<dyn LedgerStore>,
    accolades: Arc<AccoladeEngine>,
}

impl HourLedger {
    pub fn new(store: Arc<dyn LedgerStore>, accolades: Arc<AccoladeEngine>) -> Self {
        Self { store, accolades }
    }

    /// 학생의 시간 승인 요청 생성
    ///
    /// status=requested로 생성되며 누계에는 영향 없음.
    /// 시간이 0 이하이거나 학생이 존재하지 않으면 InvalidInput.
    pub async fn request_hours(&self, student_id: i64, hours: i32) -> Result<HourLog, ApiError> {
        if hours <= 0 {
            return Err(ApiError::InvalidInput(
                "hours must be a positive integer".to_string(),
            ));
        }
        let student = self.require_student(student_id).await?;

        let log = self
            .store
            .insert_requested_log(student.id, hours, Utc::now())
            .await?;

        tracing::info!(student_id = student.id, hours, log_id = log.id, "Hours requested");
        Ok(log)
    }

    /// 학생의 모든 기록, 생성 순서 (상태 무관)
    pub async fn logs_for_student(&self, student_id: i64) -> Result<Vec<HourLog>, ApiError> {
        let student = self
            .store
            .find_account(student_id)
            .await?
            .filter(Account::is_student)
            .ok_or_else(|| ApiError::NotFound("Student".to_string()))?;

        Ok(self.store.logs_for_student(student.id).await?)
    }

    /// 전체 학생의 미검토(requested) 기록, 생성 순서
    ///
    /// staff 검토 화면이 소비한다.
    pub async fn pending_logs(&self) -> Result<Vec<HourLog>, ApiError> {
        Ok(self.store.pending_logs().await?)
    }

    /// staff가 요청 단계 없이 직접 기록 + 확정
    ///
    /// confirmed 기록 삽입과 누계 증가가 한 트랜잭션으로 커밋된 뒤
    /// accolade 엔진이 실행된다.
    pub async fn log_hours(
        &self,
        staff_id: i64,
        student_id: i64,
        hours: i32,
    ) -> Result<HourLog, ApiError> {
        let staff = self.require_staff(staff_id, "log hours").await?;
        if hours <= 0 {
            return Err(ApiError::InvalidInput(
                "hours must be a positive integer".to_string(),
            ));
        }
        let student = self.require_student(student_id).await?;

        let log = self
            .store
            .insert_confirmed_log(staff.id, student.id, hours, Utc::now())
            .await?;

        tracing::info!(
            staff_id = staff.id,
            student_id = student.id,
            hours,
            log_id = log.id,
            "Hours logged directly"
        );

        self.accolades.award_accolades(student.id).await?;
        Ok(log)
    }

    /// requested 기록을 확정
    ///
    /// 가드에 걸리면(이미 검토됨) InvalidState — 동시 호출 중 최대
    /// 한 건만 성공한다.
    pub async fn confirm_hours(&self, staff_id: i64, log_id: i64) -> Result<HourLog, ApiError> {
        let staff = self.require_staff(staff_id, "confirm logs").await?;
        let log = self.require_log(log_id).await?;

        let confirmed = self
            .store
            .confirm_log(log.id, staff.id, Utc::now())
            .await?
            .ok_or_else(|| {
                ApiError::InvalidState(format!("log {} has already been reviewed", log.id))
            })?;

        tracing::info!(staff_id = staff.id, log_id = confirmed.id, "Hours confirmed");

        self.accolades.award_accolades(confirmed.student_id).await?;
        Ok(confirmed)
    }

    /// requested 기록을 거절
    ///
    /// 누계를 변경하지 않고 accolade 엔진도 실행하지 않는다.
    pub async fn deny_hours(&self, staff_id: i64, log_id: i64) -> Result<HourLog, ApiError> {
        let staff = self.require_staff(staff_id, "deny logs").await?;
        let log = self.require_log(log_id).await?;

        let denied = self
            .store
            .deny_log(log.id, staff.id, Utc::now())
            .await?
            .ok_or_else(|| {
                ApiError::InvalidState(format!("log {} has already been reviewed", log.id))
            })?;

        tracing::info!(staff_id = staff.id, log_id = denied.id, "Hours denied");
        Ok(denied)
    }

    async fn require_student(&self, student_id: i64) -> Result<Account, ApiError> {
        self.store
            .find_account(student_id)
            .await?
            .filter(Account::is_student)
            .ok_or_else(|| {
                ApiError::InvalidInput(format!("student {} does not exist", student_id))
            })
    }

    async fn require_staff(&self, staff_id: i64, action: &str) -> Result<Account, ApiError> {
        self.store
            .find_account(staff_id)
            .await?
            .filter(Account::is_staff)
            .ok_or_else(|| ApiError::Unauthorized(format!("Only staff can {}", action)))
    }

    async fn require_log(&self, log_id: i64) -> Result<HourLog, ApiError> {
        self.store
            .find_log(log_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Hour log".to_string()))
    }
}
