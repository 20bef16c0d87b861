//! Ledger Store Abstraction
//!
//! # Design Decision
//!
//! 데이터 접근을 trait로 추상화 (Repository 패턴):
//! - 비즈니스 로직(services)과 데이터 접근 분리
//! - 단위 테스트는 in-memory 구현으로 Postgres 없이 실행
//! - 상태 전이의 직렬화 보장(동시 confirm/deny 중 최대 1건 성공)은
//!   store 구현의 책임 — SQL은 status 가드 UPDATE, 메모리는 단일 락
//!
//! 트랜잭션 경계가 필요한 복합 연산(전이 + 누계 증가)은 trait 메서드
//! 하나로 노출한다. 절반만 커밋된 상태가 존재할 수 없게 하기 위함.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::models::{Accolade, Account, HourLog};
use crate::types::Role;

/// 계정 / 시간 기록 / 마일스톤 기록 저장소 인터페이스
#[async_trait]
pub trait LedgerStore: Send + Sync {
    // ============ Accounts ============

    /// 계정 생성 (id는 저장소가 발급)
    async fn insert_account(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<Account>;

    async fn find_account(&self, id: i64) -> Result<Option<Account>>;

    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// 역할 필터 옵션 포함 전체 계정 조회 (id 오름차순)
    async fn list_accounts(&self, role: Option<Role>) -> Result<Vec<Account>>;

    // ============ Hour Logs ============

    /// status=requested 기록 생성 (누계 변경 없음)
    async fn insert_requested_log(
        &self,
        student_id: i64,
        hours: i32,
        now: DateTime<Utc>,
    ) -> Result<HourLog>;

    /// staff 직접 기록: confirmed 기록 삽입 + 학생 누계 증가를
    /// 하나의 트랜잭션으로 수행
    async fn insert_confirmed_log(
        &self,
        staff_id: i64,
        student_id: i64,
        hours: i32,
        now: DateTime<Utc>,
    ) -> Result<HourLog>;

    async fn find_log(&self, id: i64) -> Result<Option<HourLog>>;

    /// 학생의 모든 기록, 생성 순서 (상태 무관)
    async fn logs_for_student(&self, student_id: i64) -> Result<Vec<HourLog>>;

    /// 전체 requested 기록, 생성 순서
    async fn pending_logs(&self) -> Result<Vec<HourLog>>;

    /// requested → confirmed 전이 + 학생 누계 증가 (원자적)
    ///
    /// 현재 status가 requested가 아니면 아무것도 변경하지 않고 None.
    /// 동시 호출 시 최대 한 건만 Some을 받는다.
    async fn confirm_log(
        &self,
        log_id: i64,
        staff_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<HourLog>>;

    /// requested → denied 전이. 누계는 변경하지 않음.
    async fn deny_log(
        &self,
        log_id: i64,
        staff_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<HourLog>>;

    // ============ Accolades ============

    /// 학생의 마일스톤 기록 (수여 순서)
    async fn accolades_for(&self, student_id: i64) -> Result<Vec<Accolade>>;

    /// 멱등 삽입: (student, milestone)이 이미 있으면 None
    async fn insert_accolade(
        &self,
        student_id: i64,
        milestone: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<Accolade>>;
}

// PostgreSQL 구현은 db/mod.rs의 Database 구조체에 있음
// 테스트용 in-memory 구현:

#[cfg(test)]
pub mod memory {
    use std::sync::Mutex;

    use super::*;
    use crate::types::LogStatus;

    /// 단일 Mutex 뒤의 in-memory 저장소
    ///
    /// 락 하나로 모든 복합 연산이 직렬화되므로 Postgres 구현과 동일한
    /// 전이 보장을 갖는다.
    pub struct MemoryStore {
        inner: Mutex<Inner>,
    }

    #[derive(Default)]
    struct Inner {
        accounts: Vec<Account>,
        logs: Vec<HourLog>,
        accolades: Vec<Accolade>,
        next_account_id: i64,
        next_log_id: i64,
        next_accolade_id: i64,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self {
                inner: Mutex::new(Inner {
                    next_account_id: 1,
                    next_log_id: 1,
                    next_accolade_id: 1,
                    ..Inner::default()
                }),
            }
        }
    }

    #[async_trait]
    impl LedgerStore for MemoryStore {
        async fn insert_account(
            &self,
            username: &str,
            password_hash: &str,
            role: Role,
            now: DateTime<Utc>,
        ) -> Result<Account> {
            let mut inner = self.inner.lock().unwrap();
            let account = Account {
                id: inner.next_account_id,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
                role,
                total_hours: 0,
                created_at: now,
            };
            inner.next_account_id += 1;
            inner.accounts.push(account.clone());
            Ok(account)
        }

        async fn find_account(&self, id: i64) -> Result<Option<Account>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.accounts.iter().find(|a| a.id == id).cloned())
        }

        async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .accounts
                .iter()
                .find(|a| a.username == username)
                .cloned())
        }

        async fn list_accounts(&self, role: Option<Role>) -> Result<Vec<Account>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .accounts
                .iter()
                .filter(|a| role.map_or(true, |r| a.role == r))
                .cloned()
                .collect())
        }

        async fn insert_requested_log(
            &self,
            student_id: i64,
            hours: i32,
            now: DateTime<Utc>,
        ) -> Result<HourLog> {
            let mut inner = self.inner.lock().unwrap();
            let log = HourLog {
                id: inner.next_log_id,
                student_id,
                staff_id: None,
                hours,
                status: LogStatus::Requested,
                created_at: now,
                reviewed_at: None,
            };
            inner.next_log_id += 1;
            inner.logs.push(log.clone());
            Ok(log)
        }

        async fn insert_confirmed_log(
            &self,
            staff_id: i64,
            student_id: i64,
            hours: i32,
            now: DateTime<Utc>,
        ) -> Result<HourLog> {
            let mut inner = self.inner.lock().unwrap();
            let log = HourLog {
                id: inner.next_log_id,
                student_id,
                staff_id: Some(staff_id),
                hours,
                status: LogStatus::Confirmed,
                created_at: now,
                reviewed_at: Some(now),
            };
            inner.next_log_id += 1;
            inner.logs.push(log.clone());
            if let Some(student) = inner.accounts.iter_mut().find(|a| a.id == student_id) {
                student.total_hours += hours;
            }
            Ok(log)
        }

        async fn find_log(&self, id: i64) -> Result<Option<HourLog>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.logs.iter().find(|l| l.id == id).cloned())
        }

        async fn logs_for_student(&self, student_id: i64) -> Result<Vec<HourLog>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .logs
                .iter()
                .filter(|l| l.student_id == student_id)
                .cloned()
                .collect())
        }

        async fn pending_logs(&self) -> Result<Vec<HourLog>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .logs
                .iter()
                .filter(|l| l.status == LogStatus::Requested)
                .cloned()
                .collect())
        }

        async fn confirm_log(
            &self,
            log_id: i64,
            staff_id: i64,
            now: DateTime<Utc>,
        ) -> Result<Option<HourLog>> {
            let mut inner = self.inner.lock().unwrap();
            let (student_id, hours, updated) = {
                let log = match inner
                    .logs
                    .iter_mut()
                    .find(|l| l.id == log_id && l.status == LogStatus::Requested)
                {
                    Some(log) => log,
                    None => return Ok(None),
                };
                log.status = LogStatus::Confirmed;
                log.staff_id = Some(staff_id);
                log.reviewed_at = Some(now);
                (log.student_id, log.hours, log.clone())
            };
            if let Some(student) = inner.accounts.iter_mut().find(|a| a.id == student_id) {
                student.total_hours += hours;
            }
            Ok(Some(updated))
        }

        async fn deny_log(
            &self,
            log_id: i64,
            staff_id: i64,
            now: DateTime<Utc>,
        ) -> Result<Option<HourLog>> {
            let mut inner = self.inner.lock().unwrap();
            let log = match inner
                .logs
                .iter_mut()
                .find(|l| l.id == log_id && l.status == LogStatus::Requested)
            {
                Some(log) => log,
                None => return Ok(None),
            };
            log.status = LogStatus::Denied;
            log.staff_id = Some(staff_id);
            log.reviewed_at = Some(now);
            Ok(Some(log.clone()))
        }

        async fn accolades_for(&self, student_id: i64) -> Result<Vec<Accolade>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .accolades
                .iter()
                .filter(|a| a.student_id == student_id)
                .cloned()
                .collect())
        }

        async fn insert_accolade(
            &self,
            student_id: i64,
            milestone: i32,
            now: DateTime<Utc>,
        ) -> Result<Option<Accolade>> {
            let mut inner = self.inner.lock().unwrap();
            let exists = inner
                .accolades
                .iter()
                .any(|a| a.student_id == student_id && a.milestone == milestone);
            if exists {
                return Ok(None);
            }
            let accolade = Accolade {
                id: inner.next_accolade_id,
                student_id,
                milestone,
                awarded_at: now,
            };
            inner.next_accolade_id += 1;
            inner.accolades.push(accolade.clone());
            Ok(Some(accolade))
        }
    }
}
