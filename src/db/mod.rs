//! Database Module
//!
//! # Design Decision
//!
//! PostgreSQL + SQLx:
//! - ACID 트랜잭션: 상태 전이와 누계 증가를 한 단위로 커밋
//! - 상태 가드 UPDATE(`WHERE status = 'requested'`)로 동시 confirm/deny
//!   중 최대 한 건만 성공 — row lock이 경쟁자를 직렬화하고, 패자는
//!   0 rows를 보고 InvalidState로 처리됨
//! - UNIQUE (student_id, milestone) + ON CONFLICT DO NOTHING으로
//!   마일스톤 수여 멱등성 보장

mod models;
mod store;

pub use models::*;
pub use store::LedgerStore;

#[cfg(test)]
pub use store::memory::MemoryStore;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::types::{LogStatus, Role};

/// 데이터베이스 연결 및 쿼리 담당
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// 데이터베이스 연결
    ///
    /// # Connection Pool Settings
    ///
    /// - max_connections: 10 (트래픽에 따라 조정)
    /// - min_connections: 1 (idle 시 최소 유지)
    /// - acquire_timeout: 3초 (커넥션 획득 대기)
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(std::time::Duration::from_secs(3))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// 마이그레이션 실행
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

const LOG_COLUMNS: &str = "id, student_id, staff_id, hours, status, created_at, reviewed_at";

#[async_trait]
impl LedgerStore for Database {
    async fn insert_account(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (username, password_hash, role, total_hours, created_at)
            VALUES ($1, $2, $3, 0, $4)
            RETURNING id, username, password_hash, role, total_hours, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_account(&self, id: i64) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, password_hash, role, total_hours, created_at
             FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, password_hash, role, total_hours, created_at
             FROM accounts WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn list_accounts(&self, role: Option<Role>) -> Result<Vec<Account>> {
        let accounts = match role {
            Some(role) => {
                sqlx::query_as::<_, Account>(
                    "SELECT id, username, password_hash, role, total_hours, created_at
                     FROM accounts WHERE role = $1 ORDER BY id",
                )
                .bind(role)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Account>(
                    "SELECT id, username, password_hash, role, total_hours, created_at
                     FROM accounts ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(accounts)
    }

    async fn insert_requested_log(
        &self,
        student_id: i64,
        hours: i32,
        now: DateTime<Utc>,
    ) -> Result<HourLog> {
        let log = sqlx::query_as::<_, HourLog>(&format!(
            r#"
            INSERT INTO hour_logs (student_id, hours, status, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {LOG_COLUMNS}
            "#
        ))
        .bind(student_id)
        .bind(hours)
        .bind(LogStatus::Requested)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    async fn insert_confirmed_log(
        &self,
        staff_id: i64,
        student_id: i64,
        hours: i32,
        now: DateTime<Utc>,
    ) -> Result<HourLog> {
        // 삽입과 누계 증가를 같은 트랜잭션으로
        let mut tx = self.pool.begin().await?;

        let log = sqlx::query_as::<_, HourLog>(&format!(
            r#"
            INSERT INTO hour_logs (student_id, staff_id, hours, status, created_at, reviewed_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING {LOG_COLUMNS}
            "#
        ))
        .bind(student_id)
        .bind(staff_id)
        .bind(hours)
        .bind(LogStatus::Confirmed)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE accounts SET total_hours = total_hours + $1 WHERE id = $2")
            .bind(hours)
            .bind(student_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(log)
    }

    async fn find_log(&self, id: i64) -> Result<Option<HourLog>> {
        let log = sqlx::query_as::<_, HourLog>(&format!(
            "SELECT {LOG_COLUMNS} FROM hour_logs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(log)
    }

    async fn logs_for_student(&self, student_id: i64) -> Result<Vec<HourLog>> {
        // 생성 순서 = id 순서 (BIGSERIAL)
        let logs = sqlx::query_as::<_, HourLog>(&format!(
            "SELECT {LOG_COLUMNS} FROM hour_logs WHERE student_id = $1 ORDER BY id"
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    async fn pending_logs(&self) -> Result<Vec<HourLog>> {
        let logs = sqlx::query_as::<_, HourLog>(&format!(
            "SELECT {LOG_COLUMNS} FROM hour_logs WHERE status = $1 ORDER BY id"
        ))
        .bind(LogStatus::Requested)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    async fn confirm_log(
        &self,
        log_id: i64,
        staff_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<HourLog>> {
        let mut tx = self.pool.begin().await?;

        // 상태 가드 UPDATE: requested가 아니면 0 rows
        let log = sqlx::query_as::<_, HourLog>(&format!(
            r#"
            UPDATE hour_logs
            SET status = $1, staff_id = $2, reviewed_at = $3
            WHERE id = $4 AND status = $5
            RETURNING {LOG_COLUMNS}
            "#
        ))
        .bind(LogStatus::Confirmed)
        .bind(staff_id)
        .bind(now)
        .bind(log_id)
        .bind(LogStatus::Requested)
        .fetch_optional(&mut *tx)
        .await?;

        let log = match log {
            Some(log) => log,
            None => {
                tx.rollback().await?;
                return Ok(None);
            }
        };

        sqlx::query("UPDATE accounts SET total_hours = total_hours + $1 WHERE id = $2")
            .bind(log.hours)
            .bind(log.student_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(log))
    }

    async fn deny_log(
        &self,
        log_id: i64,
        staff_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<HourLog>> {
        // 누계 변경이 없으므로 단일 문장으로 충분
        let log = sqlx::query_as::<_, HourLog>(&format!(
            r#"
            UPDATE hour_logs
            SET status = $1, staff_id = $2, reviewed_at = $3
            WHERE id = $4 AND status = $5
            RETURNING {LOG_COLUMNS}
            "#
        ))
        .bind(LogStatus::Denied)
        .bind(staff_id)
        .bind(now)
        .bind(log_id)
        .bind(LogStatus::Requested)
        .fetch_optional(&self.pool)
        .await?;

        Ok(log)
    }

    async fn accolades_for(&self, student_id: i64) -> Result<Vec<Accolade>> {
        let accolades = sqlx::query_as::<_, Accolade>(
            "SELECT id, student_id, milestone, awarded_at
             FROM accolades WHERE student_id = $1 ORDER BY id",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(accolades)
    }

    async fn insert_accolade(
        &self,
        student_id: i64,
        milestone: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<Accolade>> {
        // 이미 수여된 조합이면 DO NOTHING → None
        let accolade = sqlx::query_as::<_, Accolade>(
            r#"
            INSERT INTO accolades (student_id, milestone, awarded_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (student_id, milestone) DO NOTHING
            RETURNING id, student_id, milestone, awarded_at
            "#,
        )
        .bind(student_id)
        .bind(milestone)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(accolade)
    }
}
