//! Database Models
//!
//! Record types for the three persisted sets: accounts, hour logs, accolades.
//! Hour logs and accolades are each foreign-keyed to an account.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::types::{LogStatus, Role};

/// 표시용 시간 포맷 (예: "2025-10-17 14:30")
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// 사용자 계정
///
/// student와 staff를 단일 레코드로 표현 (role enum으로 구분).
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: i64,

    /// 로그인 이름 (unique, 비어 있지 않음)
    pub username: String,

    /// Argon2id PHC 문자열
    /// 평문 비밀번호는 절대 저장하지 않음!
    pub password_hash: String,

    pub role: Role,

    /// 승인된 봉사 시간 누계
    /// student 계정에서만 의미 있음 (staff는 항상 0)
    pub total_hours: i32,

    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn is_staff(&self) -> bool {
        self.role == Role::Staff
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}

/// 봉사 시간 기록
///
/// 학생의 요청(requested) 또는 staff의 직접 기록(confirmed)으로 생성.
/// confirmed/denied로 전이된 후에는 불변.
#[derive(Debug, Clone, FromRow)]
pub struct HourLog {
    pub id: i64,

    /// 소유 학생
    pub student_id: i64,

    /// 검토한 staff (검토 전에는 NULL)
    pub staff_id: Option<i64>,

    /// 봉사 시간 (항상 > 0)
    pub hours: i32,

    pub status: LogStatus,

    pub created_at: DateTime<Utc>,

    /// confirmed/denied 전이 시각 (검토 전에는 NULL)
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl HourLog {
    /// 생성 시각 표시용 포맷
    pub fn format_created_time(&self) -> String {
        self.created_at.format(TIME_FORMAT).to_string()
    }

    /// 검토 시각 표시용 포맷 (미검토 시 None)
    pub fn format_reviewed_time(&self) -> Option<String> {
        self.reviewed_at.map(|t| t.format(TIME_FORMAT).to_string())
    }
}

/// 마일스톤 달성 기록
///
/// (student, milestone) 조합당 최대 1개 — DB unique 제약으로 보장.
#[derive(Debug, Clone, FromRow)]
pub struct Accolade {
    pub id: i64,
    pub student_id: i64,

    /// 달성한 누계 시간 기준점 (10, 20, 50)
    pub milestone: i32,

    pub awarded_at: DateTime<Utc>,
}

impl Accolade {
    /// 수여 시각 표시용 포맷
    pub fn format_awarded_time(&self) -> String {
        self.awarded_at.format(TIME_FORMAT).to_string()
    }
}
