//! Common Types Module
//!
//! 애플리케이션 전반에서 사용되는 공통 타입 정의

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 계정 역할
///
/// # Design Decision
///
/// 원래 설계의 Student/Staff 서브클래싱 대신 단일 Account 레코드 + role enum:
/// - `total_hours`는 student 계정에서만 의미 있음
/// - Postgres enum 타입(`account_role`)과 1:1 매핑
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Staff,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Staff => write!(f, "staff"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "staff" => Ok(Role::Staff),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// 시간 기록 상태
///
/// 상태 전이는 requested → confirmed 또는 requested → denied 만 허용.
/// confirmed/denied는 종결 상태 (불변).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "log_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Requested,
    Confirmed,
    Denied,
}

impl LogStatus {
    /// 종결 상태 여부 (더 이상 전이 불가)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LogStatus::Requested)
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogStatus::Requested => write!(f, "requested"),
            LogStatus::Confirmed => write!(f, "confirmed"),
            LogStatus::Denied => write!(f, "denied"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_roundtrip() {
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!("Staff".parse::<Role>().unwrap(), Role::Staff);
        assert!("admin".parse::<Role>().is_err());
        assert_eq!(Role::Student.to_string(), "student");
    }

    #[test]
    fn test_terminal_states() {
        assert!(!LogStatus::Requested.is_terminal());
        assert!(LogStatus::Confirmed.is_terminal());
        assert!(LogStatus::Denied.is_terminal());
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&LogStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
    }
}
