//! API Routes Module
//!
//! 모든 HTTP 엔드포인트 정의
//!
//! # Routes
//! - `/health` - 헬스 체크
//! - `/api/signup`, `/api/login` - 계정 생성 / 자격 증명 검증
//! - `/api/users` - 계정 목록
//! - `/api/students/*` - 시간 요청, 기록/accolade 조회
//! - `/api/logs/*` - staff 검토 (pending 목록, 직접 기록, 확정/거절)
//! - `/api/leaderboard` - 학생 순위

pub mod auth;
pub mod health;
pub mod leaderboard;
pub mod staff;
pub mod student;
pub mod users;

use crate::db::Account;
use crate::types::Role;
use serde::Serialize;

/// 비밀번호 해시를 제외한 계정 표현 (모든 응답 공용)
#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub total_hours: i32,
}

impl From<Account> for AccountSummary {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            role: account.role,
            total_hours: account.total_hours,
        }
    }
}
