//! Leaderboard View
//!
//! Read-only ranking of students by confirmed hours.
//!
//! # Design Decision
//!
//! 매 호출마다 전체 재계산 (캐시 없음):
//! - 이 규모에서는 학생 전체 조회 + 정렬이 충분히 저렴
//! - 캐시를 두면 누계를 바꾸는 모든 원장 연산에서 무효화가 필요해짐
//!
//! 정렬은 저장소가 아니라 여기서 수행 — Postgres와 in-memory 구현이
//! 동일한 (테스트된) 정렬 경로를 공유한다.

use std::sync::Arc;

use serde::Serialize;

use crate::db::LedgerStore;
use crate::error::ApiError;
use crate::types::Role;

/// 리더보드 한 줄
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub student_id: i64,
    pub username: String,
    pub total_hours: i32,
}

/// 리더보드 뷰 (순수 읽기)
pub struct LeaderboardView {
    store: Arc<dyn LedgerStore>,
}

impl LeaderboardView {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// 전체 학생 순위
    ///
    /// 누계 내림차순, 동률은 계정 id 오름차순 (결정적 tie-break).
    pub async fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let mut students = self.store.list_accounts(Some(Role::Student)).await?;

        students.sort_by(|a, b| {
            b.total_hours
                .cmp(&a.total_hours)
                .then(a.id.cmp(&b.id))
        });

        Ok(students
            .into_iter()
            .enumerate()
            .map(|(i, s)| LeaderboardEntry {
                rank: i + 1,
                student_id: s.id,
                username: s.username,
                total_hours: s.total_hours,
            })
            .collect())
    }
}
