//! Accolade Engine
//!
//! Awards milestone accolades from a student's cumulative confirmed hours.
//!
//! # Design Decision
//!
//! 마일스톤 목록 {10, 20, 50}과 표시 이름은 로직이 아니라 설정 데이터:
//! - `MilestoneTable`이 오름차순 (기준 시간 → 이름) 테이블을 소유
//! - 테스트에서 다른 마일스톤 집합으로 교체 가능
//!
//! `award_accolades`는 호출 시점의 저장된 누계에서 매번 재계산하므로
//! 멱등이고, 누계 증가와 수여 사이에 프로세스가 죽어도 다음 검사에서
//! 자동 복구된다.

use std::sync::Arc;

use chrono::Utc;

use crate::db::{Accolade, Account, LedgerStore};
use crate::error::ApiError;

/// 마일스톤 한 단계: 누계 기준 시간과 표시 이름
#[derive(Debug, Clone, Copy)]
pub struct Milestone {
    pub hours: i32,
    pub name: &'static str,
}

/// 오름차순 마일스톤 테이블
#[derive(Debug, Clone)]
pub struct MilestoneTable {
    tiers: Vec<Milestone>,
}

impl MilestoneTable {
    /// 기본 마일스톤: 10→Bronze, 20→Silver, 50→Gold
    pub fn standard() -> Self {
        Self::new(vec![
            Milestone { hours: 10, name: "Bronze" },
            Milestone { hours: 20, name: "Silver" },
            Milestone { hours: 50, name: "Gold" },
        ])
    }

    /// 임의의 마일스톤 집합 (내부적으로 오름차순 정렬)
    pub fn new(mut tiers: Vec<Milestone>) -> Self {
        tiers.sort_by_key(|m| m.hours);
        Self { tiers }
    }

    /// 오름차순 순회
    pub fn iter(&self) -> impl Iterator<Item = &Milestone> {
        self.tiers.iter()
    }

    /// 마일스톤 값 → 표시 이름 (순수 함수)
    pub fn name_of(&self, hours: i32) -> Option<&'static str> {
        self.tiers.iter().find(|m| m.hours == hours).map(|m| m.name)
    }
}

/// 마일스톤 수여 엔진
pub struct AccoladeEngine {
    store: Arc<dyn LedgerStore>,
    milestones: MilestoneTable,
}

impl AccoladeEngine {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self::with_milestones(store, MilestoneTable::standard())
    }

    pub fn with_milestones(store: Arc<dyn LedgerStore>, milestones: MilestoneTable) -> Self {
        Self { store, milestones }
    }

    pub fn milestones(&self) -> &MilestoneTable {
        &self.milestones
    }

    /// 현재 누계 기준으로 미수여 마일스톤을 모두 수여
    ///
    /// 각 마일스톤을 오름차순으로 독립 평가하므로 한 번의 확정으로
    /// 여러 단계를 넘으면 (예: 5 → 55) 해당 단계가 전부 수여된다.
    /// 이미 수여된 조합은 저장소가 거르므로 중복 호출에 안전하다.
    ///
    /// 새로 수여된 accolade 목록을 반환 (없으면 빈 목록).
    pub async fn award_accolades(&self, student_id: i64) -> Result<Vec<Accolade>, ApiError> {
        let student = self.find_student(student_id).await?;

        let mut awarded = Vec::new();
        for tier in self.milestones.iter() {
            if student.total_hours < tier.hours {
                // 오름차순이므로 이후 단계도 전부 미달
                break;
            }
            if let Some(accolade) = self
                .store
                .insert_accolade(student.id, tier.hours, Utc::now())
                .await?
            {
                tracing::info!(
                    student_id = student.id,
                    milestone = tier.hours,
                    name = tier.name,
                    "🏅 Accolade awarded"
                );
                awarded.push(accolade);
            }
        }

        Ok(awarded)
    }

    /// 학생의 accolade 목록, 마일스톤 오름차순
    ///
    /// 수여 시각 순서가 아니라 고정 마일스톤 목록을 달성 집합으로
    /// 필터링한 순서를 반환한다.
    pub async fn student_accolades(&self, student_id: i64) -> Result<Vec<Accolade>, ApiError> {
        let student = self.find_student(student_id).await?;
        let earned = self.store.accolades_for(student.id).await?;

        let mut result = Vec::new();
        for tier in self.milestones.iter() {
            if let Some(accolade) = earned.iter().find(|a| a.milestone == tier.hours) {
                result.push(accolade.clone());
            }
        }

        Ok(result)
    }

    async fn find_student(&self, student_id: i64) -> Result<Account, ApiError> {
        self.store
            .find_account(student_id)
            .await?
            .filter(Account::is_student)
            .ok_or_else(|| ApiError::NotFound("Student".to_string()))
    }
}
