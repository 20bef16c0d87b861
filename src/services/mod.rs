//! Services Module
//!
//! 비즈니스 로직을 담당하는 서비스 레이어
//!
//! # Services
//! - `AccountDirectory`: 계정 조회 / 자격 증명 검증
//! - `HourLedger`: 시간 기록 상태 기계 (requested → confirmed/denied)
//! - `AccoladeEngine`: 마일스톤 평가 및 수여
//! - `LeaderboardView`: 학생 순위 (순수 읽기)

mod accolades;
mod directory;
mod leaderboard;
mod ledger;

pub use accolades::{AccoladeEngine, Milestone, MilestoneTable};
pub use directory::AccountDirectory;
pub use leaderboard::{LeaderboardEntry, LeaderboardView};
pub use ledger::HourLedger;
