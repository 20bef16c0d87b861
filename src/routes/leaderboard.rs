//! Leaderboard Endpoint

use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::services::LeaderboardEntry;
use crate::AppState;

/// GET /api/leaderboard
///
/// 학생 순위: 누계 내림차순, 동률은 id 오름차순
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let board = state.leaderboard.get_leaderboard().await?;
    Ok(Json(board))
}
