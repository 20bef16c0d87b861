//! User Listing Endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::AccountSummary;
use crate::error::ApiError;
use crate::types::Role;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    /// 역할 필터 (student | staff), 없으면 전체
    pub role: Option<Role>,
}

/// GET /api/users?role=student
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<Vec<AccountSummary>>, ApiError> {
    let accounts = state.directory.list_accounts(query.role).await?;
    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}
