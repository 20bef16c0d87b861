//! Auth Endpoints
//!
//! 계정 생성과 자격 증명 검증.
//!
//! # Design Decision
//!
//! 토큰/쿠키 발급은 외부 계정/세션 서비스의 몫 (인증 프로토콜 설계는
//! 범위 밖). 여기서는 검증까지만 하고 인증된 신원 요약을 돌려준다.
//! 이후 요청은 행위자 id를 명시적으로 전달하며 코어가 역할을 재검증.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use super::AccountSummary;
use crate::error::ApiError;
use crate::types::Role;
use crate::AppState;

// ============ Request/Response Types ============

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub account: AccountSummary,
}

// ============ Handlers ============

/// POST /api/signup
///
/// 계정 생성. 중복 username은 409.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let account = state
        .directory
        .create_account(&req.username, &req.password, req.role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: format!("User {} created successfully", account.username),
            account: account.into(),
        }),
    ))
}

/// POST /api/login
///
/// 자격 증명 검증 후 신원 요약 반환. 실패 시 401.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let account = state
        .directory
        .authenticate(&req.username, &req.password)
        .await?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        account: account.into(),
    }))
}
