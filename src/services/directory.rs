//! Account Directory
//!
//! Identity lookup and credential verification for the core.
//!
//! # Design Decision
//!
//! 비밀번호는 Argon2id PHC 문자열로만 저장:
//! - 코어의 다른 부분은 해시를 읽거나 쓰지 않음 — 검증은 이 모듈의
//!   `verify_password`를 통해서만
//! - 토큰/세션 발급은 범위 밖 (외부 계정/세션 서비스의 몫);
//!   `authenticate`는 자격 증명 검증까지만 담당

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::db::{Account, LedgerStore};
use crate::error::ApiError;
use crate::types::Role;

/// 계정 디렉터리 서비스
pub struct AccountDirectory {
    store: Arc<dyn LedgerStore>,
}

impl AccountDirectory {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// 계정 생성
    ///
    /// 빈 username/password는 InvalidInput, 중복 username은 Conflict.
    pub async fn create_account(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Account, ApiError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ApiError::InvalidInput("username must not be empty".to_string()));
        }
        if password.is_empty() {
            return Err(ApiError::InvalidInput("password must not be empty".to_string()));
        }
        if self.store.find_account_by_username(username).await?.is_some() {
            // DB unique 제약이 경쟁 삽입의 최종 방어선
            return Err(ApiError::Conflict("User already exists".to_string()));
        }

        let password_hash = hash_password(password)?;
        let account = self
            .store
            .insert_account(username, &password_hash, role, Utc::now())
            .await?;

        tracing::info!(id = account.id, username = %account.username, role = %account.role, "Account created");
        Ok(account)
    }

    pub async fn find_account(&self, id: i64) -> Result<Account, ApiError> {
        self.store
            .find_account(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Account".to_string()))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>, ApiError> {
        Ok(self.store.find_account_by_username(username).await?)
    }

    /// 역할 필터 옵션 포함 계정 목록
    pub async fn list_accounts(&self, role: Option<Role>) -> Result<Vec<Account>, ApiError> {
        Ok(self.store.list_accounts(role).await?)
    }

    /// 저장된 해시에 대한 평문 검증
    pub fn verify_password(&self, account: &Account, plaintext: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&account.password_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }

    /// 자격 증명 검증 후 계정 반환
    ///
    /// 존재하지 않는 username과 틀린 비밀번호를 구분하지 않는다
    /// (계정 존재 여부 노출 방지).
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Account, ApiError> {
        let account = self
            .store
            .find_account_by_username(username)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !self.verify_password(&account, password) {
            return Err(ApiError::InvalidCredentials);
        }
        Ok(account)
    }
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|err| {
            tracing::error!("Password hashing failed: {}", err);
            ApiError::InternalError
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn directory() -> AccountDirectory {
        AccountDirectory::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let dir = directory();
        let account = dir
            .create_account("bob", "bobpass", Role::Student)
            .await
            .unwrap();

        assert_eq!(account.username, "bob");
        assert_eq!(account.role, Role::Student);
        assert_eq!(account.total_hours, 0);
        // 평문이 저장되면 안 됨
        assert_ne!(account.password_hash, "bobpass");
        assert!(account.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_verify_password() {
        let dir = directory();
        let account = dir
            .create_account("bob", "mypass", Role::Student)
            .await
            .unwrap();

        assert!(dir.verify_password(&account, "mypass"));
        assert!(!dir.verify_password(&account, "wrong"));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let dir = directory();
        dir.create_account("jwtuser", "jwtpw", Role::Student)
            .await
            .unwrap();

        let account = dir.authenticate("jwtuser", "jwtpw").await.unwrap();
        assert_eq!(account.username, "jwtuser");

        let err = dir.authenticate("jwtuser", "bad").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials));
        let err = dir.authenticate("nobody", "jwtpw").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let dir = directory();
        dir.create_account("bob", "p1", Role::Student).await.unwrap();

        let err = dir
            .create_account("bob", "p2", Role::Staff)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_empty_fields_rejected() {
        let dir = directory();
        let err = dir.create_account("  ", "p", Role::Student).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        let err = dir.create_account("bob", "", Role::Student).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_list_accounts_by_role() {
        let dir = directory();
        dir.create_account("u1", "p1", Role::Student).await.unwrap();
        dir.create_account("u2", "p2", Role::Staff).await.unwrap();

        let students = dir.list_accounts(Some(Role::Student)).await.unwrap();
        assert!(students.iter().any(|u| u.username == "u1"));
        assert!(students.iter().all(|u| u.role == Role::Student));

        let all = dir.list_accounts(None).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
