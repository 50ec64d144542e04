//! Fake Auth Client（测试用）
//!
//! 内存注册表模拟托管认证服务：重复注册、错误口令等
//! 行为与真实供应商的稳定错误码一致

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::{AuthError, AuthProviderPort, ProviderUser};

struct RegisteredUser {
    user_id: Uuid,
    password: String,
}

/// 测试用认证客户端
pub struct FakeAuthClient {
    users: Mutex<HashMap<String, RegisteredUser>>,
    fail_next: Mutex<Option<AuthError>>,
}

impl FakeAuthClient {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            fail_next: Mutex::new(None),
        }
    }

    /// 注入下一次调用的失败
    pub fn fail_next(&self, error: AuthError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    fn take_injected_failure(&self) -> Option<AuthError> {
        self.fail_next.lock().unwrap().take()
    }
}

impl Default for FakeAuthClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProviderPort for FakeAuthClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderUser, AuthError> {
        if let Some(error) = self.take_injected_failure() {
            return Err(error);
        }

        let mut users = self.users.lock().unwrap();
        if users.contains_key(email) {
            return Err(AuthError::UserAlreadyExists);
        }

        let user_id = Uuid::new_v4();
        users.insert(
            email.to_string(),
            RegisteredUser {
                user_id,
                password: password.to_string(),
            },
        );

        Ok(ProviderUser {
            user_id,
            email: email.to_string(),
            access_token: Some(format!("fake-access-{user_id}")),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderUser, AuthError> {
        if let Some(error) = self.take_injected_failure() {
            return Err(error);
        }

        let users = self.users.lock().unwrap();
        match users.get(email) {
            Some(user) if user.password == password => Ok(ProviderUser {
                user_id: user.user_id,
                email: email.to_string(),
                access_token: Some(format!("fake-access-{}", user.user_id)),
            }),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
        if let Some(error) = self.take_injected_failure() {
            return Err(error);
        }
        Ok(())
    }
}
