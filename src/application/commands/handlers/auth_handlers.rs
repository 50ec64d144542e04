//! Auth Command Handlers - 认证流程编排
//!
//! 认证委托给托管服务；登录成功后在本地签发 bearer token 会话

use std::sync::Arc;

use crate::application::commands::{
    SignInCommand, SignInResponse, SignOutCommand, SignUpCommand, SignUpResponse,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{AuthProviderPort, AuthSession, SessionManagerPort};

/// 注册命令处理器
pub struct SignUpHandler {
    provider: Arc<dyn AuthProviderPort>,
    session_manager: Arc<dyn SessionManagerPort>,
}

impl SignUpHandler {
    pub fn new(
        provider: Arc<dyn AuthProviderPort>,
        session_manager: Arc<dyn SessionManagerPort>,
    ) -> Self {
        Self {
            provider,
            session_manager,
        }
    }

    pub async fn handle(&self, cmd: SignUpCommand) -> Result<SignUpResponse, ApplicationError> {
        validate_credentials(&cmd.email, &cmd.password)?;

        let user = self.provider.sign_up(&cmd.email, &cmd.password).await?;
        tracing::info!(user_id = %user.user_id, "User signed up");

        // 供应商自动确认时直接签发本地会话，否则等待邮箱确认后登录
        let token = match &user.access_token {
            Some(access_token) => {
                let session = AuthSession::new(user.user_id, &user.email, access_token);
                Some(
                    self.session_manager
                        .create(session)
                        .map_err(|e| ApplicationError::InternalError(e.to_string()))?,
                )
            }
            None => None,
        };

        Ok(SignUpResponse {
            user_id: user.user_id,
            email: user.email,
            token,
        })
    }
}

/// 登录命令处理器
pub struct SignInHandler {
    provider: Arc<dyn AuthProviderPort>,
    session_manager: Arc<dyn SessionManagerPort>,
}

impl SignInHandler {
    pub fn new(
        provider: Arc<dyn AuthProviderPort>,
        session_manager: Arc<dyn SessionManagerPort>,
    ) -> Self {
        Self {
            provider,
            session_manager,
        }
    }

    pub async fn handle(&self, cmd: SignInCommand) -> Result<SignInResponse, ApplicationError> {
        validate_credentials(&cmd.email, &cmd.password)?;

        let user = self.provider.sign_in(&cmd.email, &cmd.password).await?;
        let access_token = user.access_token.ok_or_else(|| {
            ApplicationError::InternalError("Provider returned no access token".to_string())
        })?;

        let session = AuthSession::new(user.user_id, &user.email, access_token);
        let token = self
            .session_manager
            .create(session)
            .map_err(|e| ApplicationError::InternalError(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInResponse {
            token,
            user_id: user.user_id,
            email: user.email,
        })
    }
}

/// 登出命令处理器
pub struct SignOutHandler {
    provider: Arc<dyn AuthProviderPort>,
    session_manager: Arc<dyn SessionManagerPort>,
}

impl SignOutHandler {
    pub fn new(
        provider: Arc<dyn AuthProviderPort>,
        session_manager: Arc<dyn SessionManagerPort>,
    ) -> Self {
        Self {
            provider,
            session_manager,
        }
    }

    pub async fn handle(&self, cmd: SignOutCommand) -> Result<(), ApplicationError> {
        let session = self
            .session_manager
            .close(&cmd.token)
            .map_err(|e| ApplicationError::unauthorized(e.to_string()))?;

        // 供应商侧注销失败不影响本地会话关闭
        if let Err(e) = self.provider.sign_out(&session.access_token).await {
            tracing::warn!(user_id = %session.user_id, error = %e, "Provider sign-out failed");
        }

        tracing::info!(user_id = %session.user_id, "User signed out");
        Ok(())
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<(), ApplicationError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(ApplicationError::validation("Invalid email address"));
    }
    if password.is_empty() {
        return Err(ApplicationError::validation("Password cannot be empty"));
    }
    Ok(())
}
