//! Auth Commands - 认证命令

use uuid::Uuid;

/// 注册
#[derive(Debug, Clone)]
pub struct SignUpCommand {
    pub email: String,
    pub password: String,
}

/// 注册结果
///
/// token 为 None 时表示供应商要求先完成邮箱确认
#[derive(Debug, Clone)]
pub struct SignUpResponse {
    pub user_id: Uuid,
    pub email: String,
    pub token: Option<String>,
}

/// 登录
#[derive(Debug, Clone)]
pub struct SignInCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SignInResponse {
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
}

/// 登出
#[derive(Debug, Clone)]
pub struct SignOutCommand {
    pub token: String,
}
