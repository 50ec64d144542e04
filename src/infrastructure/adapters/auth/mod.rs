//! Auth Adapter - 托管认证服务客户端实现

mod fake_auth_client;
mod http_auth_client;

pub use fake_auth_client::FakeAuthClient;
pub use http_auth_client::{HttpAuthClient, HttpAuthClientConfig};
