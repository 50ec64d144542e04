//! In-Memory Session Manager Implementation

use chrono::Utc;
use dashmap::DashMap;

use crate::application::ports::{AuthSession, SessionError, SessionManagerPort};

/// 内存会话管理器
///
/// 以本地会话令牌为键；进程重启即全部失效
pub struct InMemorySessionManager {
    sessions: DashMap<String, AuthSession>,
}

impl InMemorySessionManager {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

impl Default for InMemorySessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManagerPort for InMemorySessionManager {
    fn create(&self, session: AuthSession) -> Result<String, SessionError> {
        let token = session.token.clone();
        if self.sessions.contains_key(&token) {
            return Err(SessionError::AlreadyExists(token));
        }
        tracing::info!(user_id = %session.user_id, "Session created");
        self.sessions.insert(token.clone(), session);
        Ok(token)
    }

    fn get(&self, token: &str) -> Result<AuthSession, SessionError> {
        self.sessions
            .get(token)
            .map(|s| s.clone())
            .ok_or_else(|| SessionError::NotFound(token.to_string()))
    }

    fn close(&self, token: &str) -> Result<AuthSession, SessionError> {
        self.sessions
            .remove(token)
            .map(|(_, session)| {
                tracing::info!(user_id = %session.user_id, "Session closed");
                session
            })
            .ok_or_else(|| SessionError::NotFound(token.to_string()))
    }

    fn touch(&self, token: &str) {
        if let Some(mut session) = self.sessions.get_mut(token) {
            session.last_activity = Utc::now();
        }
    }

    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String> {
        let now = Utc::now();
        let timeout = chrono::Duration::seconds(idle_timeout_secs as i64);

        self.sessions
            .iter()
            .filter_map(|entry| {
                let elapsed = now - entry.last_activity;
                if elapsed > timeout {
                    Some(entry.key().clone())
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_session_lifecycle() {
        let manager = InMemorySessionManager::new();
        let session = AuthSession::new(Uuid::new_v4(), "sophia@example.com", "provider-token");
        let token = manager.create(session).unwrap();

        let session = manager.get(&token).unwrap();
        assert_eq!(session.email, "sophia@example.com");

        let closed = manager.close(&token).unwrap();
        assert_eq!(closed.access_token, "provider-token");
        assert!(manager.get(&token).is_err());
    }

    #[test]
    fn test_expired_session_detection() {
        let manager = InMemorySessionManager::new();
        let mut session = AuthSession::new(Uuid::new_v4(), "a@example.com", "t");
        session.last_activity = Utc::now() - chrono::Duration::seconds(120);
        let token = manager.create(session).unwrap();

        assert_eq!(manager.get_expired_sessions(60), vec![token.clone()]);
        assert!(manager.get_expired_sessions(600).is_empty());

        // touch 之后不再过期
        manager.touch(&token);
        assert!(manager.get_expired_sessions(60).is_empty());
    }

    #[test]
    fn test_close_unknown_token() {
        let manager = InMemorySessionManager::new();
        assert!(matches!(
            manager.close("bogus"),
            Err(SessionError::NotFound(_))
        ));
    }
}
