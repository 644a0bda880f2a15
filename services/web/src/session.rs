//! Cookie-backed login sessions held in the in-memory cache

use std::time::Duration;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use common::cache::{CacheConfig, MemoryCache};
use tasks::models::UserId;
use tracing::info;
use uuid::Uuid;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "taskdesk_session";

/// Session manager mapping opaque tokens to user identities
#[derive(Clone)]
pub struct SessionManager {
    sessions: MemoryCache<UserId>,
}

impl SessionManager {
    /// Create a session manager whose sessions live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: MemoryCache::new(CacheConfig {
                default_ttl: Some(ttl),
            }),
        }
    }

    /// Start a session for a user, returning its token
    pub async fn create_session(&self, user_id: UserId) -> String {
        info!("Creating session for user: {}", user_id);

        let token = Uuid::new_v4().simple().to_string();
        self.sessions
            .set_default(&session_key(&token), user_id)
            .await;
        token
    }

    /// User behind a live session token
    pub async fn get_session(&self, token: &str) -> Option<UserId> {
        self.sessions.get(&session_key(token)).await
    }

    /// End a session, returning whether it was live
    pub async fn delete_session(&self, token: &str) -> bool {
        info!("Deleting session");
        self.sessions.delete(&session_key(token)).await
    }

    /// Drop sessions whose lifetime has passed
    pub async fn cleanup_expired_sessions(&self) -> usize {
        let removed = self.sessions.purge_expired().await;
        if removed > 0 {
            info!("Cleaned up {} expired sessions", removed);
        }
        removed
    }

    /// Session token presented by the client, if any
    pub fn token(jar: &CookieJar) -> Option<String> {
        jar.get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    }

    /// Cookie handing `token` to the client
    pub fn cookie(token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    /// Cookie that clears the session on the client
    pub fn removal_cookie() -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE).path("/").build()
    }
}

fn session_key(token: &str) -> String {
    format!("session:{}", token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_round_trip() {
        let sessions = SessionManager::new(Duration::from_secs(60));
        let user_id = UserId::new();

        let token = sessions.create_session(user_id).await;
        assert_eq!(sessions.get_session(&token).await, Some(user_id));

        assert!(sessions.delete_session(&token).await);
        assert_eq!(sessions.get_session(&token).await, None);
        assert!(!sessions.delete_session(&token).await);
    }

    #[tokio::test]
    async fn test_tokens_are_distinct_per_login() {
        let sessions = SessionManager::new(Duration::from_secs(60));
        let user_id = UserId::new();

        let first = sessions.create_session(user_id).await;
        let second = sessions.create_session(user_id).await;
        assert_ne!(first, second);
        assert_eq!(sessions.get_session(&first).await, Some(user_id));
        assert_eq!(sessions.get_session(&second).await, Some(user_id));
    }

    #[tokio::test]
    async fn test_expired_sessions_are_rejected_and_cleaned() {
        let sessions = SessionManager::new(Duration::from_millis(20));
        let token = sessions.create_session(UserId::new()).await;

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(sessions.cleanup_expired_sessions().await, 1);
        assert_eq!(sessions.get_session(&token).await, None);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = SessionManager::cookie("abc".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));

        let jar = CookieJar::new().add(cookie);
        assert_eq!(SessionManager::token(&jar).as_deref(), Some("abc"));
        assert_eq!(SessionManager::token(&CookieJar::new()), None);
    }
}
