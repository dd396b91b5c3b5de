use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionStore;
use crate::domain::user::models::UserId;

/// Process-local session store.
///
/// Sessions do not survive a restart; every user simply logs in again.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) -> Result<(), SessionError> {
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session);
        Ok(())
    }

    async fn find(&self, token: &str) -> Result<Option<Session>, SessionError> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> Result<(), SessionError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }

    async fn remove_for_user(&self, user_id: &UserId) -> Result<usize, SessionError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.user_id != *user_id);
        Ok(before - sessions.len())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        Ok(before - sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use super::*;

    fn session(token: &str, expires_at: DateTime<Utc>) -> Session {
        session_of(token, UserId::new(), expires_at)
    }

    fn session_of(token: &str, user_id: UserId, expires_at: DateTime<Utc>) -> Session {
        Session {
            token: token.to_string(),
            user_id,
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_insert_find_remove() {
        let store = InMemorySessionStore::new();
        let stored = session("abc", Utc::now() + Duration::hours(1));

        store.insert(stored.clone()).await.unwrap();
        assert_eq!(store.find("abc").await.unwrap(), Some(stored));

        store.remove("abc").await.unwrap();
        store.remove("abc").await.unwrap();
        assert_eq!(store.find("abc").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let store = InMemorySessionStore::new();
        let now = Utc::now();

        store
            .insert(session("old", now - Duration::seconds(1)))
            .await
            .unwrap();
        store
            .insert(session("fresh", now + Duration::hours(1)))
            .await
            .unwrap();

        assert_eq!(store.purge_expired(now).await.unwrap(), 1);
        assert!(store.find("old").await.unwrap().is_none());
        assert!(store.find("fresh").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_remove_for_user_keeps_other_users() {
        let store = InMemorySessionStore::new();
        let expires_at = Utc::now() + Duration::hours(1);
        let mario = UserId::new();
        let maria = UserId::new();

        store.insert(session_of("m1", mario, expires_at)).await.unwrap();
        store.insert(session_of("m2", mario, expires_at)).await.unwrap();
        store.insert(session_of("x1", maria, expires_at)).await.unwrap();

        assert_eq!(store.remove_for_user(&mario).await.unwrap(), 2);
        assert!(store.find("m1").await.unwrap().is_none());
        assert!(store.find("m2").await.unwrap().is_none());
        assert!(store.find("x1").await.unwrap().is_some());
        assert_eq!(store.remove_for_user(&mario).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_are_not_lost() {
        let store = Arc::new(InMemorySessionStore::new());
        let expires_at = Utc::now() + Duration::hours(1);

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert(session(&format!("token-{i}"), expires_at))
                        .await
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..64 {
            assert!(store.find(&format!("token-{i}")).await.unwrap().is_some());
        }
    }
}
