use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Bearer token -> user id.
pub type SessionTable = Arc<RwLock<HashMap<String, String>>>;

pub struct SessionRepository {
    table: SessionTable,
}

impl SessionRepository {
    #[must_use]
    pub const fn new(table: SessionTable) -> Self {
        Self { table }
    }

    pub async fn insert(&self, token: String, user_id: String) {
        self.table.write().await.insert(token, user_id);
    }

    pub async fn get(&self, token: &str) -> Option<String> {
        self.table.read().await.get(token).cloned()
    }

    pub async fn remove(&self, token: &str) -> bool {
        self.table.write().await.remove(token).is_some()
    }

    pub async fn count(&self) -> usize {
        self.table.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let repo = SessionRepository::new(SessionTable::default());

        repo.insert("tok".to_string(), "u1".to_string()).await;
        assert_eq!(repo.get("tok").await.as_deref(), Some("u1"));
        assert_eq!(repo.count().await, 1);

        assert!(repo.remove("tok").await);
        assert!(!repo.remove("tok").await);
        assert!(repo.get("tok").await.is_none());
    }
}
