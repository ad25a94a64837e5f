use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::user::{User, normalize_email};

#[derive(Default)]
pub struct Users {
    by_email: HashMap<String, User>,
    email_by_id: HashMap<String, String>,
}

pub type UserTable = Arc<RwLock<Users>>;

pub struct UserRepository {
    table: UserTable,
}

impl UserRepository {
    #[must_use]
    pub const fn new(table: UserTable) -> Self {
        Self { table }
    }

    /// Check-and-insert under a single write lock so two concurrent
    /// registrations for the same email cannot both succeed.
    pub async fn insert_if_absent(&self, user: User) -> bool {
        let key = normalize_email(&user.email);
        let mut users = self.table.write().await;

        if users.by_email.contains_key(&key) || users.email_by_id.contains_key(&user.id) {
            return false;
        }

        users.email_by_id.insert(user.id.clone(), key.clone());
        users.by_email.insert(key, user);
        true
    }

    pub async fn get_by_email(&self, email: &str) -> Option<User> {
        let users = self.table.read().await;
        users.by_email.get(&normalize_email(email)).cloned()
    }

    pub async fn get_by_id(&self, id: &str) -> Option<User> {
        let users = self.table.read().await;
        users
            .email_by_id
            .get(id)
            .and_then(|email| users.by_email.get(email))
            .cloned()
    }

    pub async fn count(&self) -> usize {
        self.table.read().await.by_email.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    fn user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            email: email.to_string(),
            password_hash: "salt:key".to_string(),
            role: Role::Analyst,
            is_active: true,
            created_at: chrono::Utc::now().to_rfc3339(),
            permissions: Role::Analyst.default_permissions(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let repo = UserRepository::new(UserTable::default());

        assert!(repo.insert_if_absent(user("u1", "alice@example.com")).await);
        assert_eq!(repo.count().await, 1);

        let by_email = repo.get_by_email("ALICE@example.com").await.unwrap();
        assert_eq!(by_email.id, "u1");

        let by_id = repo.get_by_id("u1").await.unwrap();
        assert_eq!(by_id.email, "alice@example.com");

        assert!(repo.get_by_id("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = UserRepository::new(UserTable::default());

        assert!(repo.insert_if_absent(user("u1", "bob@example.com")).await);
        assert!(!repo.insert_if_absent(user("u2", "Bob@Example.com")).await);
        assert_eq!(repo.count().await, 1);
    }
}
