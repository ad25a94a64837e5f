//! In-memory data store.
//!
//! Three maps (users, session tokens, investigations) each guarded by its own
//! async `RwLock`. Nothing survives a restart. [`Store`] is cheap to clone and
//! is handed to services explicitly instead of living in a global.

use crate::models::investigation::Investigation;
use crate::models::user::User;

pub mod repositories;

use repositories::investigation::{InvestigationRepository, InvestigationTable};
use repositories::session::{SessionRepository, SessionTable};
use repositories::user::{UserRepository, UserTable};

#[derive(Clone, Default)]
pub struct Store {
    users: UserTable,
    sessions: SessionTable,
    investigations: InvestigationTable,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn user_repo(&self) -> UserRepository {
        UserRepository::new(self.users.clone())
    }

    fn session_repo(&self) -> SessionRepository {
        SessionRepository::new(self.sessions.clone())
    }

    fn investigation_repo(&self) -> InvestigationRepository {
        InvestigationRepository::new(self.investigations.clone())
    }

    /// Inserts the user unless the email key is taken. Returns `false` on a duplicate.
    pub async fn insert_user(&self, user: User) -> bool {
        self.user_repo().insert_if_absent(user).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user_by_id(&self, id: &str) -> Option<User> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn user_count(&self) -> usize {
        self.user_repo().count().await
    }

    pub async fn insert_session(&self, token: String, user_id: String) {
        self.session_repo().insert(token, user_id).await;
    }

    pub async fn get_session_user_id(&self, token: &str) -> Option<String> {
        self.session_repo().get(token).await
    }

    pub async fn remove_session(&self, token: &str) -> bool {
        self.session_repo().remove(token).await
    }

    pub async fn session_count(&self) -> usize {
        self.session_repo().count().await
    }

    pub async fn insert_investigation(&self, investigation: Investigation) {
        self.investigation_repo().insert(investigation).await;
    }

    pub async fn get_investigation(&self, id: &str) -> Option<Investigation> {
        self.investigation_repo().get(id).await
    }

    pub async fn list_investigations_for_owner(&self, owner_id: &str) -> Vec<Investigation> {
        self.investigation_repo().list_by_owner(owner_id).await
    }

    pub async fn update_investigation<F>(&self, id: &str, mutate: F) -> Option<Investigation>
    where
        F: FnOnce(&mut Investigation),
    {
        self.investigation_repo().update(id, mutate).await
    }

    pub async fn remove_investigation(&self, id: &str) -> Option<Investigation> {
        self.investigation_repo().remove(id).await
    }

    pub async fn investigation_count(&self) -> usize {
        self.investigation_repo().count().await
    }
}
