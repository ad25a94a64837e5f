//! In-memory implementation of the `InvestigationService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::constants::limits::MAX_INVESTIGATION_NAME;
use crate::db::Store;
use crate::models::investigation::{
    Finding, Investigation, InvestigationStatistics, InvestigationStatus, InvestigationUpdate,
    NewFinding, NewInvestigation,
};
use crate::models::user::User;
use crate::services::investigation_service::{
    InvestigationError, InvestigationList, InvestigationService,
};

pub struct InMemoryInvestigationService {
    store: Store,
}

impl InMemoryInvestigationService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn find_visible(&self, user: &User, id: &str) -> Result<Investigation, InvestigationError> {
        self.store
            .get_investigation(id)
            .await
            .filter(|inv| can_access(user, inv))
            .ok_or_else(|| InvestigationError::NotFound(id.to_string()))
    }
}

fn can_access(user: &User, investigation: &Investigation) -> bool {
    user.is_admin() || investigation.owner_id == user.id
}

fn validate_name(name: &str) -> Result<String, InvestigationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InvestigationError::Validation(
            "Missing required field: name".to_string(),
        ));
    }
    if name.chars().count() > MAX_INVESTIGATION_NAME {
        return Err(InvestigationError::Validation(format!(
            "Investigation name must be {MAX_INVESTIGATION_NAME} characters or less"
        )));
    }
    Ok(name.to_string())
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

#[async_trait]
impl InvestigationService for InMemoryInvestigationService {
    async fn create(
        &self,
        owner: &User,
        input: NewInvestigation,
    ) -> Result<Investigation, InvestigationError> {
        let name = validate_name(&input.name)?;
        let now = chrono::Utc::now().to_rfc3339();

        let investigation = Investigation {
            id: new_id("inv"),
            name,
            description: input.description,
            kind: input.kind,
            target: input.target,
            priority: input.priority,
            status: InvestigationStatus::Active,
            tags: input.tags,
            progress: 0,
            findings: Vec::new(),
            owner_id: owner.id.clone(),
            assigned_to: owner.email.clone(),
            deadline: input.deadline,
            estimated_hours: input.estimated_hours,
            actual_hours: 0,
            created_at: now.clone(),
            updated_at: now,
        };

        self.store.insert_investigation(investigation.clone()).await;
        info!(
            investigation_id = %investigation.id,
            user_id = %owner.id,
            "Investigation created"
        );
        Ok(investigation)
    }

    async fn list(&self, user: &User) -> InvestigationList {
        let investigations = self.store.list_investigations_for_owner(&user.id).await;
        let statistics = InvestigationStatistics::from_investigations(&investigations);
        InvestigationList {
            investigations,
            statistics,
        }
    }

    async fn get(&self, user: &User, id: &str) -> Result<Investigation, InvestigationError> {
        self.find_visible(user, id).await
    }

    async fn update(
        &self,
        user: &User,
        id: &str,
        mut update: InvestigationUpdate,
    ) -> Result<Investigation, InvestigationError> {
        if let Some(progress) = update.progress
            && progress > 100
        {
            return Err(InvestigationError::Validation(format!(
                "Invalid progress: {progress}. Progress must be between 0 and 100"
            )));
        }

        if let Some(name) = update.name.as_deref() {
            update.name = Some(validate_name(name)?);
        }

        self.find_visible(user, id).await?;

        let now = chrono::Utc::now().to_rfc3339();
        self.store
            .update_investigation(id, move |inv| {
                inv.apply(update);
                inv.updated_at = now;
            })
            .await
            .ok_or_else(|| InvestigationError::NotFound(id.to_string()))
    }

    async fn delete(&self, user: &User, id: &str) -> Result<(), InvestigationError> {
        self.find_visible(user, id).await?;

        self.store
            .remove_investigation(id)
            .await
            .ok_or_else(|| InvestigationError::NotFound(id.to_string()))?;

        info!(investigation_id = %id, user_id = %user.id, "Investigation deleted");
        Ok(())
    }

    async fn add_finding(
        &self,
        user: &User,
        id: &str,
        input: NewFinding,
    ) -> Result<Finding, InvestigationError> {
        let content = input.content.trim();
        if content.is_empty() {
            return Err(InvestigationError::Validation(
                "Finding content is required".to_string(),
            ));
        }

        self.find_visible(user, id).await?;

        let now = chrono::Utc::now().to_rfc3339();
        let finding = Finding {
            id: new_id("finding"),
            content: content.to_string(),
            kind: input.kind.unwrap_or_else(|| "general".to_string()),
            severity: input.severity,
            created_at: now.clone(),
            created_by: user.email.clone(),
        };

        let pushed = finding.clone();
        self.store
            .update_investigation(id, move |inv| {
                inv.findings.push(pushed);
                inv.updated_at = now;
            })
            .await
            .ok_or_else(|| InvestigationError::NotFound(id.to_string()))?;

        Ok(finding)
    }

    async fn count(&self) -> usize {
        self.store.investigation_count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::investigation::{InvestigationType, Priority};
    use crate::models::user::Role;

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            password_hash: String::new(),
            role,
            is_active: true,
            created_at: chrono::Utc::now().to_rfc3339(),
            permissions: role.default_permissions(),
        }
    }

    fn named(name: &str) -> NewInvestigation {
        NewInvestigation {
            name: name.to_string(),
            ..NewInvestigation::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let service = InMemoryInvestigationService::new(Store::new());
        let alice = user("alice", Role::Analyst);
        let bob = user("bob", Role::Analyst);

        let created = service
            .create(
                &alice,
                NewInvestigation {
                    name: "Phishing wave".to_string(),
                    kind: InvestigationType::Domain,
                    priority: Priority::High,
                    ..NewInvestigation::default()
                },
            )
            .await
            .unwrap();
        service.create(&bob, named("Bob's case")).await.unwrap();

        assert!(created.id.starts_with("inv_"));
        assert_eq!(created.assigned_to, "alice@example.com");
        assert_eq!(created.status, InvestigationStatus::Active);

        let list = service.list(&alice).await;
        assert_eq!(list.investigations.len(), 1);
        assert_eq!(list.statistics.total, 1);
        assert_eq!(list.statistics.high_priority, 1);
        assert_eq!(service.count().await, 2);
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let service = InMemoryInvestigationService::new(Store::new());
        let result = service.create(&user("a", Role::Analyst), named("   ")).await;
        assert!(matches!(result, Err(InvestigationError::Validation(_))));
    }

    #[tokio::test]
    async fn test_other_users_records_are_not_found() {
        let service = InMemoryInvestigationService::new(Store::new());
        let alice = user("alice", Role::Analyst);
        let mallory = user("mallory", Role::Analyst);
        let admin = user("root", Role::Admin);

        let inv = service.create(&alice, named("Private")).await.unwrap();

        assert!(matches!(
            service.get(&mallory, &inv.id).await,
            Err(InvestigationError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(&mallory, &inv.id).await,
            Err(InvestigationError::NotFound(_))
        ));
        assert!(service.get(&admin, &inv.id).await.is_ok());
        assert!(service.get(&alice, "inv_missing").await.is_err());
    }

    #[tokio::test]
    async fn test_update_validates_progress() {
        let service = InMemoryInvestigationService::new(Store::new());
        let alice = user("alice", Role::Analyst);
        let inv = service.create(&alice, named("Case")).await.unwrap();

        let too_far = InvestigationUpdate {
            progress: Some(101),
            ..InvestigationUpdate::default()
        };
        assert!(matches!(
            service.update(&alice, &inv.id, too_far).await,
            Err(InvestigationError::Validation(_))
        ));

        let ok = InvestigationUpdate {
            progress: Some(100),
            status: Some(InvestigationStatus::Completed),
            ..InvestigationUpdate::default()
        };
        let updated = service.update(&alice, &inv.id, ok).await.unwrap();
        assert_eq!(updated.progress, 100);
        assert_eq!(updated.status, InvestigationStatus::Completed);
        assert_eq!(updated.name, "Case");
    }

    #[tokio::test]
    async fn test_findings_are_appended_in_order() {
        let service = InMemoryInvestigationService::new(Store::new());
        let alice = user("alice", Role::Analyst);
        let inv = service.create(&alice, named("Case")).await.unwrap();

        for content in ["first", "second", "third"] {
            service
                .add_finding(
                    &alice,
                    &inv.id,
                    NewFinding {
                        content: content.to_string(),
                        ..NewFinding::default()
                    },
                )
                .await
                .unwrap();
        }

        let stored = service.get(&alice, &inv.id).await.unwrap();
        let contents: Vec<&str> = stored.findings.iter().map(|f| f.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(stored.findings[0].kind, "general");
        assert_eq!(stored.findings[0].severity, Priority::Medium);

        let empty = service
            .add_finding(&alice, &inv.id, NewFinding::default())
            .await;
        assert!(matches!(empty, Err(InvestigationError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let service = InMemoryInvestigationService::new(Store::new());
        let alice = user("alice", Role::Analyst);
        let inv = service.create(&alice, named("Case")).await.unwrap();

        service.delete(&alice, &inv.id).await.unwrap();
        assert_eq!(service.count().await, 0);
        assert!(service.get(&alice, &inv.id).await.is_err());
    }
}
