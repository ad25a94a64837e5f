use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestigationType {
    #[default]
    Email,
    Social,
    Domain,
    Phone,
    Image,
    General,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestigationStatus {
    #[default]
    Active,
    Completed,
    Archived,
}

/// Finding severities share the priority scale.
pub type Severity = Priority;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub created_at: String,
    pub created_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investigation {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: InvestigationType,
    pub target: String,
    pub priority: Priority,
    pub status: InvestigationStatus,
    pub tags: Vec<String>,
    pub progress: u8,
    pub findings: Vec<Finding>,
    pub owner_id: String,
    pub assigned_to: String,
    pub deadline: Option<String>,
    pub estimated_hours: u32,
    pub actual_hours: u32,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating an investigation; everything but the name has a default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewInvestigation {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: InvestigationType,
    pub target: String,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub deadline: Option<String>,
    pub estimated_hours: u32,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InvestigationUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<InvestigationType>,
    pub target: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<InvestigationStatus>,
    pub tags: Option<Vec<String>>,
    pub progress: Option<u8>,
    pub deadline: Option<String>,
    pub estimated_hours: Option<u32>,
    pub actual_hours: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewFinding {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvestigationStatistics {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub high_priority: usize,
}

impl InvestigationStatistics {
    #[must_use]
    pub fn from_investigations(investigations: &[Investigation]) -> Self {
        Self {
            total: investigations.len(),
            active: investigations
                .iter()
                .filter(|i| i.status == InvestigationStatus::Active)
                .count(),
            completed: investigations
                .iter()
                .filter(|i| i.status == InvestigationStatus::Completed)
                .count(),
            high_priority: investigations
                .iter()
                .filter(|i| matches!(i.priority, Priority::High | Priority::Critical))
                .count(),
        }
    }
}

impl Investigation {
    pub fn apply(&mut self, update: InvestigationUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(target) = update.target {
            self.target = target;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(progress) = update.progress {
            self.progress = progress;
        }
        if let Some(deadline) = update.deadline {
            self.deadline = Some(deadline);
        }
        if let Some(hours) = update.estimated_hours {
            self.estimated_hours = hours;
        }
        if let Some(hours) = update.actual_hours {
            self.actual_hours = hours;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(status: InvestigationStatus, priority: Priority) -> Investigation {
        Investigation {
            id: "inv".to_string(),
            name: "Sample".to_string(),
            description: None,
            kind: InvestigationType::Email,
            target: String::new(),
            priority,
            status,
            tags: vec![],
            progress: 0,
            findings: vec![],
            owner_id: "u1".to_string(),
            assigned_to: "a@b.co".to_string(),
            deadline: None,
            estimated_hours: 0,
            actual_hours: 0,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_statistics() {
        let items = vec![
            sample(InvestigationStatus::Active, Priority::High),
            sample(InvestigationStatus::Completed, Priority::Medium),
            sample(InvestigationStatus::Active, Priority::Critical),
            sample(InvestigationStatus::Archived, Priority::Low),
        ];

        let stats = InvestigationStatistics::from_investigations(&items);
        assert_eq!(
            stats,
            InvestigationStatistics {
                total: 4,
                active: 2,
                completed: 1,
                high_priority: 2,
            }
        );
    }

    #[test]
    fn test_apply_partial_update() {
        let mut inv = sample(InvestigationStatus::Active, Priority::Medium);
        let update: InvestigationUpdate =
            serde_json::from_str(r#"{"status": "completed", "progress": 100}"#).unwrap();
        inv.apply(update);

        assert_eq!(inv.status, InvestigationStatus::Completed);
        assert_eq!(inv.progress, 100);
        assert_eq!(inv.name, "Sample");
        assert_eq!(inv.priority, Priority::Medium);
    }

    #[test]
    fn test_update_rejects_unknown_fields() {
        let result: Result<InvestigationUpdate, _> =
            serde_json::from_str(r#"{"owner_id": "someone-else"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_investigation_defaults() {
        let new: NewInvestigation = serde_json::from_str(r#"{"name": "Case"}"#).unwrap();
        assert_eq!(new.kind, InvestigationType::Email);
        assert_eq!(new.priority, Priority::Medium);
        assert!(new.tags.is_empty());
    }
}
