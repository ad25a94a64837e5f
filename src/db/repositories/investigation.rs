use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::investigation::Investigation;

pub type InvestigationTable = Arc<RwLock<HashMap<String, Investigation>>>;

pub struct InvestigationRepository {
    table: InvestigationTable,
}

impl InvestigationRepository {
    #[must_use]
    pub const fn new(table: InvestigationTable) -> Self {
        Self { table }
    }

    pub async fn insert(&self, investigation: Investigation) {
        self.table
            .write()
            .await
            .insert(investigation.id.clone(), investigation);
    }

    pub async fn get(&self, id: &str) -> Option<Investigation> {
        self.table.read().await.get(id).cloned()
    }

    /// Newest first.
    pub async fn list_by_owner(&self, owner_id: &str) -> Vec<Investigation> {
        let table = self.table.read().await;
        let mut items: Vec<Investigation> = table
            .values()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect();
        sort_newest_first(&mut items);
        items
    }

    /// Applies `mutate` in place and returns the updated record.
    pub async fn update<F>(&self, id: &str, mutate: F) -> Option<Investigation>
    where
        F: FnOnce(&mut Investigation),
    {
        let mut table = self.table.write().await;
        let investigation = table.get_mut(id)?;
        mutate(investigation);
        Some(investigation.clone())
    }

    pub async fn remove(&self, id: &str) -> Option<Investigation> {
        self.table.write().await.remove(id)
    }

    pub async fn count(&self) -> usize {
        self.table.read().await.len()
    }
}

// RFC 3339 timestamps in UTC sort lexicographically; ties fall back to id.
fn sort_newest_first(items: &mut [Investigation]) {
    items.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
