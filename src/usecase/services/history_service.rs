use std::sync::Arc;

use crate::domain::entities::history::HistoryEntry;
use crate::usecase::ports::backend::{BackendError, DashboardBackend};

pub struct HistoryService {
    backend: Arc<dyn DashboardBackend>,
}

impl HistoryService {
    pub fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        Self { backend }
    }

    pub async fn list(&self) -> Result<Vec<HistoryEntry>, BackendError> {
        let entries = self.backend.list_history().await?;
        tracing::debug!(count = entries.len(), "import history loaded");
        Ok(entries)
    }

    pub async fn delete(&self, id: i64) -> Result<(), BackendError> {
        self.backend.delete_history(id).await?;
        tracing::info!(id, "import history entry deleted");
        Ok(())
    }
}

/// Drops a deleted entry from whatever the list holds now.
pub fn remove_entry(entries: &mut Vec<HistoryEntry>, id: i64) {
    entries.retain(|entry| entry.id != id);
}
