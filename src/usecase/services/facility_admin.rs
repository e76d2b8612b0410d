use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::facility::{FacilityId, FacilityRecord};
use crate::usecase::ports::backend::{BackendError, DashboardBackend};

#[derive(Debug, Error)]
pub enum FacilityAdminError {
    #[error("Merci de remplir le champ nom de la facilité")]
    EmptyName,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub struct FacilityAdminService {
    backend: Arc<dyn DashboardBackend>,
}

impl FacilityAdminService {
    pub fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        Self { backend }
    }

    pub async fn list(&self) -> Result<Vec<FacilityRecord>, BackendError> {
        self.backend.list_facility_records().await
    }

    /// Creates the facility and returns the refreshed table.
    pub async fn create(&self, name: &str) -> Result<Vec<FacilityRecord>, FacilityAdminError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FacilityAdminError::EmptyName);
        }
        self.backend.create_facility(name).await?;
        tracing::info!(facility = name, "facility created");
        Ok(self.list().await?)
    }

    pub async fn delete(&self, id: &FacilityId) -> Result<(), BackendError> {
        self.backend.delete_facility(id).await?;
        tracing::info!(facility = %id, "facility deleted");
        Ok(())
    }
}
