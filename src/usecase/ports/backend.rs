use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::account::{
    AvatarAck, CurrentUser, PasswordChange, ProfileUpdate, ServerMessage, StandardUser,
};
use crate::domain::entities::facility::{Facility, FacilityId, FacilityRecord};
use crate::domain::entities::history::HistoryEntry;
use crate::domain::entities::project::ProjectRow;
use crate::domain::entities::statistics::{DateRange, StatsDimension, StatsMeasure, StatsPayload};
use crate::infra::import::xlsx::SpreadsheetFile;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("erreur réseau: {0}")]
    Transport(String),
    #[error("le serveur a répondu {status}{}", detail_suffix(.message))]
    Status { status: u16, message: Option<String> },
    #[error("réponse inattendue du serveur: {0}")]
    Decode(String),
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// REST surface the dashboard consumes. Every call carries the session cookie.
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    async fn list_facilities(&self) -> Result<Vec<Facility>, BackendError>;
    async fn confirm_facility(&self, id: &FacilityId) -> Result<(), BackendError>;
    async fn import_spreadsheet(
        &self,
        file: &SpreadsheetFile,
        facility: &FacilityId,
    ) -> Result<(), BackendError>;

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, BackendError>;
    async fn delete_history(&self, id: i64) -> Result<(), BackendError>;

    async fn current_user(&self) -> Result<CurrentUser, BackendError>;
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), BackendError>;
    async fn upload_avatar(&self, upload: AvatarUpload) -> Result<AvatarAck, BackendError>;

    async fn change_password(
        &self,
        change: &PasswordChange,
    ) -> Result<ServerMessage, BackendError>;
    async fn change_password_first_login(
        &self,
        change: &PasswordChange,
    ) -> Result<ServerMessage, BackendError>;

    async fn list_standard_users(&self) -> Result<Vec<StandardUser>, BackendError>;

    async fn list_projects(&self) -> Result<Vec<ProjectRow>, BackendError>;
    async fn list_projects_by_facility(
        &self,
        id: &FacilityId,
    ) -> Result<Vec<ProjectRow>, BackendError>;

    async fn list_facility_records(&self) -> Result<Vec<FacilityRecord>, BackendError>;
    async fn create_facility(&self, name: &str) -> Result<(), BackendError>;
    async fn delete_facility(&self, id: &FacilityId) -> Result<(), BackendError>;

    async fn statistics(
        &self,
        dimension: StatsDimension,
        measure: StatsMeasure,
        range: &DateRange,
    ) -> Result<StatsPayload, BackendError>;
}
