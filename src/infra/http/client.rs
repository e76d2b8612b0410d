use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::entities::account::{
    AvatarAck, CurrentUser, PasswordChange, ProfileUpdate, ServerMessage, StandardUser,
};
use crate::domain::entities::facility::{
    Facility, FacilityId, FacilityRecord, FacilitySelection, NewFacility,
};
use crate::domain::entities::history::HistoryEntry;
use crate::domain::entities::project::ProjectRow;
use crate::domain::entities::statistics::{DateRange, StatsDimension, StatsMeasure, StatsPayload};
use crate::infra::import::xlsx::SpreadsheetFile;
use crate::usecase::ports::backend::{AvatarUpload, BackendError, DashboardBackend};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|err| BackendError::Transport(format!("invalid base url {base_url}: {err}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| BackendError::Transport(format!("invalid path {path}: {err}")))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        ensure_success(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        decode(self.send(self.client.get(self.url(path)?)).await?).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    response
        .json::<T>()
        .await
        .map_err(|err| BackendError::Decode(err.to_string()))
}

async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
        .and_then(|body| body.error);
    Err(BackendError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl DashboardBackend for HttpBackend {
    async fn list_facilities(&self) -> Result<Vec<Facility>, BackendError> {
        self.get_json("auth/type_projets").await
    }

    async fn confirm_facility(&self, id: &FacilityId) -> Result<(), BackendError> {
        let body = FacilitySelection { id_type_projet: id };
        self.send(
            self.client
                .post(self.url("auth/selection_type_projet")?)
                .json(&body),
        )
        .await?;
        Ok(())
    }

    async fn import_spreadsheet(
        &self,
        file: &SpreadsheetFile,
        facility: &FacilityId,
    ) -> Result<(), BackendError> {
        let part = Part::bytes(file.bytes.as_ref().clone())
            .file_name(file.name.clone())
            .mime_str(XLSX_MIME)
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("id_type_projet", facility.0.clone());

        let response = self
            .client
            .post(self.url("auth/import_excel")?)
            .multipart(form)
            .send()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;

        // Only a plain 200 counts as an accepted import.
        if response.status() == StatusCode::OK {
            return Ok(());
        }
        match ensure_success(response).await {
            Ok(response) => Err(BackendError::Status {
                status: response.status().as_u16(),
                message: None,
            }),
            Err(err) => Err(err),
        }
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, BackendError> {
        self.get_json("auth/history").await
    }

    async fn delete_history(&self, id: i64) -> Result<(), BackendError> {
        self.send(self.client.delete(self.url(&format!("auth/history/{id}"))?))
            .await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<CurrentUser, BackendError> {
        self.get_json("auth/me").await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), BackendError> {
        self.send(self.client.patch(self.url("auth/me")?).json(update))
            .await?;
        Ok(())
    }

    async fn upload_avatar(&self, upload: AvatarUpload) -> Result<AvatarAck, BackendError> {
        let form = Form::new().part("photo", Part::bytes(upload.bytes).file_name(upload.file_name));
        let response = self
            .send(self.client.patch(self.url("auth/me/avatar")?).multipart(form))
            .await?;
        decode(response).await
    }

    async fn change_password(
        &self,
        change: &PasswordChange,
    ) -> Result<ServerMessage, BackendError> {
        let request = self.client.post(self.url("auth/change-password")?).json(change);
        decode(self.send(request).await?).await
    }

    async fn change_password_first_login(
        &self,
        change: &PasswordChange,
    ) -> Result<ServerMessage, BackendError> {
        let request = self
            .client
            .post(self.url("auth/change-password-first-login")?)
            .json(change);
        decode(self.send(request).await?).await
    }

    async fn list_standard_users(&self) -> Result<Vec<StandardUser>, BackendError> {
        self.get_json("auth/utilisateurs-standard").await
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRow>, BackendError> {
        self.get_json("auth/projets_financement").await
    }

    async fn list_projects_by_facility(
        &self,
        id: &FacilityId,
    ) -> Result<Vec<ProjectRow>, BackendError> {
        self.get_json(&format!("auth/{id}")).await
    }

    async fn list_facility_records(&self) -> Result<Vec<FacilityRecord>, BackendError> {
        self.get_json("auth/types_projets").await
    }

    async fn create_facility(&self, name: &str) -> Result<(), BackendError> {
        let body = NewFacility { nom_facilite: name };
        self.send(self.client.post(self.url("auth/types_projets")?).json(&body))
            .await?;
        Ok(())
    }

    async fn delete_facility(&self, id: &FacilityId) -> Result<(), BackendError> {
        let url = self.url(&format!("auth/types_projets/{id}"))?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn statistics(
        &self,
        dimension: StatsDimension,
        measure: StatsMeasure,
        range: &DateRange,
    ) -> Result<StatsPayload, BackendError> {
        let request = self
            .client
            .get(self.url(dimension.path(measure))?)
            .query(&range.query());
        decode(self.send(request).await?).await
    }
}
