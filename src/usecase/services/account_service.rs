use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::account::{
    CurrentUser, PasswordChange, ProfileField, ProfileUpdate, StandardUser,
};
use crate::usecase::ports::backend::{AvatarUpload, BackendError, DashboardBackend};

pub const AVATAR_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("format de fichier non autorisé: {0}")]
    UnsupportedAvatar(String),
    #[error("impossible de lire l'image: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Tous les champs sont requis.")]
    MissingField,
    #[error("Les mots de passe ne correspondent pas.")]
    Mismatch,
}

pub const PASSWORD_CHANGED: &str = "Mot de passe changé avec succès.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub first_login: bool,
    pub email: String,
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordForm {
    pub fn validate(&self) -> Result<PasswordChange, PasswordError> {
        let email = self.email.trim();
        let required = [self.current.as_str(), self.new.as_str(), self.confirm.as_str()];
        if required.iter().any(|value| value.is_empty()) || (self.first_login && email.is_empty())
        {
            return Err(PasswordError::MissingField);
        }
        if self.new != self.confirm {
            return Err(PasswordError::Mismatch);
        }
        Ok(PasswordChange {
            email: self.first_login.then(|| email.to_string()),
            current_password: self.current.clone(),
            new_password: self.new.clone(),
        })
    }
}

/// Rebuilds the draft only for a different user, so refreshing the
/// signed-in user (avatar upload) keeps unsaved field edits.
pub fn refreshed_draft(draft: Option<&ProfileDraft>, user: &CurrentUser) -> Option<ProfileDraft> {
    match draft {
        Some(current) if current.user().id == user.id => None,
        _ => Some(ProfileDraft::new(user.clone())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    original: CurrentUser,
    values: ProfileUpdate,
    editing: Option<ProfileField>,
}

impl ProfileDraft {
    pub fn new(user: CurrentUser) -> Self {
        let values = ProfileUpdate {
            nom: user.nom.clone(),
            prenom: user.prenom.clone(),
            email: user.email.clone(),
        };
        Self {
            original: user,
            values,
            editing: None,
        }
    }

    pub fn user(&self) -> &CurrentUser {
        &self.original
    }

    pub fn set_photo(&mut self, photo: Option<String>) {
        self.original.photo_profil = photo;
    }

    pub fn editing(&self) -> Option<ProfileField> {
        self.editing
    }

    pub fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Nom => &self.values.nom,
            ProfileField::Prenom => &self.values.prenom,
            ProfileField::Email => &self.values.email,
        }
    }

    fn original_value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Nom => &self.original.nom,
            ProfileField::Prenom => &self.original.prenom,
            ProfileField::Email => &self.original.email,
        }
    }

    pub fn start_edit(&mut self, field: ProfileField) {
        self.editing = Some(field);
    }

    pub fn set_value(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::Nom => self.values.nom = value,
            ProfileField::Prenom => self.values.prenom = value,
            ProfileField::Email => self.values.email = value,
        }
    }

    pub fn cancel_field(&mut self) {
        if let Some(field) = self.editing.take() {
            let original = self.original_value(field).to_string();
            self.set_value(field, original);
        }
    }

    pub fn close_field(&mut self) {
        self.editing = None;
    }

    pub fn has_changes(&self) -> bool {
        ProfileField::ALL
            .iter()
            .any(|field| self.value(*field) != self.original_value(*field))
    }

    pub fn update(&self) -> ProfileUpdate {
        self.values.clone()
    }
}

pub fn avatar_url(base_url: &str, photo: &str) -> String {
    format!("{}/uploads/profils/{photo}", base_url.trim_end_matches('/'))
}

pub fn is_allowed_avatar(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| AVATAR_EXTENSIONS.contains(&ext.as_str()))
}

pub struct AccountService {
    backend: Arc<dyn DashboardBackend>,
}

impl AccountService {
    pub fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        Self { backend }
    }

    pub async fn load(&self) -> Result<CurrentUser, BackendError> {
        self.backend.current_user().await
    }

    /// Sends the draft when something changed and returns the refreshed
    /// user; `None` when there was nothing to send.
    pub async fn save(&self, draft: &ProfileDraft) -> Result<Option<CurrentUser>, BackendError> {
        if !draft.has_changes() {
            return Ok(None);
        }
        self.backend.update_profile(&draft.update()).await?;
        tracing::info!(user = draft.user().id, "profile updated");
        self.backend.current_user().await.map(Some)
    }

    pub async fn upload_avatar(&self, path: &Path) -> Result<Option<String>, AccountError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        if !is_allowed_avatar(&file_name) {
            return Err(AccountError::UnsupportedAvatar(file_name));
        }
        let bytes = tokio::fs::read(path).await?;
        let ack = self
            .backend
            .upload_avatar(AvatarUpload { file_name, bytes })
            .await?;
        Ok(ack.photo_profil)
    }

    pub async fn change_password(&self, form: &PasswordForm) -> Result<String, AccountError> {
        let change = form.validate()?;
        let ack = if form.first_login {
            self.backend.change_password_first_login(&change).await?
        } else {
            self.backend.change_password(&change).await?
        };
        tracing::info!(first_login = form.first_login, "password changed");
        Ok(ack.message.unwrap_or_else(|| PASSWORD_CHANGED.to_string()))
    }

    pub async fn standard_users(&self) -> Result<Vec<StandardUser>, BackendError> {
        self.backend.list_standard_users().await
    }
}
