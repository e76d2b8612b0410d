use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenom: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub photo_profil: Option<String>,
}

impl CurrentUser {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.prenom, self.nom).trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub nom: String,
    pub prenom: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Nom,
    Prenom,
    Email,
}

impl ProfileField {
    pub const ALL: [ProfileField; 3] = [
        ProfileField::Nom,
        ProfileField::Prenom,
        ProfileField::Email,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Nom => "Nom",
            ProfileField::Prenom => "Prénom",
            ProfileField::Email => "Email",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AvatarAck {
    #[serde(default)]
    pub photo_profil: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StandardUser {
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenom: String,
    #[serde(default)]
    pub date_creation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerMessage {
    #[serde(default)]
    pub message: Option<String>,
}
