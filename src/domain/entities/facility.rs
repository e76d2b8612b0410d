use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Facility identifiers come back from the backend either as JSON strings or
/// numbers depending on the column type; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FacilityId(pub String);

impl<'de> Deserialize<'de> for FacilityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => FacilityId(text),
            RawId::Int(value) => FacilityId(value.to_string()),
        })
    }
}

impl From<&str> for FacilityId {
    fn from(value: &str) -> Self {
        FacilityId(value.to_string())
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Facility {
    #[serde(rename = "id_type_projet")]
    pub id: FacilityId,
    #[serde(rename = "nom_facilite")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacilitySelection<'a> {
    pub id_type_projet: &'a FacilityId,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FacilityRecord {
    #[serde(rename = "id_type_projet")]
    pub id: FacilityId,
    #[serde(rename = "nom_facilite")]
    pub name: String,
    #[serde(default)]
    pub date_creation: Option<String>,
    #[serde(default)]
    pub auteur: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFacility<'a> {
    pub nom_facilite: &'a str,
}
