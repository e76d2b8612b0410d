use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};
use serde::Deserialize;

use crate::domain::entities::facility::FacilityId;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(rename = "nom_fichier", default)]
    pub file_name: Option<String>,
    #[serde(rename = "id_type_projet", default)]
    pub facility_id: Option<FacilityId>,
    #[serde(rename = "utilisateur", default)]
    pub user: Option<String>,
    #[serde(rename = "date_import")]
    pub imported_at: String,
    #[serde(rename = "statut", default)]
    pub succeeded: bool,
}

impl HistoryEntry {
    pub fn status_label(&self) -> &'static str {
        if self.succeeded {
            "réussie"
        } else {
            "échouée"
        }
    }
}

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

pub fn parse_import_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// `15 octobre 2024 10:20:30`, always in UTC. Unparseable stamps are shown as
/// received.
pub fn format_import_date(raw: &str) -> String {
    match parse_import_date(raw) {
        Some(stamp) => format!(
            "{:02} {} {} {:02}:{:02}:{:02}",
            stamp.day(),
            MONTHS_FR[stamp.month0() as usize],
            stamp.year(),
            stamp.hour(),
            stamp.minute(),
            stamp.second()
        ),
        None => raw.to_string(),
    }
}
