use serde::{Deserialize, Deserializer};

use crate::domain::entities::dataset::format_number_fr;

/// Numeric columns come back as JSON numbers, decimal strings or null.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<RawAmount>::deserialize(deserializer)? {
        Some(RawAmount::Number(value)) => Some(value),
        Some(RawAmount::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawText {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(
        Option::<RawText>::deserialize(deserializer)?.map(|raw| match raw {
            RawText::Text(text) => text,
            RawText::Int(value) => value.to_string(),
            RawText::Float(value) => value.to_string(),
        }),
    )
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ProjectRow {
    pub id_projet: i64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date_comite_validation: Option<String>,
    #[serde(default)]
    pub intitule_projet: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub cout_total_projet: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub credit_solicite: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub credit_accorde: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub refinancement_accorde: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_financement: Option<f64>,
    #[serde(default)]
    pub nom_commune: Option<String>,
    #[serde(default)]
    pub nom_filiere: Option<String>,
    #[serde(default)]
    pub nom_psf: Option<String>,
    #[serde(default)]
    pub nom_promoteur: Option<String>,
    #[serde(default)]
    pub prenom_promoteur: Option<String>,
    #[serde(default)]
    pub statut_dossier: Option<String>,
    #[serde(default)]
    pub credit_accorde_statut: Option<String>,
    #[serde(default)]
    pub nom_type_projet: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

pub fn format_amount(value: Option<f64>) -> String {
    value.map(format_number_fr).unwrap_or_default()
}

impl ProjectRow {
    pub fn promoter(&self) -> String {
        [&self.nom_promoteur, &self.prenom_promoteur]
            .into_iter()
            .flatten()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn columns(&self) -> Vec<String> {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        vec![
            self.id_projet.to_string(),
            text(&self.date_comite_validation),
            text(&self.intitule_projet),
            format_amount(self.cout_total_projet),
            format_amount(self.credit_solicite),
            format_amount(self.credit_accorde),
            format_amount(self.refinancement_accorde),
            format_amount(self.total_financement),
            text(&self.nom_commune),
            text(&self.nom_filiere),
            text(&self.nom_psf),
            self.promoter(),
            text(&self.statut_dossier),
            text(&self.credit_accorde_statut),
            text(&self.nom_type_projet),
            text(&self.created_by),
            text(&self.created_at),
        ]
    }
}

pub const PROJECT_COLUMNS: [&str; 17] = [
    "N°",
    "Date comité",
    "Intitulé",
    "Coût total",
    "Crédit sollicité",
    "Crédit accordé",
    "Refinancement",
    "Total financement",
    "Commune",
    "Filière",
    "PSF",
    "Promoteur",
    "Statut dossier",
    "Statut crédit",
    "Facilité",
    "Créé par",
    "Créé le",
];
