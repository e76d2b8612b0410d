use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatsDimension {
    Filiere,
    Pda,
    Departement,
    Commune,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatsMeasure {
    Projects,
    Credits,
}

impl StatsDimension {
    pub const ALL: [StatsDimension; 4] = [
        StatsDimension::Filiere,
        StatsDimension::Pda,
        StatsDimension::Departement,
        StatsDimension::Commune,
    ];

    /// Label column name in the aggregate rows.
    pub fn key(self) -> &'static str {
        match self {
            StatsDimension::Filiere => "filiere",
            StatsDimension::Pda => "pda",
            StatsDimension::Departement => "departement",
            StatsDimension::Commune => "commune",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            StatsDimension::Filiere => "Filières",
            StatsDimension::Pda => "PDA",
            StatsDimension::Departement => "Départements",
            StatsDimension::Commune => "Communes",
        }
    }

    pub fn path(self, measure: StatsMeasure) -> &'static str {
        match (self, measure) {
            (StatsDimension::Filiere, StatsMeasure::Projects) => "auth/promoteurs-par-filiere",
            (StatsDimension::Filiere, StatsMeasure::Credits) => "auth/credits-par-filiere",
            (StatsDimension::Pda, StatsMeasure::Projects) => "auth/projets-par-pda",
            (StatsDimension::Pda, StatsMeasure::Credits) => "auth/credits-par-pda",
            (StatsDimension::Departement, StatsMeasure::Projects) => "auth/projets-par-departement",
            (StatsDimension::Departement, StatsMeasure::Credits) => "auth/credits-par-departement",
            (StatsDimension::Commune, StatsMeasure::Projects) => "auth/projets-par-commune",
            (StatsDimension::Commune, StatsMeasure::Credits) => "auth/credits-par-commune",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("Veuillez choisir les deux dates.")]
    Missing,
    #[error("date invalide : {0}")]
    Invalid(String),
    #[error("la date de début doit précéder la date de fin")]
    Reversed,
}

/// Validation committee window, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() || end.is_empty() {
            return Err(DateRangeError::Missing);
        }
        let parse = |raw: &str| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| DateRangeError::Invalid(raw.to_string()))
        };
        let range = Self {
            start: parse(start)?,
            end: parse(end)?,
        };
        if range.start > range.end {
            return Err(DateRangeError::Reversed);
        }
        Ok(range)
    }

    pub fn query(&self) -> [(&'static str, String); 2] {
        [
            ("start_date", self.start.format("%Y-%m-%d").to_string()),
            ("end_date", self.end.format("%Y-%m-%d").to_string()),
        ]
    }
}

/// Aggregate reply: one object per label with a number per project type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatsPayload {
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
    #[serde(default)]
    pub types_projet: Vec<String>,
}
