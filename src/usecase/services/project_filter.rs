use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::entities::facility::FacilityId;
use crate::domain::entities::project::ProjectRow;
use crate::usecase::ports::backend::{BackendError, DashboardBackend};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProjectScope {
    #[default]
    All,
    Facility(FacilityId),
}

/// Commune and facility match exactly; promoter and title are
/// case-insensitive substrings; `search` looks through every column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub commune: Option<String>,
    pub facility: Option<String>,
    pub promoter: String,
    pub title: String,
    pub search: String,
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn exact(value: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => value == Some(wanted),
    }
}

impl ProjectFilter {
    pub fn is_empty(&self) -> bool {
        self.commune.is_none()
            && self.facility.is_none()
            && self.promoter.trim().is_empty()
            && self.title.trim().is_empty()
            && self.search.trim().is_empty()
    }

    pub fn matches(&self, row: &ProjectRow) -> bool {
        exact(row.nom_commune.as_deref(), self.commune.as_deref())
            && exact(row.nom_type_projet.as_deref(), self.facility.as_deref())
            && contains_folded(&row.promoter(), &self.promoter)
            && contains_folded(row.intitule_projet.as_deref().unwrap_or_default(), &self.title)
            && (self.search.trim().is_empty()
                || search_values(row)
                    .iter()
                    .any(|value| contains_folded(value, &self.search)))
    }

    pub fn apply(&self, rows: &[ProjectRow]) -> Vec<ProjectRow> {
        rows.iter().filter(|row| self.matches(row)).cloned().collect()
    }
}

/// Displayed columns plus the raw amounts, so `1500000` and `1 500 000`
/// both find the row.
fn search_values(row: &ProjectRow) -> Vec<String> {
    let mut values = row.columns();
    values.extend(
        [
            row.cout_total_projet,
            row.credit_solicite,
            row.credit_accorde,
            row.refinancement_accorde,
            row.total_financement,
        ]
        .into_iter()
        .flatten()
        .map(|amount| amount.to_string()),
    );
    values
}

fn distinct<'a>(
    rows: &'a [ProjectRow],
    field: impl Fn(&'a ProjectRow) -> Option<&'a String>,
) -> Vec<String> {
    rows.iter()
        .filter_map(field)
        .filter(|value| !value.trim().is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn distinct_communes(rows: &[ProjectRow]) -> Vec<String> {
    distinct(rows, |row| row.nom_commune.as_ref())
}

pub fn distinct_facilities(rows: &[ProjectRow]) -> Vec<String> {
    distinct(rows, |row| row.nom_type_projet.as_ref())
}

pub fn empty_message(scope: &ProjectScope, loaded: usize) -> &'static str {
    match (loaded, scope) {
        (0, ProjectScope::Facility(_)) => "Aucun projet trouvé pour cette facilité.",
        (0, ProjectScope::All) => "Il n'y a aucun projet à afficher pour le moment.",
        _ => "Aucun résultat ne correspond à votre recherche.",
    }
}

pub struct ProjectService {
    backend: Arc<dyn DashboardBackend>,
}

impl ProjectService {
    pub fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        Self { backend }
    }

    pub async fn list(&self, scope: &ProjectScope) -> Result<Vec<ProjectRow>, BackendError> {
        let rows = match scope {
            ProjectScope::All => self.backend.list_projects().await?,
            ProjectScope::Facility(id) => self.backend.list_projects_by_facility(id).await?,
        };
        tracing::debug!(count = rows.len(), ?scope, "projects loaded");
        Ok(rows)
    }
}
