use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::entities::dataset::format_number_fr;
use crate::domain::entities::statistics::{DateRange, StatsDimension, StatsMeasure, StatsPayload};
use crate::usecase::ports::backend::{BackendError, DashboardBackend};

#[derive(Debug, Clone, PartialEq)]
pub struct StatsRow {
    pub name: String,
    pub values: Vec<f64>,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsTable {
    pub columns: Vec<String>,
    pub rows: Vec<StatsRow>,
    pub totals: Vec<f64>,
    pub grand_total: f64,
}

impl StatsTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsSection {
    pub dimension: StatsDimension,
    pub projects: StatsTable,
    pub credits: StatsTable,
}

impl StatsSection {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.credits.is_empty()
    }
}

/// Union of both type lists in first-seen order.
pub fn merge_types(first: &[String], second: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(first.len() + second.len());
    for name in first.iter().chain(second) {
        if !merged.contains(name) {
            merged.push(name.clone());
        }
    }
    merged
}

/// Missing, null and non-numeric values count as zero.
fn numeric(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn label(row: &Map<String, Value>, key: &str) -> String {
    [key, "name"]
        .iter()
        .filter_map(|field| row.get(*field))
        .find_map(|value| match value {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

pub fn build_table(payload: &StatsPayload, columns: &[String], key: &str) -> StatsTable {
    let rows: Vec<StatsRow> = payload
        .data
        .iter()
        .map(|raw| {
            let values: Vec<f64> = columns.iter().map(|col| numeric(raw.get(col))).collect();
            StatsRow {
                name: label(raw, key),
                total: values.iter().sum::<f64>(),
                values,
            }
        })
        .collect();
    let totals = (0..columns.len())
        .map(|idx| rows.iter().map(|row| row.values[idx]).sum::<f64>())
        .collect();
    let grand_total = rows.iter().map(|row| row.total).sum::<f64>();

    StatsTable {
        columns: columns.to_vec(),
        rows,
        totals,
        grand_total,
    }
}

pub fn format_count(value: f64) -> String {
    format_number_fr(value)
}

pub fn format_fcfa(value: f64) -> String {
    format!("{} FCFA", format_number_fr(value))
}

pub struct StatisticsService {
    backend: Arc<dyn DashboardBackend>,
}

impl StatisticsService {
    pub fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        Self { backend }
    }

    pub async fn section(
        &self,
        dimension: StatsDimension,
        range: &DateRange,
    ) -> Result<StatsSection, BackendError> {
        let (projects, credits) = tokio::try_join!(
            self.backend.statistics(dimension, StatsMeasure::Projects, range),
            self.backend.statistics(dimension, StatsMeasure::Credits, range),
        )?;
        let columns = merge_types(&projects.types_projet, &credits.types_projet);
        Ok(StatsSection {
            dimension,
            projects: build_table(&projects, &columns, dimension.key()),
            credits: build_table(&credits, &columns, dimension.key()),
        })
    }

    /// All four breakdowns; any failed query fails the whole load.
    pub async fn load_all(&self, range: &DateRange) -> Result<Vec<StatsSection>, BackendError> {
        let mut sections = Vec::with_capacity(StatsDimension::ALL.len());
        for dimension in StatsDimension::ALL {
            sections.push(self.section(dimension, range).await?);
        }
        tracing::info!(start = %range.start, end = %range.end, "statistics loaded");
        Ok(sections)
    }
}
