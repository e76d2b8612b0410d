use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::domain::entities::dataset::{Cell, Dataset};

/// Serial value of 1970-01-01 in the 1900 date system (epoch 1899-12-30).
pub const UNIX_EPOCH_SERIAL: f64 = 25569.0;

/// Bare numbers strictly inside this window are read as date serials
/// (roughly 2009-07 to 2064-04).
const DATE_LIKE_MIN: f64 = 40000.0;
const DATE_LIKE_MAX: f64 = 60000.0;

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("impossible de lire le fichier {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("classeur illisible: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("le classeur ne contient aucune feuille")]
    NoSheet,
    #[error("le chargement a été interrompu: {0}")]
    Interrupted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetFile {
    pub name: String,
    pub bytes: Arc<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSpreadsheet {
    pub file: SpreadsheetFile,
    pub dataset: Dataset,
}

pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let offset = (serial - UNIX_EPOCH_SERIAL).floor();
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    if offset >= 0.0 {
        epoch.checked_add_days(Days::new(offset as u64))
    } else {
        epoch.checked_sub_days(Days::new((-offset) as u64))
    }
}

fn is_date_like(value: f64) -> bool {
    value > DATE_LIKE_MIN && value < DATE_LIKE_MAX
}

fn number_cell(value: f64) -> Cell {
    if is_date_like(value) {
        if let Some(date) = serial_to_date(value) {
            return Cell::Date(date);
        }
    }
    Cell::Number(value)
}

pub fn normalize_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::String(v) => Cell::Text(v.to_string()),
        Data::Float(v) => number_cell(*v),
        Data::Int(v) => number_cell(*v as f64),
        Data::Bool(v) => Cell::Text(if *v { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(v) => number_cell(v.as_f64()),
        Data::DateTimeIso(v) => match v.get(..10).and_then(|d| d.parse::<NaiveDate>().ok()) {
            Some(date) => Cell::Date(date),
            None => Cell::Text(v.to_string()),
        },
        Data::DurationIso(v) => Cell::Text(v.to_string()),
        Data::Error(v) => Cell::Text(format!("{v:?}")),
    }
}

/// Pads every row with empty cells up to the widest row so that each row is
/// addressable across the full header width.
pub fn pad_rows(mut rows: Vec<Vec<Cell>>) -> Vec<Vec<Cell>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, Cell::Empty);
    }
    rows
}

pub fn dataset_from_range(range: &Range<Data>) -> Dataset {
    let rows = range
        .rows()
        .map(|r| r.iter().map(normalize_cell).collect())
        .collect();
    Dataset::from_rows(pad_rows(rows))
}

pub fn parse_workbook_bytes(bytes: &[u8]) -> Result<Dataset, SpreadsheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoSheet)??;
    Ok(dataset_from_range(&range))
}

pub fn file_display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("classeur.xlsx")
        .to_string()
}

pub fn load_spreadsheet_bytes(
    name: String,
    bytes: Vec<u8>,
) -> Result<LoadedSpreadsheet, SpreadsheetError> {
    let dataset = parse_workbook_bytes(&bytes)?;
    tracing::info!(
        file = %name,
        rows = dataset.len(),
        columns = dataset.width(),
        "spreadsheet parsed"
    );
    Ok(LoadedSpreadsheet {
        file: SpreadsheetFile {
            name,
            bytes: Arc::new(bytes),
        },
        dataset,
    })
}
