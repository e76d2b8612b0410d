use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.is_empty(),
            Cell::Number(_) | Cell::Date(_) => false,
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(text) => text.clone(),
            Cell::Number(value) => format_plain_number(*value),
            Cell::Date(date) => date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Text shown in the read-only grid. Numeric-looking text gets the same
    /// grouping as real numbers; the stored value is left untouched.
    pub fn display(&self) -> String {
        match self {
            Cell::Number(value) => format_number_fr(*value),
            Cell::Text(text) => match parse_numeric_text(text) {
                Some(value) => format_number_fr(value),
                None => text.clone(),
            },
            other => other.as_text(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> Option<&[Cell]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn body_len(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn cell(&self, row_idx: usize, col_idx: usize) -> Option<&Cell> {
        self.rows.get(row_idx).and_then(|row| row.get(col_idx))
    }

    pub(crate) fn cell_mut(&mut self, row_idx: usize, col_idx: usize) -> Option<&mut Cell> {
        self.rows
            .get_mut(row_idx)
            .and_then(|row| row.get_mut(col_idx))
    }
}

pub fn parse_numeric_text(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn format_plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

const GROUP_SEPARATOR: char = '\u{202F}';
const MAX_FRACTION_DIGITS: usize = 3;

/// Formats a number with French digit grouping (narrow no-break space) and a
/// decimal comma, keeping at most three fraction digits.
pub fn format_number_fr(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{frac_part}")
    }
}
