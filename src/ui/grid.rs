use crate::domain::entities::dataset::{parse_numeric_text, Cell};
use crate::usecase::services::import_session::ImportSession;

#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    pub file_name: String,
    pub header: Vec<String>,
    /// Absolute row index with `(raw, shown)` text for every cell.
    pub rows: Vec<(usize, Vec<(String, String)>)>,
    pub page: usize,
    pub page_count: usize,
    pub editing: bool,
    pub edits_validated: bool,
}

pub fn grid_snapshot(session: &ImportSession) -> Option<GridSnapshot> {
    let editor = session.editor()?;
    let header = editor
        .dataset()
        .header()
        .map(|cells| cells.iter().map(Cell::as_text).collect())
        .unwrap_or_default();
    let rows = editor
        .page_rows()
        .into_iter()
        .map(|(row_idx, cells)| {
            let cells = cells
                .iter()
                .map(|cell| (cell.as_text(), cell.display()))
                .collect();
            (row_idx, cells)
        })
        .collect();

    Some(GridSnapshot {
        file_name: session
            .file()
            .map(|file| file.name.clone())
            .unwrap_or_default(),
        header,
        rows,
        page: editor.page(),
        page_count: editor.page_count(),
        editing: editor.is_editing(),
        edits_validated: session.edits_validated(),
    })
}

/// Right-aligns columns whose non-empty cells on the page are all numeric.
pub fn column_alignments(
    rows: &[(usize, Vec<(String, String)>)],
    width: usize,
) -> Vec<&'static str> {
    (0..width)
        .map(|col_idx| {
            let mut values = rows
                .iter()
                .filter_map(|(_, cells)| cells.get(col_idx))
                .map(|(raw, _)| raw.as_str())
                .filter(|raw| !raw.trim().is_empty())
                .peekable();
            if values.peek().is_none() {
                return "left";
            }
            if values.all(|raw| parse_numeric_text(raw).is_some()) {
                "right"
            } else {
                "left"
            }
        })
        .collect()
}
