use thiserror::Error;

use crate::domain::entities::dataset::{Cell, Dataset};
use crate::domain::entities::edit::{CellKey, GridMode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("le tableau n'est pas en mode modification")]
    NotEditing,
    #[error("cellule hors du tableau (ligne {}, colonne {})", .0.row_idx, .0.col_idx)]
    OutOfRange(CellKey),
}

/// Working copy of a parsed sheet plus the view state used to render it.
/// Pagination only selects which rows are shown; edits always address
/// absolute row indices.
#[derive(Debug, Clone, PartialEq)]
pub struct GridEditor {
    working: Dataset,
    mode: GridMode,
    page: usize,
    page_size: usize,
}

impl GridEditor {
    pub fn new(dataset: Dataset, page_size: usize) -> Self {
        Self {
            working: dataset,
            mode: GridMode::Preview,
            page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.working
    }

    pub fn is_editing(&self) -> bool {
        self.mode == GridMode::Editing
    }

    pub fn begin_edit(&mut self) {
        self.mode = GridMode::Editing;
    }

    pub fn set_cell(&mut self, key: CellKey, value: String) -> Result<(), EditError> {
        if !self.is_editing() {
            return Err(EditError::NotEditing);
        }
        let cell = self
            .working
            .cell_mut(key.row_idx, key.col_idx)
            .ok_or(EditError::OutOfRange(key))?;
        *cell = Cell::Text(value);
        Ok(())
    }

    pub fn commit(&mut self) -> Result<Dataset, EditError> {
        if !self.is_editing() {
            return Err(EditError::NotEditing);
        }
        self.mode = GridMode::Preview;
        Ok(self.working.clone())
    }

    pub fn restore(&mut self, checkpoint: Dataset) {
        self.working = checkpoint;
        self.mode = GridMode::Preview;
        self.page = self.page.min(self.last_page());
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.working.body_len().div_ceil(self.page_size).max(1)
    }

    fn last_page(&self) -> usize {
        self.page_count() - 1
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.last_page());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn page_rows(&self) -> Vec<(usize, &[Cell])> {
        let start = 1 + self.page * self.page_size;
        self.working
            .rows()
            .iter()
            .enumerate()
            .skip(start)
            .take(self.page_size)
            .map(|(idx, row)| (idx, row.as_slice()))
            .collect()
    }
}
