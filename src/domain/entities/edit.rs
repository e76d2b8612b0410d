#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub row_idx: usize,
    pub col_idx: usize,
}

impl CellKey {
    pub fn new(row_idx: usize, col_idx: usize) -> Self {
        Self { row_idx, col_idx }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridMode {
    #[default]
    Preview,
    Editing,
}
