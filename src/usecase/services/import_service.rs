use std::path::Path;

use crate::infra::import::xlsx::{
    file_display_name, load_spreadsheet_bytes, LoadedSpreadsheet, SpreadsheetError,
};
use crate::platform::desktop::blocking::run_blocking;

pub struct ImportService;

impl ImportService {
    /// Reads the file asynchronously, then parses the first sheet on the
    /// blocking pool. Nothing is returned until the whole sheet is in memory.
    pub async fn load_file(path: &Path) -> Result<LoadedSpreadsheet, SpreadsheetError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| SpreadsheetError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let name = file_display_name(path);
        tracing::debug!(file = %name, bytes = bytes.len(), "spreadsheet read");

        run_blocking(move || load_spreadsheet_bytes(name, bytes))
            .await
            .map_err(|err| SpreadsheetError::Interrupted(err.to_string()))?
    }
}
