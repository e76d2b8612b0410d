use thiserror::Error;

use crate::domain::entities::dataset::Dataset;
use crate::domain::entities::edit::CellKey;
use crate::domain::entities::facility::{Facility, FacilityId};
use crate::domain::entities::session::{ImportStage, ImportStatus};
use crate::infra::import::xlsx::{LoadedSpreadsheet, SpreadsheetFile};
use crate::usecase::services::edit_service::{EditError, GridEditor};
use crate::usecase::services::submission::SubmissionRequest;

pub const FACILITY_REQUIRED: &str = "Le choix de facilité est obligatoire.";
pub const FILE_REQUIRED: &str = "Veuillez sélectionner un fichier avant d'importer.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Le choix de facilité est obligatoire.")]
    NoFacilitySelected,
    #[error("facilité inconnue: {0}")]
    UnknownFacility(FacilityId),
    #[error("la facilité est déjà confirmée pour cette importation")]
    FacilityLocked,
    #[error("Veuillez sélectionner un fichier avant d'importer.")]
    NoFileLoaded,
    #[error("action impossible à l'étape {0:?}")]
    WrongStage(ImportStage),
    #[error(transparent)]
    Edit(#[from] EditError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSession {
    stage: ImportStage,
    page_size: usize,
    facilities: Vec<Facility>,
    selected: Option<FacilityId>,
    confirmed: Option<Facility>,
    notice: Option<String>,
    file: Option<SpreadsheetFile>,
    checkpoint: Option<Dataset>,
    editor: Option<GridEditor>,
    edits_validated: bool,
    status: Option<ImportStatus>,
}

impl ImportSession {
    pub fn new(page_size: usize) -> Self {
        Self {
            stage: ImportStage::SelectingFacility,
            page_size,
            facilities: Vec::new(),
            selected: None,
            confirmed: None,
            notice: None,
            file: None,
            checkpoint: None,
            editor: None,
            edits_validated: false,
            status: None,
        }
    }

    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn selected_facility(&self) -> Option<&FacilityId> {
        self.selected.as_ref()
    }

    pub fn confirmed_facility(&self) -> Option<&Facility> {
        self.confirmed.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn file(&self) -> Option<&SpreadsheetFile> {
        self.file.as_ref()
    }

    pub fn editor(&self) -> Option<&GridEditor> {
        self.editor.as_ref()
    }

    pub fn checkpoint(&self) -> Option<&Dataset> {
        self.checkpoint.as_ref()
    }

    pub fn edits_validated(&self) -> bool {
        self.edits_validated
    }

    pub fn status(&self) -> Option<&ImportStatus> {
        self.status.as_ref()
    }

    pub fn set_facilities(&mut self, facilities: Vec<Facility>) {
        if let Some(selected) = &self.selected {
            if !facilities.iter().any(|f| &f.id == selected) {
                self.selected = None;
            }
        }
        self.facilities = facilities;
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn select_facility(&mut self, id: FacilityId) -> Result<(), SessionError> {
        if self.stage != ImportStage::SelectingFacility {
            return Err(SessionError::FacilityLocked);
        }
        if !self.facilities.iter().any(|f| f.id == id) {
            return Err(SessionError::UnknownFacility(id));
        }
        self.selected = Some(id);
        self.notice = None;
        Ok(())
    }

    /// Returns the facility to send to the server. With nothing selected the
    /// validation notice is set and no request must be made.
    pub fn pending_confirmation(&mut self) -> Result<FacilityId, SessionError> {
        if self.stage != ImportStage::SelectingFacility {
            return Err(SessionError::FacilityLocked);
        }
        match &self.selected {
            Some(id) => Ok(id.clone()),
            None => {
                self.notice = Some(FACILITY_REQUIRED.to_string());
                Err(SessionError::NoFacilitySelected)
            }
        }
    }

    pub fn facility_confirmed(&mut self, id: &FacilityId) -> Result<(), SessionError> {
        if self.stage != ImportStage::SelectingFacility {
            return Err(SessionError::FacilityLocked);
        }
        let facility = self
            .facilities
            .iter()
            .find(|f| &f.id == id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownFacility(id.clone()))?;
        self.confirmed = Some(facility);
        self.notice = None;
        self.stage = ImportStage::AwaitingFile;
        Ok(())
    }

    pub fn load_spreadsheet(&mut self, loaded: LoadedSpreadsheet) -> Result<(), SessionError> {
        match self.stage {
            ImportStage::AwaitingFile | ImportStage::Previewing | ImportStage::Done => {}
            other => return Err(SessionError::WrongStage(other)),
        }
        let LoadedSpreadsheet { file, dataset } = loaded;
        self.checkpoint = Some(dataset.clone());
        self.editor = Some(GridEditor::new(dataset, self.page_size));
        self.file = Some(file);
        self.edits_validated = false;
        self.status = None;
        self.notice = None;
        self.stage = ImportStage::Previewing;
        Ok(())
    }

    fn editor_mut(&mut self) -> Result<&mut GridEditor, SessionError> {
        self.editor.as_mut().ok_or(SessionError::NoFileLoaded)
    }

    pub fn begin_edit(&mut self) -> Result<(), SessionError> {
        if self.stage != ImportStage::Previewing {
            return Err(SessionError::WrongStage(self.stage));
        }
        self.editor_mut()?.begin_edit();
        self.edits_validated = false;
        self.stage = ImportStage::Editing;
        Ok(())
    }

    pub fn edit_cell(&mut self, key: CellKey, value: String) -> Result<(), SessionError> {
        if self.stage != ImportStage::Editing {
            return Err(SessionError::WrongStage(self.stage));
        }
        self.editor_mut()?.set_cell(key, value)?;
        Ok(())
    }

    pub fn commit_edits(&mut self) -> Result<(), SessionError> {
        if self.stage != ImportStage::Editing {
            return Err(SessionError::WrongStage(self.stage));
        }
        let snapshot = self.editor_mut()?.commit()?;
        self.checkpoint = Some(snapshot);
        self.edits_validated = true;
        self.stage = ImportStage::Previewing;
        Ok(())
    }

    pub fn cancel_edits(&mut self) -> Result<(), SessionError> {
        if self.stage != ImportStage::Editing {
            return Err(SessionError::WrongStage(self.stage));
        }
        let checkpoint = self.checkpoint.clone().ok_or(SessionError::NoFileLoaded)?;
        self.editor_mut()?.restore(checkpoint);
        self.edits_validated = false;
        self.stage = ImportStage::Previewing;
        Ok(())
    }

    pub fn set_page(&mut self, page: usize) -> Result<(), SessionError> {
        self.editor_mut()?.set_page(page);
        Ok(())
    }

    pub fn next_page(&mut self) -> Result<(), SessionError> {
        self.editor_mut()?.next_page();
        Ok(())
    }

    pub fn prev_page(&mut self) -> Result<(), SessionError> {
        self.editor_mut()?.prev_page();
        Ok(())
    }

    /// Snapshots what will be sent. The request carries the original file
    /// bytes; grid edits stay on screen only.
    pub fn begin_submission(&mut self) -> Result<SubmissionRequest, SessionError> {
        let Some(facility) = self.confirmed.as_ref().map(|f| f.id.clone()) else {
            self.notice = Some(FACILITY_REQUIRED.to_string());
            return Err(SessionError::NoFacilitySelected);
        };
        let (Some(file), Some(editor)) = (self.file.clone(), self.editor.as_ref()) else {
            self.status = Some(ImportStatus::Failure {
                message: FILE_REQUIRED.to_string(),
            });
            return Err(SessionError::NoFileLoaded);
        };
        if !matches!(self.stage, ImportStage::Previewing | ImportStage::Done) {
            return Err(SessionError::WrongStage(self.stage));
        }
        let record_count = editor.dataset().body_len();
        self.status = None;
        self.stage = ImportStage::Submitting;
        Ok(SubmissionRequest {
            facility,
            file,
            record_count,
        })
    }

    pub fn finish_submission(&mut self, status: ImportStatus) -> Result<(), SessionError> {
        if self.stage != ImportStage::Submitting {
            return Err(SessionError::WrongStage(self.stage));
        }
        self.status = Some(status);
        self.stage = ImportStage::Done;
        Ok(())
    }

    pub fn acknowledge_status(&mut self) {
        self.status = None;
        if self.stage == ImportStage::Done {
            self.stage = ImportStage::Previewing;
        }
    }

    pub fn reset(&mut self) {
        let facilities = std::mem::take(&mut self.facilities);
        *self = Self::new(self.page_size);
        self.facilities = facilities;
    }
}
