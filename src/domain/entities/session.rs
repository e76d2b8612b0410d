#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportStage {
    #[default]
    SelectingFacility,
    AwaitingFile,
    Previewing,
    Editing,
    Submitting,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    Success { rows: usize },
    Failure { message: String },
}

impl ImportStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ImportStatus::Success { .. })
    }

    pub fn title(&self) -> &'static str {
        match self {
            ImportStatus::Success { .. } => "Succès",
            ImportStatus::Failure { .. } => "Erreur",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ImportStatus::Success { rows } => format!("{rows} lignes traitées."),
            ImportStatus::Failure { message } => message.clone(),
        }
    }
}
