use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::domain::entities::facility::FacilityId;
use crate::domain::entities::session::ImportStatus;
use crate::infra::import::xlsx::SpreadsheetFile;
use crate::usecase::ports::backend::DashboardBackend;

pub const PROGRESS_PHRASES: [&str; 4] = [
    "On range les cellules... 🗂️",
    "Les lignes voyagent vers la base... 🚀",
    "Presque terminé… ✨",
    "Ça y est, on finit ! 🎉",
];
pub const SUCCESS_PHRASE: &str = "Fichier importé avec succès ! 🎉";
pub const FAILURE_MESSAGE: &str = "Erreur lors de l'importation.";

const PROGRESS_STEP: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub facility: FacilityId,
    pub file: SpreadsheetFile,
    pub record_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressFrame {
    pub percent: u8,
    pub phrase: &'static str,
}

impl ProgressFrame {
    pub fn idle() -> Self {
        Self {
            percent: 0,
            phrase: "",
        }
    }

    pub fn completed() -> Self {
        Self {
            percent: 100,
            phrase: SUCCESS_PHRASE,
        }
    }
}

/// Purely cosmetic: bounces between 0 and 100 in fixed steps and switches
/// phrase at each bound. It knows nothing about the upload.
#[derive(Debug, Clone)]
pub struct ProgressAnimation {
    percent: i32,
    direction: i32,
    phrase_idx: usize,
}

impl Default for ProgressAnimation {
    fn default() -> Self {
        Self {
            percent: 0,
            direction: 1,
            phrase_idx: 0,
        }
    }
}

impl ProgressAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) -> ProgressFrame {
        let mut next = self.percent + self.direction * PROGRESS_STEP;
        if next >= 100 {
            next = 100;
            self.direction = -1;
            self.phrase_idx = (self.phrase_idx + 1) % PROGRESS_PHRASES.len();
        } else if next <= 0 {
            next = 0;
            self.direction = 1;
            self.phrase_idx = (self.phrase_idx + 1) % PROGRESS_PHRASES.len();
        }
        self.percent = next;
        ProgressFrame {
            percent: next as u8,
            phrase: PROGRESS_PHRASES[self.phrase_idx],
        }
    }
}

/// Posts the original file and facility id while feeding animation frames to
/// `on_progress`. The interval lives inside this future and stops with it.
/// Exactly one terminal frame is emitted: `completed` on HTTP 200, `idle` on
/// anything else.
pub async fn submit_import<F>(
    backend: &dyn DashboardBackend,
    request: &SubmissionRequest,
    interval: Duration,
    mut on_progress: F,
) -> ImportStatus
where
    F: FnMut(ProgressFrame),
{
    tracing::info!(
        file = %request.file.name,
        facility = %request.facility,
        bytes = request.file.bytes.len(),
        "submitting spreadsheet import"
    );

    let mut animation = ProgressAnimation::new();
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let upload = backend.import_spreadsheet(&request.file, &request.facility);
    tokio::pin!(upload);

    let result = loop {
        tokio::select! {
            result = &mut upload => break result,
            _ = ticker.tick() => on_progress(animation.tick()),
        }
    };
    drop(ticker);

    match result {
        Ok(()) => {
            tracing::info!(rows = request.record_count, "spreadsheet import accepted");
            on_progress(ProgressFrame::completed());
            ImportStatus::Success {
                rows: request.record_count,
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "spreadsheet import failed");
            on_progress(ProgressFrame::idle());
            ImportStatus::Failure {
                message: FAILURE_MESSAGE.to_string(),
            }
        }
    }
}
