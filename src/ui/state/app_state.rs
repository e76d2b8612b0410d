use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::account::StandardUser;
use crate::domain::entities::facility::{Facility, FacilityId, FacilityRecord};
use crate::domain::entities::history::HistoryEntry;
use crate::domain::entities::project::ProjectRow;
use crate::usecase::services::account_service::{PasswordForm, ProfileDraft};
use crate::usecase::services::avatar_preview::PreviewSlot;
use crate::usecase::services::import_session::ImportSession;
use crate::usecase::services::project_filter::{ProjectFilter, ProjectScope};
use crate::usecase::services::route_guard::{Route, SessionContext, HOME};
use crate::usecase::services::statistics::StatsSection;
use crate::usecase::services::submission::ProgressFrame;

#[derive(Clone, Copy)]
pub struct AppState {
    pub route: Signal<Route>,
    pub context: Signal<SessionContext>,
    pub context_loaded: Signal<bool>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
    pub session: Signal<ImportSession>,
    pub progress: Signal<Option<ProgressFrame>>,
    pub history: Signal<Vec<HistoryEntry>>,
    pub history_loading: Signal<bool>,
    pub history_error: Signal<Option<String>>,
    pub deleting_history: Signal<BTreeSet<i64>>,
    pub projects: Signal<Vec<ProjectRow>>,
    pub projects_loading: Signal<bool>,
    pub projects_error: Signal<Option<String>>,
    pub project_scope: Signal<ProjectScope>,
    pub project_filter: Signal<ProjectFilter>,
    pub scope_facilities: Signal<Vec<Facility>>,
    pub facility_records: Signal<Vec<FacilityRecord>>,
    pub facility_name: Signal<String>,
    pub facility_message: Signal<Option<String>>,
    pub deleting_facilities: Signal<HashSet<FacilityId>>,
    pub stats_start: Signal<String>,
    pub stats_end: Signal<String>,
    pub stats: Signal<Vec<StatsSection>>,
    pub stats_loading: Signal<bool>,
    pub stats_error: Signal<Option<String>>,
    pub draft: Signal<Option<ProfileDraft>>,
    pub account_message: Signal<Option<String>>,
    pub avatar_source: Signal<Option<PathBuf>>,
    pub avatar_preview: Signal<PreviewSlot>,
    pub password: Signal<PasswordForm>,
    pub password_message: Signal<Option<String>>,
    pub users: Signal<Vec<StandardUser>>,
    pub users_error: Signal<Option<String>>,
}

impl AppState {
    pub fn new(page_size: usize) -> Self {
        Self {
            route: use_signal(|| HOME),
            context: use_signal(SessionContext::default),
            context_loaded: use_signal(|| false),
            busy: use_signal(|| false),
            status: use_signal(|| "Prêt".to_string()),
            session: use_signal(|| ImportSession::new(page_size)),
            progress: use_signal(|| None::<ProgressFrame>),
            history: use_signal(Vec::<HistoryEntry>::new),
            history_loading: use_signal(|| false),
            history_error: use_signal(|| None::<String>),
            deleting_history: use_signal(BTreeSet::<i64>::new),
            projects: use_signal(Vec::<ProjectRow>::new),
            projects_loading: use_signal(|| false),
            projects_error: use_signal(|| None::<String>),
            project_scope: use_signal(ProjectScope::default),
            project_filter: use_signal(ProjectFilter::default),
            scope_facilities: use_signal(Vec::<Facility>::new),
            facility_records: use_signal(Vec::<FacilityRecord>::new),
            facility_name: use_signal(String::new),
            facility_message: use_signal(|| None::<String>),
            deleting_facilities: use_signal(HashSet::<FacilityId>::new),
            stats_start: use_signal(String::new),
            stats_end: use_signal(String::new),
            stats: use_signal(Vec::<StatsSection>::new),
            stats_loading: use_signal(|| false),
            stats_error: use_signal(|| None::<String>),
            draft: use_signal(|| None::<ProfileDraft>),
            account_message: use_signal(|| None::<String>),
            avatar_source: use_signal(|| None::<PathBuf>),
            avatar_preview: use_signal(PreviewSlot::default),
            password: use_signal(PasswordForm::default),
            password_message: use_signal(|| None::<String>),
            users: use_signal(Vec::<StandardUser>::new),
            users_error: use_signal(|| None::<String>),
        }
    }
}
