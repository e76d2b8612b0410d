use std::sync::Arc;

use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::config::{default_preview_dir, AppConfig};
use crate::domain::entities::account::ProfileField;
use crate::domain::entities::edit::CellKey;
use crate::domain::entities::history::format_import_date;
use crate::domain::entities::project::PROJECT_COLUMNS;
use crate::domain::entities::session::ImportStage;
use crate::domain::entities::statistics::DateRange;
use crate::infra::http::client::HttpBackend;
use crate::infra::import::xlsx::file_display_name;
use crate::ui::grid::{column_alignments, grid_snapshot};
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::backend::DashboardBackend;
use crate::usecase::services::account_service::{
    avatar_url, refreshed_draft, AccountService, ProfileDraft,
};
use crate::usecase::services::avatar_preview::PreviewHandle;
use crate::usecase::services::facility_admin::FacilityAdminService;
use crate::usecase::services::history_service::{remove_entry, HistoryService};
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::project_filter::{
    distinct_communes, distinct_facilities, empty_message, ProjectScope, ProjectService,
};
use crate::usecase::services::route_guard::{
    resolve_route, visible_routes, Route, SessionContext,
};
use crate::usecase::services::statistics::{
    format_count, format_fcfa, StatisticsService, StatsSection, StatsTable,
};
use crate::usecase::services::submission::{submit_import, ProgressFrame};
use crate::{table_container_style, table_header_cell_style};

#[derive(Clone)]
struct Services {
    backend: Arc<dyn DashboardBackend>,
    config: AppConfig,
}

const BUTTON_STYLE: &str =
    "border: none; color: #fff; padding: 8px 16px; border-radius: 6px; cursor: pointer;";
const MODAL_BACKDROP_STYLE: &str = "position: fixed; inset: 0; display: flex; \
    align-items: center; justify-content: center; background: rgba(0,0,0,0.5); z-index: 1300;";
const INPUT_STYLE: &str = "padding: 6px; border: 1px solid #bbb; border-radius: 6px;";
const ERROR_STYLE: &str = "text-align: center; color: #dc2626;";

fn reload_session_context(services: &Services, state: AppState) {
    let service = AccountService::new(services.backend.clone());
    let AppState {
        mut context,
        mut context_loaded,
        mut status,
        ..
    } = state;
    spawn(async move {
        match service.load().await {
            Ok(user) => {
                tracing::info!(user = user.id, admin = user.admin, "session resolved");
                context.set(SessionContext::signed_in(user));
            }
            Err(err) => {
                tracing::warn!(error = %err, "no active session");
                context.set(SessionContext::default());
                status.set(format!("Session introuvable : {err}"));
            }
        }
        context_loaded.set(true);
    });
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let state = AppState::new(config.page_size);
    use_context_provider(|| state);
    let services = use_hook(|| {
        HttpBackend::new(&config.api_base_url)
            .map(|backend| {
                provide_context(Services {
                    backend: Arc::new(backend),
                    config: config.clone(),
                })
            })
            .map_err(|err| err.to_string())
    });

    let services_for_init = services.clone();
    use_effect(move || {
        if let Ok(services) = &services_for_init {
            reload_session_context(services, state);
        }
    });

    if let Err(err) = services {
        return rsx! {
            div {
                p { "Impossible de préparer le client HTTP : {err}" }
            }
        };
    }

    let AppState {
        mut route,
        context,
        context_loaded,
        busy,
        status,
        ..
    } = state;

    let ctx_snapshot = context();
    let current = resolve_route(route(), &ctx_snapshot).target();
    let nav_routes = visible_routes(&ctx_snapshot);
    let user_label = ctx_snapshot
        .user
        .as_ref()
        .map(|user| user.display_name())
        .unwrap_or_default();

    rsx! {
        div {
            style: "font-family: 'Segoe UI', sans-serif; padding: 12px; background: #f3f4f6; min-height: 100vh;",

            div {
                style: "display: flex; gap: 8px; align-items: center; margin-bottom: 12px; position: sticky; top: 0; background: #fff; z-index: 900; padding: 8px 12px; border-radius: 8px;",
                h2 { style: "margin: 0 16px 0 0; color: #15803d;", "Financements" }
                for nav_route in nav_routes {
                    button {
                        key: "{nav_route.label()}",
                        disabled: busy(),
                        style: if nav_route == current { "border: 1px solid #15803d; background: #dcfce7; padding: 4px 10px; border-radius: 6px;" } else { "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;" },
                        onclick: move |_| route.set(nav_route),
                        "{nav_route.label()}"
                    }
                }
                span { style: "margin-left: auto; color: #555;", "{user_label}" }
            }

            if !context_loaded() {
                p { "Chargement de la session..." }
            } else {
                {
                    match current {
                        Route::SignIn => rsx! { SignInPage {} },
                        Route::Import => rsx! { ImportPage {} },
                        Route::History => rsx! { HistoryPage {} },
                        Route::Projects => rsx! { ProjectsPage {} },
                        Route::Statistics => rsx! { StatisticsPage {} },
                        Route::Facilities => rsx! { FacilitiesPage {} },
                        Route::Account => rsx! { AccountPage {} },
                        Route::Users => rsx! { UsersPage {} },
                    }
                }
            }

            div { style: "margin-top: 12px; color: #555; font-size: 13px;", "{status}" }
        }
    }
}

#[component]
fn SignInPage() -> Element {
    let services = use_context::<Services>();
    let state = use_context::<AppState>();
    let base_url = services.config.api_base_url.clone();

    rsx! {
        div {
            style: "max-width: 480px; margin: 40px auto; background: #fff; padding: 24px; border-radius: 8px; text-align: center;",
            h3 { "Connexion requise" }
            p { "Connectez-vous sur {base_url} puis réessayez." }
            button {
                style: "{BUTTON_STYLE} background: #16a34a;",
                onclick: move |_| reload_session_context(&services, state),
                "Réessayer"
            }
        }
    }
}

#[component]
fn ImportPage() -> Element {
    let services = use_context::<Services>();
    let AppState {
        mut session,
        mut status,
        progress,
        ..
    } = use_context::<AppState>();

    let backend_for_facilities = services.backend.clone();
    use_effect(move || {
        let backend = backend_for_facilities.clone();
        spawn(async move {
            match backend.list_facilities().await {
                Ok(facilities) => {
                    tracing::debug!(count = facilities.len(), "facilities loaded");
                    session.write().set_facilities(facilities);
                }
                Err(err) => {
                    tracing::error!(error = %err, "failed to load facilities");
                    status.set(format!("Erreur chargement facilités : {err}"));
                }
            }
        });
    });

    let stage = session.read().stage();

    rsx! {
        div {
            style: "max-width: 1200px; margin: 0 auto;",
            h1 { style: "text-align: center; color: #15803d;", "Importation Excel" }
            if stage == ImportStage::SelectingFacility {
                FacilitySelector {}
            } else {
                ConfirmedFacilityBanner {}
                if stage == ImportStage::AwaitingFile {
                    FilePicker {}
                } else {
                    GridEditorView {}
                }
            }
            if let Some(frame) = progress() {
                ProgressModal { frame }
            }
            ImportStatusModal {}
        }
    }
}

#[component]
fn FacilitySelector() -> Element {
    let services = use_context::<Services>();
    let AppState {
        mut session,
        mut busy,
        mut status,
        ..
    } = use_context::<AppState>();

    let (facilities, selected, notice) = {
        let current = session.read();
        (
            current.facilities().to_vec(),
            current.selected_facility().cloned(),
            current.notice().map(str::to_string),
        )
    };
    let backend_for_confirm = services.backend.clone();

    rsx! {
        div {
            style: "max-width: 720px; margin: 24px auto; padding: 24px; background: #fff; border-radius: 8px;",
            h2 { style: "text-align: center; color: #15803d;", "Importer des données" }
            p { style: "text-align: center; color: #555;", "Sélectionnez une facilité ci-dessous :" }
            div {
                style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px; margin-bottom: 16px;",
                for facility in facilities {
                    {
                        let is_selected = selected.as_ref() == Some(&facility.id);
                        let id = facility.id.clone();
                        rsx! {
                            div {
                                key: "{facility.id}",
                                style: if is_selected { "cursor: pointer; border: 1px solid #22c55e; background: #dcfce7; padding: 14px; border-radius: 8px; text-align: center; font-weight: 600;" } else { "cursor: pointer; border: 1px solid #ddd; padding: 14px; border-radius: 8px; text-align: center;" },
                                onclick: move |_| {
                                    if let Err(err) = session.write().select_facility(id.clone()) {
                                        status.set(err.to_string());
                                    }
                                },
                                "{facility.name}"
                            }
                        }
                    }
                }
            }
            if let Some(notice) = notice {
                p { style: "color: #dc2626; text-align: center;", "{notice}" }
            }
            button {
                disabled: busy(),
                style: "{BUTTON_STYLE} background: #16a34a; width: 100%;",
                onclick: move |_| {
                    let Ok(id) = session.write().pending_confirmation() else {
                        return;
                    };
                    let backend = backend_for_confirm.clone();
                    spawn(async move {
                        busy.set(true);
                        match backend.confirm_facility(&id).await {
                            Ok(()) => {
                                tracing::info!(facility = %id, "facility confirmed");
                                if let Err(err) = session.write().facility_confirmed(&id) {
                                    status.set(err.to_string());
                                }
                            }
                            Err(err) => {
                                tracing::warn!(facility = %id, error = %err, "facility confirmation failed");
                                session.write().set_notice(format!("Confirmation impossible : {err}"));
                            }
                        }
                        busy.set(false);
                    });
                },
                "Confirmer votre choix"
            }
        }
    }
}

#[component]
fn ConfirmedFacilityBanner() -> Element {
    let AppState { session, .. } = use_context::<AppState>();
    let name = session
        .read()
        .confirmed_facility()
        .map(|f| f.name.clone())
        .unwrap_or_default();

    rsx! {
        div {
            style: "max-width: 720px; margin: 16px auto; padding: 12px; background: #fff; border-radius: 8px; text-align: center;",
            "Facilité sélectionnée : "
            span { style: "color: #15803d; font-weight: 600;", "{name}" }
        }
    }
}

#[component]
fn FilePicker() -> Element {
    let AppState {
        mut session,
        mut busy,
        mut status,
        ..
    } = use_context::<AppState>();
    let notice = session.read().notice().map(str::to_string);

    rsx! {
        div {
            style: "width: 380px; margin: 24px auto; padding: 32px; background: #fff; border: 2px dashed #16a34a; border-radius: 12px; text-align: center;",
            h3 { style: "color: #15803d;", "Déposez un fichier Excel ici" }
            p { style: "color: #555;", "Format accepté : .xlsx" }
            button {
                disabled: busy(),
                style: "{BUTTON_STYLE} background: #16a34a;",
                onclick: move |_| {
                    let Some(path) = FileDialog::new()
                        .add_filter("Excel", &["xlsx"])
                        .pick_file() else {
                        status.set("Sélection annulée".to_string());
                        return;
                    };
                    busy.set(true);
                    status.set(format!("Lecture de {}", file_display_name(&path)));
                    spawn(async move {
                        match ImportService::load_file(&path).await {
                            Ok(loaded) => {
                                let rows = loaded.dataset.body_len();
                                match session.write().load_spreadsheet(loaded) {
                                    Ok(()) => status.set(format!("{rows} lignes chargées")),
                                    Err(err) => status.set(err.to_string()),
                                }
                            }
                            Err(err) => {
                                tracing::warn!(path = %path.display(), error = %err, "spreadsheet load failed");
                                session.write().set_notice(err.to_string());
                            }
                        }
                        busy.set(false);
                    });
                },
                "Choisir un fichier Excel"
            }
            if let Some(notice) = notice {
                p { style: "color: #dc2626; margin-top: 12px;", "{notice}" }
            }
        }
    }
}

#[component]
fn GridEditorView() -> Element {
    let services = use_context::<Services>();
    let AppState {
        mut session,
        mut progress,
        busy,
        mut status,
        ..
    } = use_context::<AppState>();

    let snapshot = grid_snapshot(&session.read());
    let Some(grid) = snapshot else {
        return rsx! {};
    };
    let editing = grid.editing;
    let alignments = column_alignments(&grid.rows, grid.header.len());
    let page_label = format!("Page {} / {}", grid.page + 1, grid.page_count);
    let backend_for_submit = services.backend.clone();
    let interval = services.config.progress_interval();

    rsx! {
        div {
            style: "margin-top: 16px;",
            div { style: "text-align: center; color: #555; font-style: italic; margin-bottom: 8px;", "Fichier sélectionné : {grid.file_name}" }
            div {
                style: "{table_container_style()}",
                table {
                    style: "min-width: 100%; border-collapse: collapse; font-size: 14px;",
                    thead {
                        tr {
                            for (col_idx, title) in grid.header.iter().enumerate() {
                                th { key: "{col_idx}", style: "{table_header_cell_style()}", "{title}" }
                            }
                        }
                    }
                    tbody {
                        for (row_idx, cells) in grid.rows.clone() {
                            tr {
                                key: "{row_idx}",
                                style: if row_idx % 2 == 0 { "background: #f9fafb;" } else { "" },
                                for (col_idx, ((raw, shown), align)) in cells.into_iter().zip(alignments.clone()).enumerate() {
                                    td {
                                        key: "{col_idx}",
                                        style: "padding: 8px 12px; border-top: 1px solid #e5e7eb; text-align: {align};",
                                        if editing {
                                            input {
                                                r#type: "text",
                                                value: "{raw}",
                                                spellcheck: false,
                                                style: "width: 100%; min-width: 160px; border: none; background: transparent;",
                                                oninput: move |evt| {
                                                    let key = CellKey::new(row_idx, col_idx);
                                                    if let Err(err) = session.write().edit_cell(key, evt.value()) {
                                                        status.set(err.to_string());
                                                    }
                                                }
                                            }
                                        } else {
                                            span { "{shown}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if grid.page_count > 1 {
                div {
                    style: "display: flex; justify-content: center; align-items: center; gap: 16px; margin-top: 16px;",
                    button {
                        disabled: grid.page == 0,
                        onclick: move |_| {
                            if let Err(err) = session.write().prev_page() {
                                status.set(err.to_string());
                            }
                        },
                        "Précédent"
                    }
                    span { "{page_label}" }
                    button {
                        disabled: grid.page + 1 >= grid.page_count,
                        onclick: move |_| {
                            if let Err(err) = session.write().next_page() {
                                status.set(err.to_string());
                            }
                        },
                        "Suivant"
                    }
                }
            }

            div {
                style: "display: flex; flex-wrap: wrap; justify-content: center; gap: 12px; margin-top: 16px;",
                if !editing {
                    button {
                        disabled: busy(),
                        style: "{BUTTON_STYLE} background: #eab308;",
                        onclick: move |_| {
                            if let Err(err) = session.write().begin_edit() {
                                status.set(err.to_string());
                            }
                        },
                        "Modifier"
                    }
                    button {
                        disabled: busy(),
                        style: "{BUTTON_STYLE} background: #15803d;",
                        onclick: move |_| {
                            let request = match session.write().begin_submission() {
                                Ok(request) => request,
                                Err(err) => {
                                    status.set(err.to_string());
                                    return;
                                }
                            };
                            let backend = backend_for_submit.clone();
                            progress.set(Some(ProgressFrame::idle()));
                            spawn(async move {
                                let outcome = submit_import(backend.as_ref(), &request, interval, |frame| {
                                    progress.set(Some(frame));
                                })
                                .await;
                                progress.set(None);
                                status.set(outcome.message());
                                if let Err(err) = session.write().finish_submission(outcome) {
                                    tracing::error!(error = %err, "submission finished out of order");
                                }
                            });
                        },
                        "Importer dans la base"
                    }
                } else {
                    button {
                        style: "{BUTTON_STYLE} background: #16a34a;",
                        onclick: move |_| {
                            if let Err(err) = session.write().commit_edits() {
                                status.set(err.to_string());
                            }
                        },
                        "Valider les modifications"
                    }
                    button {
                        style: "{BUTTON_STYLE} background: #ef4444;",
                        onclick: move |_| {
                            if let Err(err) = session.write().cancel_edits() {
                                status.set(err.to_string());
                            }
                        },
                        "Annuler"
                    }
                }
                button {
                    disabled: busy(),
                    style: "{BUTTON_STYLE} background: #374151;",
                    onclick: move |_| {
                        session.write().reset();
                        status.set("Nouvelle importation".to_string());
                    },
                    "Choisir un autre fichier"
                }
            }
            if grid.edits_validated {
                p { style: "text-align: center; color: #92400e; font-size: 13px;",
                    "Les modifications sont enregistrées pour la relecture ; le fichier importé reste le fichier d'origine."
                }
            }
        }
    }
}

#[component]
fn ProgressModal(frame: ProgressFrame) -> Element {
    let offset = 100 - i32::from(frame.percent);
    rsx! {
        div {
            style: MODAL_BACKDROP_STYLE,
            div {
                style: "background: #fff; border-radius: 8px; padding: 24px; width: 200px; display: flex; flex-direction: column; align-items: center;",
                svg {
                    width: "96",
                    height: "96",
                    view_box: "0 0 36 36",
                    style: "transform: rotate(-90deg);",
                    circle { cx: "18", cy: "18", r: "15.9155", fill: "none", stroke: "#e5e7eb", stroke_width: "3.8" }
                    circle {
                        cx: "18",
                        cy: "18",
                        r: "15.9155",
                        fill: "none",
                        stroke: "#16a34a",
                        stroke_width: "3.8",
                        stroke_dasharray: "100, 100",
                        stroke_dashoffset: "{offset}",
                    }
                }
                p { style: "margin-top: 12px; text-align: center; color: #15803d; font-weight: 600;", "{frame.phrase}" }
            }
        }
    }
}

#[component]
fn ImportStatusModal() -> Element {
    let AppState { mut session, .. } = use_context::<AppState>();
    let (stage, outcome) = {
        let current = session.read();
        (current.stage(), current.status().cloned())
    };
    let Some(outcome) = outcome else {
        return rsx! {};
    };
    if stage == ImportStage::Submitting {
        return rsx! {};
    }
    let color = if outcome.is_success() { "#15803d" } else { "#dc2626" };

    rsx! {
        div {
            style: MODAL_BACKDROP_STYLE,
            div {
                style: "background: #fff; border-radius: 8px; padding: 24px; width: 380px; text-align: center;",
                h2 { style: "color: {color};", "{outcome.title()}" }
                p { "{outcome.message()}" }
                button {
                    style: "{BUTTON_STYLE} background: #16a34a;",
                    onclick: move |_| session.write().acknowledge_status(),
                    "OK"
                }
            }
        }
    }
}

#[component]
fn HistoryPage() -> Element {
    let services = use_context::<Services>();
    let AppState {
        mut history,
        mut history_loading,
        mut history_error,
        mut deleting_history,
        ..
    } = use_context::<AppState>();

    let backend_for_load = services.backend.clone();
    use_effect(move || {
        let service = HistoryService::new(backend_for_load.clone());
        spawn(async move {
            history_loading.set(true);
            match service.list().await {
                Ok(entries) => {
                    history.set(entries);
                    history_error.set(None);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "history load failed");
                    history_error.set(Some(format!("Erreur lors du chargement de l'historique : {err}")));
                }
            }
            history_loading.set(false);
        });
    });

    let entries = history();
    let backend_for_delete = services.backend.clone();

    rsx! {
        div {
            style: "max-width: 800px; margin: 0 auto;",
            h2 { style: "text-align: center; color: #15803d;", "Historique" }
            if history_loading() {
                p { style: "text-align: center;", "Chargement..." }
            }
            if let Some(err) = history_error() {
                p { style: "text-align: center; color: #dc2626;", "{err}" }
            }
            if !history_loading() && history_error().is_none() && entries.is_empty() {
                div {
                    style: "background: #fff; padding: 24px; border-radius: 8px; text-align: center;",
                    p { style: "font-weight: 600;", "Aucun historique pour le moment" }
                    p { style: "color: #666;", "Les importations apparaîtront ici dès qu'elles auront lieu." }
                }
            }
            for entry in entries {
                {
                    let id = entry.id;
                    let backend = backend_for_delete.clone();
                    let when = format_import_date(&entry.imported_at);
                    let file_name = entry.file_name.clone().unwrap_or_else(|| "(sans nom)".to_string());
                    let user = entry.user.clone().unwrap_or_default();
                    let color = if entry.succeeded { "#15803d" } else { "#dc2626" };
                    rsx! {
                        div {
                            key: "{id}",
                            style: "display: flex; justify-content: space-between; align-items: center; background: #fff; padding: 12px 16px; border-radius: 8px; margin-top: 8px;",
                            div {
                                p { style: "margin: 0; font-weight: 600;", "{file_name}" }
                                p { style: "margin: 0; color: #666; font-size: 13px;", "{when} · {user}" }
                                p { style: "margin: 0; color: {color}; font-size: 13px;", "Importation {entry.status_label()}" }
                            }
                            button {
                                disabled: deleting_history.read().contains(&id),
                                style: "{BUTTON_STYLE} background: #ef4444;",
                                onclick: move |_| {
                                    if deleting_history.read().contains(&id) {
                                        return;
                                    }
                                    let confirm = MessageDialog::new()
                                        .set_level(MessageLevel::Warning)
                                        .set_title("Historique")
                                        .set_description("Voulez-vous vraiment supprimer cet historique ?")
                                        .set_buttons(MessageButtons::YesNo)
                                        .show();
                                    if confirm != MessageDialogResult::Yes {
                                        return;
                                    }
                                    let service = HistoryService::new(backend.clone());
                                    deleting_history.write().insert(id);
                                    spawn(async move {
                                        match service.delete(id).await {
                                            Ok(()) => remove_entry(&mut history.write(), id),
                                            Err(err) => {
                                                history_error.set(Some(format!(
                                                    "Erreur lors de la suppression : {err}"
                                                )));
                                            }
                                        }
                                        deleting_history.write().remove(&id);
                                    });
                                },
                                "Supprimer"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn AccountPage() -> Element {
    let services = use_context::<Services>();
    let AppState {
        mut context,
        mut draft,
        mut account_message,
        mut avatar_source,
        mut avatar_preview,
        mut password,
        mut password_message,
        ..
    } = use_context::<AppState>();

    use_effect(move || {
        let Some(user) = context.read().user.clone() else {
            return;
        };
        let next = refreshed_draft(draft.peek().as_ref(), &user);
        if let Some(next) = next {
            draft.set(Some(next));
        }
    });
    use_drop(move || {
        avatar_preview.write().clear();
        avatar_source.set(None);
    });

    let Some(current) = draft() else {
        return rsx! { p { "Chargement du profil..." } };
    };
    let photo_url = current
        .user()
        .photo_profil
        .as_deref()
        .map(|photo| avatar_url(&services.config.api_base_url, photo));
    let preview_src = avatar_preview
        .read()
        .current()
        .map(|path| path.display().to_string());
    let has_changes = current.has_changes();
    let editing = current.editing();
    let backend_for_save = services.backend.clone();
    let backend_for_avatar = services.backend.clone();
    let backend_for_password = services.backend.clone();
    let form = password();

    rsx! {
        div {
            style: "max-width: 720px; margin: 0 auto;",
            h2 { style: "text-align: center; color: #15803d;", "Mon compte" }
            div {
                style: "display: flex; align-items: center; gap: 16px; background: #fff; padding: 16px; border-radius: 8px;",
                if let Some(src) = preview_src.or(photo_url) {
                    img { src: "{src}", style: "width: 96px; height: 96px; border-radius: 50%; object-fit: cover;" }
                } else {
                    div { style: "width: 96px; height: 96px; border-radius: 50%; background: #e5e7eb;" }
                }
                button {
                    style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| {
                        let Some(path) = FileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "gif"])
                            .pick_file() else {
                            return;
                        };
                        let preview = std::fs::read(&path)
                            .map_err(anyhow::Error::from)
                            .and_then(|bytes| {
                                let dir = default_preview_dir()?;
                                PreviewHandle::create(&dir, &file_display_name(&path), &bytes)
                            });
                        match preview {
                            Ok(handle) => {
                                avatar_preview.write().replace(handle);
                                avatar_source.set(Some(path));
                            }
                            Err(err) => account_message.set(Some(format!("Aperçu impossible : {err}"))),
                        }
                    },
                    "Changer la photo"
                }
                if avatar_source().is_some() {
                    button {
                        style: "{BUTTON_STYLE} background: #16a34a;",
                        onclick: move |_| {
                            let Some(path) = avatar_source() else {
                                return;
                            };
                            let service = AccountService::new(backend_for_avatar.clone());
                            spawn(async move {
                                match service.upload_avatar(&path).await {
                                    Ok(photo) => {
                                        if let Some(d) = draft.write().as_mut() {
                                            d.set_photo(photo.clone());
                                        }
                                        if let Some(user) = context.write().user.as_mut() {
                                            user.photo_profil = photo;
                                        }
                                        avatar_preview.write().clear();
                                        avatar_source.set(None);
                                        account_message.set(Some("Photo de profil mise à jour !".to_string()));
                                    }
                                    Err(err) => {
                                        tracing::warn!(error = %err, "avatar upload failed");
                                        account_message.set(Some(format!("Échec de l'envoi : {err}")));
                                    }
                                }
                            });
                        },
                        "Envoyer la photo"
                    }
                }
            }

            for field in ProfileField::ALL {
                div {
                    key: "{field.label()}",
                    style: "background: #fff; padding: 16px; border-radius: 8px; margin-top: 12px;",
                    h4 { style: "margin: 0 0 6px 0; color: #555;", "{field.label()}" }
                    if editing == Some(field) {
                        div {
                            style: "display: flex; gap: 8px;",
                            input {
                                r#type: "text",
                                value: "{current.value(field)}",
                                style: "flex: 1; padding: 6px; border: 1px solid #bbb; border-radius: 6px;",
                                oninput: move |evt| {
                                    if let Some(d) = draft.write().as_mut() {
                                        d.set_value(field, evt.value());
                                    }
                                }
                            }
                            button {
                                onclick: move |_| {
                                    if let Some(d) = draft.write().as_mut() {
                                        d.close_field();
                                    }
                                },
                                "OK"
                            }
                            button {
                                onclick: move |_| {
                                    if let Some(d) = draft.write().as_mut() {
                                        d.cancel_field();
                                    }
                                },
                                "Annuler"
                            }
                        }
                    } else {
                        div {
                            style: "display: flex; justify-content: space-between;",
                            span { style: "font-weight: 600;", "{current.value(field)}" }
                            button {
                                onclick: move |_| {
                                    if let Some(d) = draft.write().as_mut() {
                                        d.start_edit(field);
                                    }
                                },
                                "Modifier"
                            }
                        }
                    }
                }
            }

            button {
                disabled: !has_changes,
                style: "{BUTTON_STYLE} background: #15803d; margin-top: 16px;",
                onclick: move |_| {
                    let Some(snapshot) = draft() else {
                        return;
                    };
                    let service = AccountService::new(backend_for_save.clone());
                    spawn(async move {
                        match service.save(&snapshot).await {
                            Ok(Some(user)) => {
                                context.write().user = Some(user.clone());
                                draft.set(Some(ProfileDraft::new(user)));
                                account_message.set(Some("Profil mis à jour avec succès.".to_string()));
                            }
                            Ok(None) => {}
                            Err(err) => {
                                tracing::warn!(error = %err, "profile update failed");
                                account_message.set(Some("Échec de la mise à jour du profil.".to_string()));
                            }
                        }
                    });
                },
                "Appliquer les modifications"
            }
            if let Some(message) = account_message() {
                p { style: "margin-top: 12px;", "{message}" }
            }

            div {
                style: "display: flex; flex-direction: column; gap: 8px; background: #fff; padding: 16px; border-radius: 8px; margin-top: 16px;",
                h4 { style: "margin: 0; color: #555;", "Mot de passe" }
                label {
                    input {
                        r#type: "checkbox",
                        checked: form.first_login,
                        onchange: move |evt| password.write().first_login = evt.checked(),
                    }
                    " Mot de passe temporaire (première connexion)"
                }
                if form.first_login {
                    input {
                        r#type: "email",
                        placeholder: "Adresse email",
                        value: "{form.email}",
                        style: INPUT_STYLE,
                        oninput: move |evt| password.write().email = evt.value(),
                    }
                }
                input {
                    r#type: "password",
                    placeholder: "Mot de passe actuel",
                    value: "{form.current}",
                    style: INPUT_STYLE,
                    oninput: move |evt| password.write().current = evt.value(),
                }
                input {
                    r#type: "password",
                    placeholder: "Nouveau mot de passe",
                    value: "{form.new}",
                    style: INPUT_STYLE,
                    oninput: move |evt| password.write().new = evt.value(),
                }
                input {
                    r#type: "password",
                    placeholder: "Confirmer le mot de passe",
                    value: "{form.confirm}",
                    style: INPUT_STYLE,
                    oninput: move |evt| password.write().confirm = evt.value(),
                }
                button {
                    style: "{BUTTON_STYLE} background: #15803d;",
                    onclick: move |_| {
                        let snapshot = password();
                        let service = AccountService::new(backend_for_password.clone());
                        spawn(async move {
                            match service.change_password(&snapshot).await {
                                Ok(message) => {
                                    password.set(Default::default());
                                    password_message.set(Some(message));
                                }
                                Err(err) => {
                                    tracing::warn!(error = %err, "password change failed");
                                    password_message.set(Some(err.to_string()));
                                }
                            }
                        });
                    },
                    "Changer le mot de passe"
                }
                if let Some(message) = password_message() {
                    p { style: "margin: 0;", "{message}" }
                }
            }
        }
    }
}

#[component]
fn UsersPage() -> Element {
    let services = use_context::<Services>();
    let AppState {
        mut users,
        mut users_error,
        ..
    } = use_context::<AppState>();

    let backend_for_load = services.backend.clone();
    use_effect(move || {
        let service = AccountService::new(backend_for_load.clone());
        spawn(async move {
            match service.standard_users().await {
                Ok(list) => {
                    users.set(list);
                    users_error.set(None);
                }
                Err(err) => users_error.set(Some(err.to_string())),
            }
        });
    });

    rsx! {
        div {
            style: "max-width: 720px; margin: 0 auto;",
            h2 { style: "text-align: center; color: #15803d;", "Utilisateurs standard" }
            if let Some(err) = users_error() {
                p { style: "color: #dc2626;", "{err}" }
            }
            div {
                style: "{table_container_style()}",
                table {
                    style: "width: 100%; border-collapse: collapse;",
                    thead {
                        tr {
                            th { style: "{table_header_cell_style()}", "Nom" }
                            th { style: "{table_header_cell_style()}", "Prénom" }
                            th { style: "{table_header_cell_style()}", "Créé le" }
                        }
                    }
                    tbody {
                        for (idx, user) in users().into_iter().enumerate() {
                            tr {
                                key: "{idx}",
                                td { style: "padding: 8px 12px;", "{user.nom}" }
                                td { style: "padding: 8px 12px;", "{user.prenom}" }
                                td { style: "padding: 8px 12px;", "{user.date_creation.clone().unwrap_or_default()}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ProjectsPage() -> Element {
    let services = use_context::<Services>();
    let AppState {
        mut projects,
        mut projects_loading,
        mut projects_error,
        mut project_scope,
        mut project_filter,
        mut scope_facilities,
        ..
    } = use_context::<AppState>();

    let backend_for_facilities = services.backend.clone();
    use_effect(move || {
        let backend = backend_for_facilities.clone();
        spawn(async move {
            match backend.list_facilities().await {
                Ok(list) => scope_facilities.set(list),
                Err(err) => tracing::warn!(error = %err, "facilities unavailable for project scopes"),
            }
        });
    });

    let backend_for_load = services.backend.clone();
    use_effect(move || {
        let scope = project_scope();
        let service = ProjectService::new(backend_for_load.clone());
        spawn(async move {
            projects_loading.set(true);
            let result = service.list(&scope).await;
            if *project_scope.peek() != scope {
                return;
            }
            match result {
                Ok(rows) => {
                    projects.set(rows);
                    projects_error.set(None);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "project list failed");
                    projects.set(Vec::new());
                    projects_error.set(Some(format!("Aucun projet trouvé : {err}")));
                }
            }
            projects_loading.set(false);
        });
    });

    let rows = projects();
    let filter = project_filter();
    let scope = project_scope();
    let visible = filter.apply(&rows);
    let communes = distinct_communes(&rows);
    let facility_names = distinct_facilities(&rows);
    let title = match &scope {
        ProjectScope::All => "Toutes les opérations".to_string(),
        ProjectScope::Facility(id) => scope_facilities
            .read()
            .iter()
            .find(|facility| &facility.id == id)
            .map(|facility| format!("Projets - {}", facility.name))
            .unwrap_or_else(|| format!("Projets - Facilité {id}")),
    };
    let empty = empty_message(&scope, rows.len());
    let count_label = format!("{} / {} projets", visible.len(), rows.len());

    rsx! {
        div {
            style: "max-width: 1400px; margin: 0 auto;",
            h2 { style: "text-align: center; color: #15803d;", "{title}" }
            div {
                style: "display: flex; flex-wrap: wrap; gap: 8px; margin-bottom: 12px;",
                button {
                    style: if scope == ProjectScope::All { "border: 1px solid #15803d; background: #dcfce7; padding: 4px 10px; border-radius: 6px;" } else { "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;" },
                    onclick: move |_| project_scope.set(ProjectScope::All),
                    "Toutes les opérations"
                }
                for facility in scope_facilities() {
                    {
                        let target = ProjectScope::Facility(facility.id.clone());
                        let active = scope == target;
                        rsx! {
                            button {
                                key: "{facility.id}",
                                style: if active { "border: 1px solid #15803d; background: #dcfce7; padding: 4px 10px; border-radius: 6px;" } else { "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;" },
                                onclick: move |_| project_scope.set(target.clone()),
                                "{facility.name}"
                            }
                        }
                    }
                }
            }

            div {
                style: "display: flex; flex-wrap: wrap; gap: 8px; align-items: center; background: #fff; padding: 12px; border-radius: 8px; margin-bottom: 12px;",
                input {
                    r#type: "search",
                    placeholder: "Rechercher...",
                    value: "{filter.search}",
                    style: INPUT_STYLE,
                    oninput: move |evt| project_filter.write().search = evt.value(),
                }
                select {
                    style: INPUT_STYLE,
                    value: "{filter.commune.clone().unwrap_or_default()}",
                    onchange: move |evt| {
                        let value = evt.value();
                        project_filter.write().commune = (!value.is_empty()).then_some(value);
                    },
                    option { value: "", "Toutes les communes" }
                    for commune in communes {
                        option { key: "{commune}", value: "{commune}", "{commune}" }
                    }
                }
                select {
                    style: INPUT_STYLE,
                    value: "{filter.facility.clone().unwrap_or_default()}",
                    onchange: move |evt| {
                        let value = evt.value();
                        project_filter.write().facility = (!value.is_empty()).then_some(value);
                    },
                    option { value: "", "Toutes les facilités" }
                    for name in facility_names {
                        option { key: "{name}", value: "{name}", "{name}" }
                    }
                }
                input {
                    r#type: "text",
                    placeholder: "Promoteur",
                    value: "{filter.promoter}",
                    style: INPUT_STYLE,
                    oninput: move |evt| project_filter.write().promoter = evt.value(),
                }
                input {
                    r#type: "text",
                    placeholder: "Intitulé du projet",
                    value: "{filter.title}",
                    style: INPUT_STYLE,
                    oninput: move |evt| project_filter.write().title = evt.value(),
                }
                button {
                    disabled: filter.is_empty(),
                    style: "{BUTTON_STYLE} background: #374151;",
                    onclick: move |_| project_filter.set(Default::default()),
                    "Réinitialiser"
                }
                span { style: "margin-left: auto; color: #555;", "{count_label}" }
            }

            if projects_loading() {
                p { style: "text-align: center;", "Chargement des projets..." }
            } else if let Some(err) = projects_error() {
                p { style: ERROR_STYLE, "{err}" }
            } else if visible.is_empty() {
                div {
                    style: "background: #fff; padding: 24px; border-radius: 8px; text-align: center;",
                    p { style: "font-weight: 600;", "Aucun projet trouvé" }
                    p { style: "color: #666;", "{empty}" }
                }
            } else {
                div {
                    style: "{table_container_style()}",
                    table {
                        style: "min-width: 100%; border-collapse: collapse; font-size: 13px;",
                        thead {
                            tr {
                                for column in PROJECT_COLUMNS {
                                    th { key: "{column}", style: "{table_header_cell_style()}", "{column}" }
                                }
                            }
                        }
                        tbody {
                            for row in visible {
                                tr {
                                    key: "{row.id_projet}",
                                    for (col_idx, value) in row.columns().into_iter().enumerate() {
                                        td {
                                            key: "{col_idx}",
                                            style: if (3..=7).contains(&col_idx) { "padding: 6px 10px; border-top: 1px solid #e5e7eb; text-align: right; white-space: nowrap;" } else { "padding: 6px 10px; border-top: 1px solid #e5e7eb;" },
                                            "{value}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StatisticsPage() -> Element {
    let services = use_context::<Services>();
    let AppState {
        mut stats_start,
        mut stats_end,
        mut stats,
        mut stats_loading,
        mut stats_error,
        ..
    } = use_context::<AppState>();
    let backend_for_load = services.backend.clone();
    let sections = stats();

    rsx! {
        div {
            style: "max-width: 1200px; margin: 0 auto;",
            div {
                style: "background: #fff; padding: 16px; border-radius: 8px; text-align: center;",
                h3 { style: "margin-top: 0; color: #555;", "Filtrer par date de comité de validation" }
                div {
                    style: "display: flex; flex-wrap: wrap; justify-content: center; align-items: end; gap: 12px;",
                    label {
                        "Date de début "
                        input {
                            r#type: "date",
                            value: "{stats_start}",
                            style: INPUT_STYLE,
                            oninput: move |evt| stats_start.set(evt.value()),
                        }
                    }
                    label {
                        "Date de fin "
                        input {
                            r#type: "date",
                            value: "{stats_end}",
                            style: INPUT_STYLE,
                            oninput: move |evt| stats_end.set(evt.value()),
                        }
                    }
                    button {
                        disabled: stats_loading(),
                        style: "{BUTTON_STYLE} background: #16a34a;",
                        onclick: move |_| {
                            let range = match DateRange::parse(&stats_start(), &stats_end()) {
                                Ok(range) => range,
                                Err(err) => {
                                    stats_error.set(Some(err.to_string()));
                                    return;
                                }
                            };
                            let service = StatisticsService::new(backend_for_load.clone());
                            stats_error.set(None);
                            stats_loading.set(true);
                            spawn(async move {
                                match service.load_all(&range).await {
                                    Ok(loaded) => stats.set(loaded),
                                    Err(err) => {
                                        tracing::warn!(error = %err, "statistics load failed");
                                        stats_error.set(Some("Erreur de chargement des données.".to_string()));
                                    }
                                }
                                stats_loading.set(false);
                            });
                        },
                        "Appliquer"
                    }
                }
                if let Some(err) = stats_error() {
                    p { style: ERROR_STYLE, "{err}" }
                }
                if stats_loading() {
                    p { style: "color: #555;", "Chargement des données..." }
                }
            }
            for section in sections {
                StatsSectionView { key: "{section.dimension.key()}", section }
            }
        }
    }
}

#[component]
fn StatsSectionView(section: StatsSection) -> Element {
    let key = section.dimension.key();
    rsx! {
        div {
            style: "background: #fff; padding: 16px; border-radius: 8px; margin-top: 16px;",
            h2 { style: "text-align: center; color: #15803d;", "{section.dimension.title()}" }
            if section.is_empty() {
                p { style: "text-align: center; color: #666; font-style: italic;",
                    "Aucune donnée disponible pour la période sélectionnée."
                }
            } else {
                StatsTableView {
                    label: format!("Nombre de projets par {key}"),
                    key_label: key,
                    table: section.projects.clone(),
                    credits: false,
                }
                StatsTableView {
                    label: format!("Montant des crédits par {key}"),
                    key_label: key,
                    table: section.credits.clone(),
                    credits: true,
                }
            }
        }
    }
}

#[component]
fn StatsTableView(
    label: String,
    key_label: &'static str,
    table: StatsTable,
    credits: bool,
) -> Element {
    let fmt: fn(f64) -> String = if credits { format_fcfa } else { format_count };
    let rows: Vec<(String, Vec<String>, String)> = table
        .rows
        .iter()
        .map(|row| {
            let values = row.values.iter().map(|value| fmt(*value)).collect();
            (row.name.clone(), values, fmt(row.total))
        })
        .collect();
    let totals: Vec<String> = table.totals.iter().map(|value| fmt(*value)).collect();
    let grand_total = fmt(table.grand_total);

    rsx! {
        h3 { style: "color: #374151;", "{label}" }
        div {
            style: "{table_container_style()} margin-bottom: 16px;",
            table {
                style: "min-width: 100%; border-collapse: collapse; font-size: 14px;",
                thead {
                    tr {
                        th { style: "{table_header_cell_style()}", "{key_label}" }
                        for column in table.columns.iter() {
                            th { key: "{column}", style: "{table_header_cell_style()} text-align: right;", "{column}" }
                        }
                        th { style: "{table_header_cell_style()} text-align: right;", "Total" }
                    }
                }
                tbody {
                    for (idx, (name, values, total)) in rows.into_iter().enumerate() {
                        tr {
                            key: "{idx}",
                            td { style: "padding: 6px 10px;", "{name}" }
                            for (col_idx, value) in values.into_iter().enumerate() {
                                td { key: "{col_idx}", style: "padding: 6px 10px; text-align: right;", "{value}" }
                            }
                            td { style: "padding: 6px 10px; text-align: right; font-weight: 600; color: #15803d;", "{total}" }
                        }
                    }
                    tr {
                        style: "background: #f3f4f6; font-weight: 600;",
                        td { style: "padding: 6px 10px;", "Totaux" }
                        for (col_idx, value) in totals.into_iter().enumerate() {
                            td { key: "{col_idx}", style: "padding: 6px 10px; text-align: right;", "{value}" }
                        }
                        td { style: "padding: 6px 10px; text-align: right;", "{grand_total}" }
                    }
                }
            }
        }
    }
}

#[component]
fn FacilitiesPage() -> Element {
    let services = use_context::<Services>();
    let AppState {
        mut facility_records,
        mut facility_name,
        mut facility_message,
        mut deleting_facilities,
        ..
    } = use_context::<AppState>();

    let backend_for_load = services.backend.clone();
    use_effect(move || {
        let service = FacilityAdminService::new(backend_for_load.clone());
        spawn(async move {
            match service.list().await {
                Ok(records) => facility_records.set(records),
                Err(err) => {
                    tracing::warn!(error = %err, "facility records load failed");
                    facility_message.set(Some(format!("Erreur de chargement : {err}")));
                }
            }
        });
    });

    let backend_for_create = services.backend.clone();
    let backend_for_delete = services.backend.clone();

    rsx! {
        div {
            style: "max-width: 800px; margin: 0 auto;",
            h2 { style: "text-align: center; color: #15803d;", "Facilités" }
            div {
                style: "display: flex; gap: 8px; background: #fff; padding: 16px; border-radius: 8px;",
                input {
                    r#type: "text",
                    placeholder: "Nom de la facilité",
                    value: "{facility_name}",
                    style: "flex: 1; {INPUT_STYLE}",
                    oninput: move |evt| facility_name.set(evt.value()),
                }
                button {
                    style: "{BUTTON_STYLE} background: #16a34a;",
                    onclick: move |_| {
                        let name = facility_name();
                        let service = FacilityAdminService::new(backend_for_create.clone());
                        spawn(async move {
                            match service.create(&name).await {
                                Ok(records) => {
                                    facility_records.set(records);
                                    facility_name.set(String::new());
                                    facility_message.set(Some("Facilité ajoutée avec succès !".to_string()));
                                }
                                Err(err) => facility_message.set(Some(err.to_string())),
                            }
                        });
                    },
                    "Ajouter"
                }
            }
            if let Some(message) = facility_message() {
                p { style: "text-align: center;", "{message}" }
            }
            div {
                style: "{table_container_style()} margin-top: 12px;",
                table {
                    style: "width: 100%; border-collapse: collapse;",
                    thead {
                        tr {
                            th { style: "{table_header_cell_style()}", "Nom" }
                            th { style: "{table_header_cell_style()}", "Créée le" }
                            th { style: "{table_header_cell_style()}", "Auteur" }
                            th { style: "{table_header_cell_style()}", "" }
                        }
                    }
                    tbody {
                        for record in facility_records() {
                            {
                                let id = record.id.clone();
                                let busy = deleting_facilities.read().contains(&id);
                                let backend = backend_for_delete.clone();
                                rsx! {
                                    tr {
                                        key: "{record.id}",
                                        td { style: "padding: 8px 12px;", "{record.name}" }
                                        td { style: "padding: 8px 12px;", "{record.date_creation.clone().unwrap_or_default()}" }
                                        td { style: "padding: 8px 12px;", "{record.auteur.clone().unwrap_or_default()}" }
                                        td {
                                            style: "padding: 8px 12px; text-align: right;",
                                            button {
                                                disabled: busy,
                                                style: "{BUTTON_STYLE} background: #ef4444;",
                                                onclick: move |_| {
                                                    if deleting_facilities.read().contains(&id) {
                                                        return;
                                                    }
                                                    let confirm = MessageDialog::new()
                                                        .set_level(MessageLevel::Warning)
                                                        .set_title("Facilités")
                                                        .set_description("Voulez-vous vraiment supprimer cette facilité ?")
                                                        .set_buttons(MessageButtons::YesNo)
                                                        .show();
                                                    if confirm != MessageDialogResult::Yes {
                                                        return;
                                                    }
                                                    let service = FacilityAdminService::new(backend.clone());
                                                    let id = id.clone();
                                                    deleting_facilities.write().insert(id.clone());
                                                    spawn(async move {
                                                        match service.delete(&id).await {
                                                            Ok(()) => {
                                                                facility_records.write().retain(|r| r.id != id);
                                                                facility_message.set(Some("Facilité supprimée avec succès !".to_string()));
                                                            }
                                                            Err(err) => {
                                                                facility_message.set(Some(format!("Suppression impossible : {err}")));
                                                            }
                                                        }
                                                        deleting_facilities.write().remove(&id);
                                                    });
                                                },
                                                "Supprimer"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
