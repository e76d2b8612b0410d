pub mod account_service;
pub mod avatar_preview;
pub mod edit_service;
pub mod facility_admin;
pub mod history_service;
pub mod import_service;
pub mod import_session;
pub mod project_filter;
pub mod route_guard;
pub mod statistics;
pub mod submission;
