pub mod account;
pub mod dataset;
pub mod edit;
pub mod facility;
pub mod history;
pub mod project;
pub mod session;
pub mod statistics;
