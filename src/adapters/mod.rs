//! External integrations: the source feed and the import API.

pub mod feed;
pub mod import_api;
