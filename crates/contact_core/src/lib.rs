//! Core domain logic for the contact manager.
//! This crate owns contact validation, persistence and use-case rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{ContactId, ContactRecord, ContactValidationError, PHONE_NUMBER_LEN};
pub use repo::contact_repo::{ContactStore, RepoError, RepoResult, SqliteContactStore};
pub use service::contact_service::{
    contact_location, ContactService, CreatedContact, ServiceError, ServiceResult, CONTACTS_PATH,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
