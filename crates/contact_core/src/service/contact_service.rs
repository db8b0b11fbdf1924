//! Contact use-case service.
//!
//! # Responsibility
//! - Provide the five contact use-cases (list, get, create, update, delete).
//! - Reject invalid records before they reach the store.
//! - Map store outcomes to not-found, bad-request and server-fault results.
//!
//! # Invariants
//! - Validation always precedes the first store call on create and update.
//! - Update is a full replace; the path id wins over the payload id.
//! - Store failures other than absence are propagated, never swallowed.

use crate::model::contact::{ContactId, ContactRecord, ContactValidationError};
use crate::repo::contact_repo::{ContactStore, RepoError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Route prefix used to build `Location` references for created contacts.
pub const CONTACTS_PATH: &str = "/contacts";

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input record failed field validation.
    Validation(ContactValidationError),
    /// Target contact does not exist.
    NotFound(ContactId),
    /// Update raced with another writer and the row still exists.
    Conflict(RepoError),
    /// Unexpected persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    /// HTTP status code for this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) | Self::Repo(_) => 500,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "Contact record with ID {id} not found."),
            Self::Conflict(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Conflict(err) | Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// A freshly stored contact plus the path that reads it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedContact {
    pub record: ContactRecord,
    pub location: String,
}

/// Builds the read-by-id path for a contact.
pub fn contact_location(id: ContactId) -> String {
    format!("{CONTACTS_PATH}/{id}")
}

/// Contact service facade over a store implementation.
pub struct ContactService<S: ContactStore> {
    store: S,
}

impl<S: ContactStore> ContactService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists every contact in insertion order.
    pub fn list_contacts(&self) -> ServiceResult<Vec<ContactRecord>> {
        self.store.list_all().map_err(log_store_failure("list"))
    }

    /// Gets one contact by id.
    pub fn get_contact(&self, id: ContactId) -> ServiceResult<ContactRecord> {
        self.store
            .get_by_id(id)
            .map_err(log_store_failure("get"))?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Validates and stores a new contact.
    pub fn create_contact(&self, contact: &ContactRecord) -> ServiceResult<CreatedContact> {
        validate_input("create", contact)?;

        let record = self.store.add(contact).map_err(log_store_failure("create"))?;
        info!(
            "event=contact_create module=service status=ok contact_id={}",
            record.id
        );
        Ok(CreatedContact {
            location: contact_location(record.id),
            record,
        })
    }

    /// Replaces every field of the contact at `id`.
    ///
    /// A store conflict is re-checked against existence: a missing row is
    /// `NotFound`, a present row propagates the conflict unchanged.
    pub fn update_contact(&self, id: ContactId, mut contact: ContactRecord) -> ServiceResult<()> {
        validate_input("update", &contact)?;
        contact.id = id;

        match self.store.update(id, &contact) {
            Ok(()) => {
                info!("event=contact_update module=service status=ok contact_id={id}");
                Ok(())
            }
            Err(RepoError::Conflict(conflict_id)) => {
                if !self.store.exists(id).map_err(log_store_failure("update"))? {
                    info!(
                        "event=contact_update module=service status=rejected contact_id={id} reason=not_found"
                    );
                    return Err(ServiceError::NotFound(id));
                }
                error!(
                    "event=contact_update module=service status=error contact_id={id} error_code=write_conflict"
                );
                Err(ServiceError::Conflict(RepoError::Conflict(conflict_id)))
            }
            Err(err) => Err(log_store_failure("update")(err)),
        }
    }

    /// Deletes the contact at `id`.
    pub fn delete_contact(&self, id: ContactId) -> ServiceResult<()> {
        if self
            .store
            .get_by_id(id)
            .map_err(log_store_failure("delete"))?
            .is_none()
        {
            return Err(ServiceError::NotFound(id));
        }

        self.store.remove(id).map_err(log_store_failure("delete"))?;
        info!("event=contact_delete module=service status=ok contact_id={id}");
        Ok(())
    }
}

fn validate_input(operation: &'static str, contact: &ContactRecord) -> ServiceResult<()> {
    contact.validate().map_err(|err| {
        info!(
            "event=contact_{operation} module=service status=rejected reason=validation error={err}"
        );
        ServiceError::Validation(err)
    })
}

fn log_store_failure(operation: &'static str) -> impl Fn(RepoError) -> ServiceError {
    move |err| {
        let mapped = ServiceError::from(err);
        if let ServiceError::Repo(inner) = &mapped {
            warn!("event=contact_{operation} module=service status=error error={inner}");
        }
        mapped
    }
}
