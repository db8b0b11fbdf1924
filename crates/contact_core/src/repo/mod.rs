//! Repository layer for contact persistence.
//!
//! # Responsibility
//! - Define the Contact Store contract used by the service layer.
//! - Isolate SQLite query details from validation and HTTP mapping.
//!
//! # Invariants
//! - Write paths enforce `ContactRecord::validate()` before persistence.
//! - Absence on lookup is `None`, not an error; absence on write is a
//!   semantic error (`NotFound` or `Conflict`).

pub mod contact_repo;
