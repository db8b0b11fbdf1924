//! Domain model for the contacts database.
//!
//! # Invariants
//! - Every contact is identified by a store-assigned `ContactId`.
//! - A record is validated before it is ever written.

pub mod contact;
