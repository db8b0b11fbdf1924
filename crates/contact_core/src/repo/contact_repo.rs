//! Contact Store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and existence checks over the `contacts` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `add` ignores the payload id; SQLite `AUTOINCREMENT` assigns it.
//! - `update` affecting zero rows is a `Conflict`, resolved by the caller.
//! - Invalid persisted rows are skipped (and logged) by `list_all`, and
//!   reported as `InvalidData` by `get_by_id`.

use crate::db::{schema_version, DbError, SCHEMA_VERSION};
use crate::model::contact::{ContactId, ContactRecord, ContactValidationError};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email,
    phone_number
FROM contacts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    NotFound(ContactId),
    /// Write touched no row: the target changed or vanished after the
    /// caller last observed it.
    Conflict(ContactId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::Conflict(id) => write!(f, "contact {id} was modified concurrently"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Contact Store contract.
pub trait ContactStore {
    fn list_all(&self) -> RepoResult<Vec<ContactRecord>>;
    fn get_by_id(&self, id: ContactId) -> RepoResult<Option<ContactRecord>>;
    fn add(&self, contact: &ContactRecord) -> RepoResult<ContactRecord>;
    fn update(&self, id: ContactId, contact: &ContactRecord) -> RepoResult<()>;
    fn remove(&self, id: ContactId) -> RepoResult<()>;
    fn exists(&self, id: ContactId) -> RepoResult<bool>;
}

/// SQLite-backed contact store borrowing a request-scoped connection.
pub struct SqliteContactStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactStore<'conn> {
    /// Wraps a connection after checking that the schema was bootstrapped.
    ///
    /// Use `db::open_db` or `db::open_db_in_memory` to obtain one.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = SCHEMA_VERSION;
        let actual_version = schema_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let has_table: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'contacts'
            );",
            [],
            |row| row.get(0),
        )?;
        if !has_table {
            return Err(RepoError::MissingRequiredTable("contacts"));
        }

        Ok(Self { conn })
    }
}

impl ContactStore for SqliteContactStore<'_> {
    fn list_all(&self) -> RepoResult<Vec<ContactRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            match parse_contact_row(row) {
                Ok(contact) => contacts.push(contact),
                Err(RepoError::InvalidData(message)) => {
                    warn!(
                        "event=contact_list module=repo status=skipped reason=invalid_row error={message}"
                    );
                }
                Err(err) => return Err(err),
            }
        }

        Ok(contacts)
    }

    fn get_by_id(&self, id: ContactId) -> RepoResult<Option<ContactRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn add(&self, contact: &ContactRecord) -> RepoResult<ContactRecord> {
        contact.validate()?;

        self.conn.execute(
            "INSERT INTO contacts (
                first_name,
                last_name,
                email,
                phone_number
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                contact.first_name.as_str(),
                contact.last_name.as_str(),
                contact.email.as_str(),
                contact.phone_number.as_str(),
            ],
        )?;

        Ok(ContactRecord {
            id: self.conn.last_insert_rowid(),
            ..contact.clone()
        })
    }

    fn update(&self, id: ContactId, contact: &ContactRecord) -> RepoResult<()> {
        contact.validate()?;

        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                first_name = ?1,
                last_name = ?2,
                email = ?3,
                phone_number = ?4
             WHERE id = ?5;",
            params![
                contact.first_name.as_str(),
                contact.last_name.as_str(),
                contact.email.as_str(),
                contact.phone_number.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::Conflict(id));
        }

        Ok(())
    }

    fn remove(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn exists(&self, id: ContactId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM contacts WHERE id = ?1;", [id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<ContactRecord> {
    let contact = ContactRecord {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        phone_number: row.get("phone_number")?,
    };
    contact.validate().map_err(|err| {
        RepoError::InvalidData(format!("contacts row {}: {err}", contact.id))
    })?;
    Ok(contact)
}
