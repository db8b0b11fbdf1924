use contact_core::db::{open_db_in_memory, SCHEMA_VERSION};
use contact_core::{ContactRecord, ContactStore, RepoError, SqliteContactStore};
use rusqlite::Connection;

fn homer() -> ContactRecord {
    ContactRecord::new("Homer", "Simpson", "homer@gmail.com", "1234567890")
}

fn marge() -> ContactRecord {
    ContactRecord::new("Marge", "Simpson", "marge@gmail.com", "0987654321")
}

#[test]
fn add_assigns_id_and_get_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();

    let mut input = homer();
    input.id = 42;
    let stored = store.add(&input).unwrap();
    assert!(stored.id > 0);
    assert_ne!(stored.id, 42);

    let loaded = store.get_by_id(stored.id).unwrap().unwrap();
    assert_eq!(loaded, stored);
    assert_eq!(loaded.first_name, "Homer");
    assert_eq!(loaded.phone_number, "1234567890");
}

#[test]
fn list_all_is_empty_then_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();
    assert!(store.list_all().unwrap().is_empty());

    let first = store.add(&homer()).unwrap();
    let second = store.add(&marge()).unwrap();

    let all = store.list_all().unwrap();
    assert_eq!(all, vec![first, second]);
}

#[test]
fn get_missing_is_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();

    assert!(store.get_by_id(12345).unwrap().is_none());
    assert!(!store.exists(12345).unwrap());
}

#[test]
fn update_replaces_every_field() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();
    let stored = store.add(&homer()).unwrap();

    let replacement = ContactRecord::new("Homer J.", "Simpson", "homerj@gmail.com", "0987654321");
    store.update(stored.id, &replacement).unwrap();

    let loaded = store.get_by_id(stored.id).unwrap().unwrap();
    assert_eq!(loaded.id, stored.id);
    assert_eq!(loaded.first_name, "Homer J.");
    assert_eq!(loaded.email, "homerj@gmail.com");
    assert_eq!(loaded.phone_number, "0987654321");
}

#[test]
fn update_missing_row_is_conflict() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();

    let err = store.update(77, &homer()).unwrap_err();
    assert!(matches!(err, RepoError::Conflict(77)));
}

#[test]
fn remove_deletes_and_reports_missing() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();
    let stored = store.add(&homer()).unwrap();
    assert!(store.exists(stored.id).unwrap());

    store.remove(stored.id).unwrap();
    assert!(!store.exists(stored.id).unwrap());

    let err = store.remove(stored.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == stored.id));
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();

    let first = store.add(&homer()).unwrap();
    store.remove(first.id).unwrap();
    let second = store.add(&marge()).unwrap();

    assert!(second.id > first.id);
}

#[test]
fn validation_failure_blocks_add_and_update() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();

    let mut invalid = homer();
    invalid.email = "homer.at.gmail.com".to_string();
    assert!(matches!(
        store.add(&invalid).unwrap_err(),
        RepoError::Validation(_)
    ));
    assert!(store.list_all().unwrap().is_empty());

    let stored = store.add(&homer()).unwrap();
    assert!(matches!(
        store.update(stored.id, &invalid).unwrap_err(),
        RepoError::Validation(_)
    ));
    assert_eq!(store.get_by_id(stored.id).unwrap().unwrap(), stored);
}

#[test]
fn list_skips_invalid_persisted_row_and_get_reports_it() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteContactStore::try_new(&conn).unwrap();
    let good = store.add(&homer()).unwrap();
    conn.execute(
        "INSERT INTO contacts (first_name, last_name, email, phone_number)
         VALUES ('Moe', 'Szyslak', 'no-at-sign', '123');",
        [],
    )
    .unwrap();
    let bad_id = conn.last_insert_rowid();

    assert_eq!(store.list_all().unwrap(), vec![good]);
    assert!(matches!(
        store.get_by_id(bad_id).unwrap_err(),
        RepoError::InvalidData(_)
    ));
}

#[test]
fn store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteContactStore::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, SCHEMA_VERSION),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_contacts_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))
        .unwrap();

    assert!(matches!(
        SqliteContactStore::try_new(&conn),
        Err(RepoError::MissingRequiredTable("contacts"))
    ));
}
