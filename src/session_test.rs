use super::*;
use crate::storage::{KeyValueStore, MemoryStorage};

#[test]
fn new_store_has_no_token() {
    let session = SessionStore::new(MemoryStorage::shared());
    assert!(!session.has_token());
    assert_eq!(session.token(), None);
}

#[test]
fn set_then_clear_token() {
    let session = SessionStore::new(MemoryStorage::shared());
    session.set_token("tok-1");
    assert!(session.has_token());
    assert_eq!(session.token().as_deref(), Some("tok-1"));

    session.clear_token();
    assert!(!session.has_token());
}

#[test]
fn token_lives_under_fixed_key() {
    let store = MemoryStorage::shared();
    SessionStore::new(store.clone()).set_token("tok-2");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-2"));
}

#[test]
fn clones_share_the_same_storage() {
    let a = SessionStore::new(MemoryStorage::shared());
    let b = a.clone();
    a.set_token("shared");
    assert_eq!(b.token().as_deref(), Some("shared"));
}

#[test]
fn empty_stored_token_counts_as_absent() {
    let store = MemoryStorage::shared();
    store.set(TOKEN_KEY, "").unwrap();
    assert!(!SessionStore::new(store).has_token());
}

#[test]
fn debug_output_hides_token() {
    let session = SessionStore::new(MemoryStorage::shared());
    session.set_token("secret-value");
    let debug = format!("{session:?}");
    assert!(!debug.contains("secret-value"));
    assert!(debug.contains("has_token: true"));
}
