//! Note service integration tests against a migrated SQLite database.

mod common;

use serde_json::{json, Map, Value};

use notes_api::domain::{NewNote, NoteChanges};
use notes_api::errors::{AppError, ValidationFailure};
use notes_api::infra::{NoteRepository, NoteStore};

use common::TestApp;

fn new_note(user_id: i32) -> NewNote {
    NewNote {
        title: "Groceries".to_string(),
        content: "milk, eggs".to_string(),
        user_id,
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

#[tokio::test]
async fn test_create_note_loads_owner_without_password() {
    let app = TestApp::spawn().await;
    let owner = app.register("alice", "alice@example.com", "secret1").await;

    let note = app.notes.create_note(new_note(owner)).await.unwrap();

    assert_eq!(note.user_id, owner);
    let loaded = note.owner.expect("owner is eager-loaded");
    assert_eq!(loaded.username, "alice");
    assert!(loaded.password_hash.is_empty());
}

#[tokio::test]
async fn test_create_note_unknown_owner_persists_nothing() {
    let app = TestApp::spawn().await;

    let result = app.notes.create_note(new_note(999)).await;

    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationFailure::UnknownOwner))
    ));
    assert_eq!(app.notes.list_notes().await.unwrap().total, 0);
}

#[tokio::test]
async fn test_store_maps_foreign_key_violation_to_unknown_owner() {
    let app = TestApp::spawn().await;
    let owner = app.register("alice", "alice@example.com", "secret1").await;
    let store = NoteStore::new(app.database.get_connection());

    let orphan = store.create(new_note(999)).await;
    assert!(matches!(
        orphan,
        Err(AppError::Validation(ValidationFailure::UnknownOwner))
    ));

    let note = store.create(new_note(owner)).await.unwrap();
    let repointed = store
        .update(
            note.id,
            NoteChanges {
                user_id: Some(999),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        repointed,
        Err(AppError::Validation(ValidationFailure::UnknownOwner))
    ));
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_note_moves_to_other_owner() {
    let app = TestApp::spawn().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let bob = app.register("bob", "bob@example.com", "secret1").await;
    let note = app.notes.create_note(new_note(alice)).await.unwrap();

    let moved = app
        .notes
        .update_note(
            note.id,
            NoteChanges {
                user_id: Some(bob),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.user_id, bob);
    assert_eq!(moved.title, "Groceries");
    assert_eq!(moved.owner.map(|o| o.username).as_deref(), Some("bob"));

    let bad_owner = app
        .notes
        .update_note(
            note.id,
            NoteChanges {
                user_id: Some(999),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        bad_owner,
        Err(AppError::Validation(ValidationFailure::UnknownOwner))
    ));
    assert_eq!(app.notes.get_note(note.id).await.unwrap().user_id, bob);
}

#[tokio::test]
async fn test_patch_note_changes_only_supplied_fields() {
    let app = TestApp::spawn().await;
    let owner = app.register("alice", "alice@example.com", "secret1").await;
    let note = app.notes.create_note(new_note(owner)).await.unwrap();

    let patched = app
        .notes
        .patch_note(note.id, object(json!({ "content": "" })))
        .await
        .unwrap();

    assert_eq!(patched.title, "Groceries");
    assert_eq!(patched.content, "");
    assert_eq!(patched.user_id, owner);
}

#[tokio::test]
async fn test_patch_note_rejects_fields_outside_allow_list() {
    let app = TestApp::spawn().await;
    let owner = app.register("alice", "alice@example.com", "secret1").await;
    let note = app.notes.create_note(new_note(owner)).await.unwrap();

    let result = app
        .notes
        .patch_note(note.id, object(json!({ "id": 42, "title": "Hijack" })))
        .await;

    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationFailure::UnknownField(ref f))) if f == "id"
    ));
    let unchanged = app.notes.get_note(note.id).await.unwrap();
    assert_eq!(unchanged.title, "Groceries");
}

#[tokio::test]
async fn test_patch_missing_note_is_not_found_before_validation() {
    let app = TestApp::spawn().await;

    let result = app
        .notes
        .patch_note(5, object(json!({ "bogus": true })))
        .await;

    assert!(matches!(result, Err(AppError::NotFound("Note"))));
}

#[tokio::test]
async fn test_list_notes_by_owner() {
    let app = TestApp::spawn().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let bob = app.register("bob", "bob@example.com", "secret1").await;
    app.notes.create_note(new_note(alice)).await.unwrap();
    app.notes.create_note(new_note(alice)).await.unwrap();
    app.notes.create_note(new_note(bob)).await.unwrap();

    let (owner, listing) = app.notes.list_notes_by_owner(alice).await.unwrap();
    assert_eq!(owner.username, "alice");
    assert_eq!(listing.total, 2);
    assert!(listing.items.iter().all(|n| n.user_id == alice));

    let missing = app.notes.list_notes_by_owner(999).await;
    assert!(matches!(missing, Err(AppError::NotFound("User"))));
}

#[tokio::test]
async fn test_delete_note_twice() {
    let app = TestApp::spawn().await;
    let owner = app.register("alice", "alice@example.com", "secret1").await;
    let note = app.notes.create_note(new_note(owner)).await.unwrap();

    app.notes.delete_note(note.id).await.unwrap();

    assert!(matches!(
        app.notes.delete_note(note.id).await,
        Err(AppError::NotFound("Note"))
    ));
    assert!(matches!(
        app.notes.get_note(note.id).await,
        Err(AppError::NotFound("Note"))
    ));
}
