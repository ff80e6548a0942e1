//! User service integration tests against a migrated SQLite database.

mod common;

use notes_api::domain::{NewNote, NewUser, UserChanges, UserStatus};
use notes_api::errors::{AppError, AuthFailure, ConflictKind};
use notes_api::infra::{Persistence, UnitOfWork, UserRepository, UserStore};
use notes_api::with_transaction;

use common::TestApp;

fn note_for(user_id: i32, title: &str) -> NewNote {
    NewNote {
        title: title.to_string(),
        content: "body".to_string(),
        user_id,
    }
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_assigns_defaults_and_hashes_password() {
    let app = TestApp::spawn().await;

    let user = app
        .users
        .register("alice".into(), "alice@example.com".into(), "secret1".into())
        .await
        .unwrap();

    assert_eq!(user.role.to_string(), "user");
    assert_eq!(user.status, UserStatus::Active);
    assert!(user.password_hash.is_empty());

    // The stored digest is never the plaintext
    let stored = UserStore::new(app.database.get_connection())
        .find_by_id(user.id)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_hash, "secret1");
    assert!(stored.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_register_rejects_duplicates() {
    let app = TestApp::spawn().await;
    app.register("alice", "alice@example.com", "secret1").await;

    let same_email = app
        .users
        .register("bob".into(), "alice@example.com".into(), "secret1".into())
        .await;
    assert!(matches!(
        same_email,
        Err(AppError::Conflict(ConflictKind::EmailTaken))
    ));

    let same_username = app
        .users
        .register("alice".into(), "other@example.com".into(), "secret1".into())
        .await;
    assert!(matches!(
        same_username,
        Err(AppError::Conflict(ConflictKind::UsernameTaken))
    ));

    assert_eq!(app.users.list_users().await.unwrap().total, 1);
}

#[tokio::test]
async fn test_store_maps_unique_index_violations() {
    let app = TestApp::spawn().await;
    app.register("alice", "alice@example.com", "secret1").await;
    let store = UserStore::new(app.database.get_connection());

    // Bypasses the service pre-checks so only the unique indexes reject
    let same_email = store
        .create(NewUser {
            username: "bob".into(),
            email: "alice@example.com".into(),
            password_hash: "digest".into(),
        })
        .await;
    assert!(matches!(
        same_email,
        Err(AppError::Conflict(ConflictKind::EmailTaken))
    ));

    let same_username = store
        .create(NewUser {
            username: "alice".into(),
            email: "other@example.com".into(),
            password_hash: "digest".into(),
        })
        .await;
    assert!(matches!(
        same_username,
        Err(AppError::Conflict(ConflictKind::UsernameTaken))
    ));

    assert_eq!(store.list().await.unwrap().len(), 1);
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_authenticate_outcomes() {
    let app = TestApp::spawn().await;
    let id = app.register("alice", "alice@example.com", "secret1").await;

    let user = app
        .users
        .authenticate("alice@example.com".into(), "secret1".into())
        .await
        .unwrap();
    assert_eq!(user.id, id);
    assert!(user.password_hash.is_empty());

    let wrong = app
        .users
        .authenticate("alice@example.com".into(), "wrong-pass".into())
        .await;
    assert!(matches!(
        wrong,
        Err(AppError::Unauthorized(AuthFailure::InvalidCredentials))
    ));

    let unknown = app
        .users
        .authenticate("nobody@example.com".into(), "secret1".into())
        .await;
    assert!(matches!(
        unknown,
        Err(AppError::Unauthorized(AuthFailure::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_authenticate_rejects_inactive_account() {
    let app = TestApp::spawn().await;
    let id = app.register("alice", "alice@example.com", "secret1").await;

    app.users
        .update_user(
            id,
            UserChanges {
                status: Some(UserStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let result = app
        .users
        .authenticate("alice@example.com".into(), "secret1".into())
        .await;
    assert!(matches!(
        result,
        Err(AppError::Unauthorized(AuthFailure::InactiveAccount))
    ));
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_checks_uniqueness_against_other_users() {
    let app = TestApp::spawn().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    app.register("bob", "bob@example.com", "secret1").await;

    // Re-submitting one's own email is not a conflict
    let unchanged = app
        .users
        .update_user(
            alice,
            UserChanges {
                email: Some("alice@example.com".into()),
                username: Some("alicia".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(unchanged.username, "alicia");
    assert_eq!(unchanged.email, "alice@example.com");

    let taken = app
        .users
        .update_user(
            alice,
            UserChanges {
                email: Some("bob@example.com".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        taken,
        Err(AppError::Conflict(ConflictKind::EmailTaken))
    ));

    let username_taken = app
        .users
        .update_user(
            alice,
            UserChanges {
                username: Some("bob".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        username_taken,
        Err(AppError::Conflict(ConflictKind::UsernameTaken))
    ));
    assert_eq!(app.users.get_user(alice).await.unwrap().username, "alicia");

    let missing = app.users.update_user(999, UserChanges::default()).await;
    assert!(matches!(missing, Err(AppError::NotFound("User"))));
}

// =============================================================================
// Cascade delete
// =============================================================================

#[tokio::test]
async fn test_delete_user_removes_owned_notes_only() {
    let app = TestApp::spawn().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let bob = app.register("bob", "bob@example.com", "secret1").await;

    for title in ["one", "two", "three"] {
        app.notes.create_note(note_for(alice, title)).await.unwrap();
    }
    let kept = app.notes.create_note(note_for(bob, "kept")).await.unwrap();

    app.users.delete_user(alice).await.unwrap();

    assert!(matches!(
        app.users.get_user(alice).await,
        Err(AppError::NotFound("User"))
    ));
    let remaining = app.notes.list_notes().await.unwrap();
    assert_eq!(remaining.total, 1);
    assert_eq!(remaining.items[0].id, kept.id);
}

#[tokio::test]
async fn test_delete_user_without_notes() {
    let app = TestApp::spawn().await;
    let id = app.register("alice", "alice@example.com", "secret1").await;

    app.users.delete_user(id).await.unwrap();

    assert_eq!(app.users.list_users().await.unwrap().total, 0);
}

#[tokio::test]
async fn test_second_delete_reports_not_found() {
    let app = TestApp::spawn().await;
    let id = app.register("alice", "alice@example.com", "secret1").await;

    app.users.delete_user(id).await.unwrap();
    let again = app.users.delete_user(id).await;

    assert!(matches!(again, Err(AppError::NotFound("User"))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_deletes_yield_one_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("notes.db").display());
    let app = TestApp::spawn_on(&url, 10).await;

    for round in 0..20 {
        let id = app
            .register(
                &format!("user{}", round),
                &format!("user{}@example.com", round),
                "secret1",
            )
            .await;
        app.notes.create_note(note_for(id, "racing")).await.unwrap();

        let first = tokio::spawn({
            let users = app.users.clone();
            async move { users.delete_user(id).await }
        });
        let second = tokio::spawn({
            let users = app.users.clone();
            async move { users.delete_user(id).await }
        });
        let (first, second) = tokio::join!(first, second);
        let outcomes = [first.unwrap(), second.unwrap()];

        let deleted = outcomes.iter().filter(|r| r.is_ok()).count();
        let not_found = outcomes
            .iter()
            .filter(|r| matches!(r, Err(AppError::NotFound("User"))))
            .count();
        assert_eq!((deleted, not_found), (1, 1), "round {}: {:?}", round, outcomes);
    }

    assert_eq!(app.notes.list_notes().await.unwrap().total, 0);
    assert_eq!(app.users.list_users().await.unwrap().total, 0);
}

#[tokio::test]
async fn test_failed_transaction_rolls_back() {
    let app = TestApp::spawn().await;
    let id = app.register("alice", "alice@example.com", "secret1").await;
    app.notes.create_note(note_for(id, "keep me")).await.unwrap();

    let uow = Persistence::new(app.database.get_connection());
    let result = with_transaction!(uow, |tx| {
        tx.notes().delete_by_owner(id).await?;
        Err::<(), AppError>(AppError::internal("abort"))
    });

    assert!(result.is_err());
    assert_eq!(app.notes.list_notes().await.unwrap().total, 1);
}
