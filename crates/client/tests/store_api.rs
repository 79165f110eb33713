//! End-to-end tests driving [`ProjectStore`] against a live API server.
//!
//! Each test starts the real Axum router on an ephemeral port, seeds a user
//! directly in the database, and exercises the store over actual HTTP.

use std::sync::Arc;

use sqlx::SqlitePool;

use devtrack_api::auth::jwt::{generate_access_token, JwtConfig};
use devtrack_api::auth::password::hash_password;
use devtrack_api::config::ServerConfig;
use devtrack_api::state::AppState;
use devtrack_client::store::{ProjectStore, StoreError};
use devtrack_core::project::ProjectDraft;
use devtrack_db::models::user::CreateUser;
use devtrack_db::repositories::UserRepo;

/// Start the API server on an ephemeral port. Returns its base URL plus a
/// valid session token for a freshly seeded user.
async fn spawn_server(pool: SqlitePool) -> (String, String) {
    let password_hash = hash_password("test-password-123").expect("hashing should succeed");
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            email: "store@test.com".to_string(),
            password_hash,
            name: None,
        },
    )
    .await
    .expect("user creation should succeed");

    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            token_expiry_hours: 168,
        },
    };

    let token = generate_access_token(user.id, &user.email, &config.jwt)
        .expect("token generation should succeed");

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let app = axum::Router::new()
        .nest("/api", devtrack_api::routes::api_routes())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener
        .local_addr()
        .expect("listener should have an address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server should run");
    });

    (format!("http://{addr}"), token)
}

/// A draft carrying only a name.
fn named_draft(name: &str) -> ProjectDraft {
    ProjectDraft {
        name: Some(name.to_string()),
        ..ProjectDraft::default()
    }
}

/// The names in the cache, in order.
fn cached_names(store: &ProjectStore) -> Vec<String> {
    store.projects().iter().map(|p| p.name.clone()).collect()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_load_starts_empty(pool: SqlitePool) {
    let (base_url, token) = spawn_server(pool).await;
    let mut store = ProjectStore::new(base_url, token);

    assert!(store.is_loading(), "a new store starts in the loading state");

    store.load().await;

    assert!(!store.is_loading());
    assert!(store.projects().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_prepends_and_returns_id(pool: SqlitePool) {
    let (base_url, token) = spawn_server(pool).await;
    let mut store = ProjectStore::new(base_url, token);
    store.load().await;

    let first = store
        .add_project(&named_draft("first"))
        .await
        .expect("add should succeed");
    let second = store
        .add_project(&named_draft("second"))
        .await
        .expect("add should succeed");

    assert_ne!(first, second);
    assert_eq!(cached_names(&store), vec!["second", "first"]);

    // The cache agrees with a fresh server fetch.
    store.refetch().await;
    assert_eq!(cached_names(&store), vec!["second", "first"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_replaces_in_place(pool: SqlitePool) {
    let (base_url, token) = spawn_server(pool).await;
    let mut store = ProjectStore::new(base_url, token);
    store.load().await;

    let first = store
        .add_project(&named_draft("first"))
        .await
        .expect("add should succeed");
    store
        .add_project(&named_draft("second"))
        .await
        .expect("add should succeed");

    store
        .update_project(first, &named_draft("renamed"))
        .await
        .expect("update should succeed");

    // The updated entry keeps its position at the back of the list.
    assert_eq!(cached_names(&store), vec!["second", "renamed"]);
    assert_eq!(store.projects()[1].id, first);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_removes_entry(pool: SqlitePool) {
    let (base_url, token) = spawn_server(pool).await;
    let mut store = ProjectStore::new(base_url, token);
    store.load().await;

    let first = store
        .add_project(&named_draft("first"))
        .await
        .expect("add should succeed");
    store
        .add_project(&named_draft("second"))
        .await
        .expect("add should succeed");

    store
        .delete_project(first)
        .await
        .expect("delete should succeed");

    assert_eq!(cached_names(&store), vec!["second"]);

    // The server agrees.
    store.refetch().await;
    assert_eq!(cached_names(&store), vec!["second"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_load_failure_yields_empty_list(pool: SqlitePool) {
    let (base_url, token) = spawn_server(pool).await;

    // Seed one real project so the failure path demonstrably hides data.
    let mut good = ProjectStore::new(base_url.clone(), token);
    good.load().await;
    good.add_project(&named_draft("real"))
        .await
        .expect("add should succeed");

    let mut store = ProjectStore::new(base_url, "not-a-real-token".to_string());
    store.load().await;

    assert!(!store.is_loading(), "loading clears even on failure");
    assert!(store.projects().is_empty(), "a failed load yields an empty list");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_failed_mutation_leaves_cache_untouched(pool: SqlitePool) {
    let (base_url, token) = spawn_server(pool).await;
    let mut store = ProjectStore::new(base_url, token);
    store.load().await;

    store
        .add_project(&named_draft("only"))
        .await
        .expect("add should succeed");

    let err = store
        .update_project(999_999, &named_draft("nope"))
        .await
        .expect_err("updating a missing project must fail");
    assert!(
        matches!(err, StoreError::Api { status: 404, .. }),
        "expected a 404 error, got: {err}"
    );
    assert_eq!(cached_names(&store), vec!["only"]);

    let err = store
        .delete_project(999_999)
        .await
        .expect_err("deleting a missing project must fail");
    assert!(
        matches!(err, StoreError::Api { status: 404, .. }),
        "expected a 404 error, got: {err}"
    );
    assert_eq!(cached_names(&store), vec!["only"]);
}
