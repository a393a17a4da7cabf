#![cfg(feature = "sqlx")]

// self
use github_auth_broker::{
	account::{AccessTokenSource, AccountStore, SqlAccountStore, StoreError},
	auth::{InstallationId, ProviderId, UserId},
	sqlx::{self, any::AnyPoolOptions},
};

const SCHEMA: &str = "CREATE TABLE account (\
	user_id TEXT NOT NULL, \
	provider_id TEXT NOT NULL, \
	installation_id BIGINT, \
	access_token TEXT)";
const SEED: [&str; 4] = [
	"INSERT INTO account VALUES ('user-linked', 'github', 77, 'gho_linked')",
	"INSERT INTO account VALUES ('user-oauth', 'github', NULL, 'gho_oauth')",
	"INSERT INTO account VALUES ('user-empty', 'github', NULL, '')",
	"INSERT INTO account VALUES ('user-corrupt', 'github', -5, NULL)",
];

async fn seeded_store() -> SqlAccountStore {
	sqlx::any::install_default_drivers();

	let pool = AnyPoolOptions::new()
		.max_connections(1)
		.idle_timeout(None)
		.max_lifetime(None)
		.connect("sqlite::memory:")
		.await
		.expect("In-memory SQLite pool should open.");

	sqlx::query(SCHEMA).execute(&pool).await.expect("Account table should be created.");

	for statement in SEED {
		sqlx::query(statement).execute(&pool).await.expect("Seed row should insert.");
	}

	SqlAccountStore::with_pool(pool)
}

fn user(id: &str) -> UserId {
	UserId::new(id).expect("User identifier fixture should be valid.")
}

#[tokio::test]
async fn finds_linked_account_with_installation() {
	let store = seeded_store().await;
	let record = store
		.find_account(&user("user-linked"), &ProviderId::github())
		.await
		.expect("Lookup should succeed.")
		.expect("Linked account should exist.");

	assert_eq!(
		record.installation_id,
		Some(InstallationId::new(77).expect("Installation fixture should be valid."))
	);
	assert_eq!(record.access_token.as_ref().map(|token| token.expose()), Some("gho_linked"));
}

#[tokio::test]
async fn access_tokens_ignore_missing_and_empty_values() {
	let store = seeded_store().await;
	let github = ProviderId::github();
	let token = store
		.access_token(&user("user-oauth"), &github)
		.await
		.expect("Lookup should succeed.")
		.expect("Stored token should exist.");

	assert_eq!(token.expose(), "gho_oauth");

	for id in ["user-empty", "user-missing"] {
		let token = store.access_token(&user(id), &github).await.expect("Lookup should succeed.");

		assert!(token.is_none());
	}

	let gitlab = ProviderId::new("gitlab").expect("Provider fixture should be valid.");
	let other =
		store.find_account(&user("user-linked"), &gitlab).await.expect("Lookup should succeed.");

	assert!(other.is_none());
}

#[tokio::test]
async fn invalid_rows_surface_decode_errors() {
	let store = seeded_store().await;
	let err = store
		.find_account(&user("user-corrupt"), &ProviderId::github())
		.await
		.expect_err("Negative installation identifiers must be rejected.");

	assert!(matches!(err, StoreError::Decode { .. }));
}

#[tokio::test]
async fn missing_table_surfaces_backend_error() {
	let store =
		SqlAccountStore::connect("sqlite::memory:").await.expect("SQLite pool should open.");
	let err = store
		.find_account(&user("user-linked"), &ProviderId::github())
		.await
		.expect_err("Queries against a missing table must fail.");

	assert!(matches!(err, StoreError::Backend { .. }));
}
