// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use github_auth_broker::{
	account::{AccountRecord, MemoryAccountStore, StoreError},
	auth::{InstallationId, ProviderId, Session, TokenSecret, UserId},
	error::{Error, IssuanceError},
	factory::GitHubAuthFactory,
	github::{AppTokenIssuer, CredentialKind, GitHubApi, InstallationTokenIssuer},
	http::ReqwestHttpClient,
	strategy::CredentialStrategy,
	url::Url,
};

const APP_KEY: &str = include_str!("fixtures/app-key.pem");
const PUBLIC_KEY: &str = "ghp_public_fixture";
const TOKEN_PATH: &str = "/app/installations/77/access_tokens";

fn api(server: &MockServer) -> GitHubApi {
	GitHubApi::new(
		Url::parse(&server.base_url()).expect("Mock server base URL should parse."),
		ReqwestHttpClient::default(),
	)
}

fn user(id: &str) -> UserId {
	UserId::new(id).expect("User identifier fixture should be valid.")
}

fn linked_account(id: &str) -> AccountRecord {
	AccountRecord::new(user(id), ProviderId::github())
		.with_installation(InstallationId::new(77).expect("Installation fixture should be valid."))
		.with_access_token("gho_user")
}

fn build_factory(
	server: &MockServer,
	store: &MemoryAccountStore,
	with_app: bool,
) -> GitHubAuthFactory {
	let api = api(server);
	let store = Arc::new(store.clone());
	let issuer = with_app.then(|| {
		let issuer = AppTokenIssuer::new(4242, APP_KEY, api.clone())
			.expect("App issuer should build from the fixture key.");

		Arc::new(issuer) as Arc<dyn InstallationTokenIssuer>
	});

	GitHubAuthFactory::new(api, TokenSecret::new(PUBLIC_KEY), store.clone(), store, issuer)
}

async fn mock_token_success(server: &MockServer) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.header_exists("authorization")
				.header("x-github-api-version", GitHubApi::API_VERSION);
			then.status(201).header("content-type", "application/json").body(
				"{\"token\":\"ghs_installation\",\"expires_at\":\"2026-10-19T13:00:00Z\"}",
			);
		})
		.await
}

#[tokio::test]
async fn anonymous_requests_fall_back_to_public_key() {
	let server = MockServer::start_async().await;
	let store = MemoryAccountStore::default();
	let factory = build_factory(&server, &store, true);
	let mock = mock_token_success(&server).await;

	assert!(factory.create_with_app(None).await.is_none());
	assert!(factory.create_with_oauth(None).await.is_none());
	assert!(factory.create_with_app(Some(&Session::anonymous())).await.is_none());

	let client = factory.create_best_effort(None).await;

	assert_eq!(client.credential_kind(), CredentialKind::PublicKey);
	assert_eq!(client.credential().secret.expose(), PUBLIC_KEY);

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn linked_installation_mints_token_and_wins_best_effort() {
	let server = MockServer::start_async().await;
	let store = MemoryAccountStore::default();
	let factory = build_factory(&server, &store, true);
	let mock = mock_token_success(&server).await;

	store.insert(linked_account("user-app"));

	let session = Session::for_user(user("user-app"));
	let client = factory
		.create_with_app(Some(&session))
		.await
		.expect("Installation strategy should apply to a linked account.");

	assert_eq!(client.credential_kind(), CredentialKind::Installation);
	assert_eq!(client.credential().secret.expose(), "ghs_installation");

	let best = factory.create_best_effort(Some(&session)).await;

	assert_eq!(best.credential_kind(), CredentialKind::Installation);

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn issuance_failure_degrades_to_oauth() {
	let server = MockServer::start_async().await;
	let store = MemoryAccountStore::default();
	let factory = build_factory(&server, &store, true);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(500)
				.header("content-type", "application/json")
				.body("{\"message\":\"Upstream exploded\"}");
		})
		.await;

	store.insert(linked_account("user-broken-app"));

	let session = Session::for_user(user("user-broken-app"));
	let outcome = factory.installation.resolve(Some(&session)).await;

	assert!(matches!(
		outcome.failure(),
		Some(Error::Api { status: 500, message }) if message == "Upstream exploded"
	));
	assert!(factory.create_with_app(Some(&session)).await.is_none());

	let best = factory.create_best_effort(Some(&session)).await;

	assert_eq!(best.credential_kind(), CredentialKind::OAuth);
	assert_eq!(best.credential().secret.expose(), "gho_user");

	mock.assert_calls_async(3).await;
}

#[tokio::test]
async fn linked_installation_without_app_config_is_a_failure() {
	let server = MockServer::start_async().await;
	let store = MemoryAccountStore::default();
	let factory = build_factory(&server, &store, false);

	store.insert(linked_account("user-no-app"));

	let session = Session::for_user(user("user-no-app"));
	let outcome = factory.installation.resolve(Some(&session)).await;

	assert!(matches!(outcome.failure(), Some(Error::Issuance(IssuanceError::AppNotConfigured))));
	assert_eq!(
		factory.create_best_effort(Some(&session)).await.credential_kind(),
		CredentialKind::OAuth
	);
}

#[tokio::test]
async fn store_failures_degrade_to_public_key() {
	let server = MockServer::start_async().await;
	let store = MemoryAccountStore::default();
	let factory = build_factory(&server, &store, true);
	let mock = mock_token_success(&server).await;

	store.insert(linked_account("user-db-down"));
	store.fail_with(StoreError::Backend { message: "connection refused".into() });

	let session = Session::for_user(user("user-db-down"));
	let outcome = factory.oauth.resolve(Some(&session)).await;

	assert!(matches!(outcome.failure(), Some(Error::Storage(StoreError::Backend { .. }))));
	assert!(factory.create_with_app(Some(&session)).await.is_none());
	assert!(factory.create_with_oauth(Some(&session)).await.is_none());
	assert_eq!(
		factory.create_best_effort(Some(&session)).await.credential_kind(),
		CredentialKind::PublicKey
	);

	mock.assert_calls_async(0).await;

	store.clear_failure();

	assert!(factory.create_with_oauth(Some(&session)).await.is_some());
}

#[tokio::test]
async fn accounts_without_installation_or_token_are_absent() {
	let server = MockServer::start_async().await;
	let store = MemoryAccountStore::default();
	let factory = build_factory(&server, &store, true);

	store.insert(AccountRecord::new(user("user-bare"), ProviderId::github()));
	store.insert(
		AccountRecord::new(user("user-empty-token"), ProviderId::github()).with_access_token(""),
	);
	store.insert(
		AccountRecord::new(
			user("user-other-provider"),
			ProviderId::new("gitlab").expect("Provider fixture should be valid."),
		)
		.with_access_token("glpat_token"),
	);

	for id in ["user-bare", "user-empty-token", "user-other-provider", "user-unknown"] {
		let session = Session::for_user(user(id));

		assert!(factory.installation.resolve(Some(&session)).await.is_absent());
		assert!(factory.oauth.resolve(Some(&session)).await.is_absent());
		assert_eq!(
			factory.create_best_effort(Some(&session)).await.credential_kind(),
			CredentialKind::PublicKey
		);
	}
}

#[tokio::test]
async fn stored_oauth_token_is_used_without_installation() {
	let server = MockServer::start_async().await;
	let store = MemoryAccountStore::default();
	let factory = build_factory(&server, &store, true);

	store.insert(
		AccountRecord::new(user("user-oauth"), ProviderId::github()).with_access_token("gho_only"),
	);

	let session = Session::for_user(user("user-oauth"));
	let client = factory
		.create_with_oauth(Some(&session))
		.await
		.expect("OAuth strategy should apply to a stored token.");

	assert_eq!(client.credential_kind(), CredentialKind::OAuth);
	assert_eq!(client.credential().secret.expose(), "gho_only");
	assert!(factory.create_with_app(Some(&session)).await.is_none());
}

#[tokio::test]
async fn direct_access_requires_session_token() {
	let server = MockServer::start_async().await;
	let factory = build_factory(&server, &MemoryAccountStore::default(), false);
	let err = factory
		.create_authenticated(&Session::for_user(user("user-direct")))
		.expect_err("Sessions without a token must be rejected.");

	assert!(matches!(err, Error::MissingAccessToken));
	assert!(matches!(
		factory.create_authenticated(&Session::anonymous().with_access_token("")),
		Err(Error::MissingAccessToken)
	));

	let session = Session::for_user(user("user-direct")).with_access_token("gho_direct");
	let client = factory
		.create_authenticated(&session)
		.expect("Sessions carrying a token should authenticate.");

	assert_eq!(client.credential_kind(), CredentialKind::SessionToken);
	assert_eq!(client.credential().secret.expose(), "gho_direct");
}

#[tokio::test]
async fn best_effort_chain_is_installation_then_oauth() {
	let server = MockServer::start_async().await;
	let factory = build_factory(&server, &MemoryAccountStore::default(), false);
	let chain = factory.chain();

	assert_eq!(chain.len(), 2);
	assert_eq!(format!("{chain:?}"), "[Installation, OAuth]");
}
