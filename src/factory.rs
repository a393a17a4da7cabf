//! Request-scoped entry point that assembles the credential strategies.
//!
//! [`GitHubAuthFactory`] is built once at startup from a validated [`Config`] and shared across
//! requests. Every `create_*` call produces a fresh [`GitHubClient`]; nothing is cached between
//! calls.

// self
use crate::{
	_prelude::*,
	account::{AccessTokenSource, AccountStore},
	auth::{Session, TokenSecret},
	config::Config,
	github::{AppTokenIssuer, GitHubApi, GitHubClient, InstallationTokenIssuer},
	strategy::{
		CredentialStrategy, DirectAccess, InstallationAccess, OAuthAccess, PublicAccess,
		StrategyChain,
	},
};

/// Facade exposing the public, installation, OAuth, direct, and best-effort strategies.
#[derive(Clone, Debug)]
pub struct GitHubAuthFactory {
	/// Anonymous access via the shared public key.
	pub public: Arc<PublicAccess>,
	/// GitHub App installation access.
	pub installation: Arc<InstallationAccess>,
	/// Stored OAuth token access.
	pub oauth: Arc<OAuthAccess>,
	/// Session-supplied token access.
	pub direct: DirectAccess,
}
impl GitHubAuthFactory {
	/// Assembles the strategies from explicit parts.
	pub fn new(
		api: GitHubApi,
		public_key: TokenSecret,
		accounts: Arc<dyn AccountStore>,
		tokens: Arc<dyn AccessTokenSource>,
		issuer: Option<Arc<dyn InstallationTokenIssuer>>,
	) -> Self {
		Self {
			public: Arc::new(PublicAccess::new(api.clone(), public_key)),
			installation: Arc::new(InstallationAccess::new(api.clone(), accounts, issuer)),
			oauth: Arc::new(OAuthAccess::new(api.clone(), tokens)),
			direct: DirectAccess::new(api),
		}
	}

	/// Builds the factory from configuration and a store that serves both account records and
	/// OAuth tokens.
	///
	/// The GitHub App issuer is wired only when `GITHUB_APP_ID` and `GITHUB_APP_PRIVATE_KEY`
	/// are configured.
	pub fn from_config<S>(config: &Config, store: Arc<S>) -> Result<Self>
	where
		S: 'static + AccountStore + AccessTokenSource,
	{
		let api = GitHubApi::from_config(config)?;
		let issuer = match &config.github_app {
			Some(app) => {
				let issuer = AppTokenIssuer::from_config(app, api.clone())?;

				tracing::debug!(app_id = issuer.app_id(), "GitHub App issuer configured.");

				Some(Arc::new(issuer) as Arc<dyn InstallationTokenIssuer>)
			},
			None => None,
		};

		Ok(Self::new(
			api,
			config.github_public_api_key.clone(),
			store.clone(),
			store,
			issuer,
		))
	}

	/// Returns a client bound to the public API key.
	pub fn create_public(&self) -> GitHubClient {
		self.public.client()
	}

	/// Returns an installation-token client, or `None` when it does not apply or fails.
	pub async fn create_with_app(&self, session: Option<&Session>) -> Option<GitHubClient> {
		self.installation.resolve(session).await.into_option()
	}

	/// Returns an OAuth-token client, or `None` when it does not apply or fails.
	pub async fn create_with_oauth(&self, session: Option<&Session>) -> Option<GitHubClient> {
		self.oauth.resolve(session).await.into_option()
	}

	/// Returns a client bound to the session's own access token.
	///
	/// Fails with [`Error::MissingAccessToken`] when the session carries none.
	pub fn create_authenticated(&self, session: &Session) -> Result<GitHubClient> {
		self.direct.authenticate(session)
	}

	/// Ordered user-scoped strategies tried before falling back to the public key.
	pub fn chain(&self) -> StrategyChain {
		StrategyChain::new().then(self.installation.clone()).then(self.oauth.clone())
	}

	/// Tries installation, then OAuth, then the public key. Always returns a client.
	pub async fn create_best_effort(&self, session: Option<&Session>) -> GitHubClient {
		match self.chain().resolve(session).await {
			Some(client) => client,
			None => self.create_public(),
		}
	}
}
