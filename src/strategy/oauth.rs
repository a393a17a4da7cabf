//! OAuth user access with the token stored at sign-in.

// self
use crate::{
	_prelude::*,
	account::AccessTokenSource,
	auth::{ProviderId, Session, session},
	github::{Credential, CredentialKind, GitHubApi, GitHubClient},
	obs::StrategyKind,
	strategy::{self, CredentialStrategy, StrategyFuture},
};

/// Access through the OAuth token stored for the user at sign-in.
#[derive(Clone)]
pub struct OAuthAccess {
	api: GitHubApi,
	tokens: Arc<dyn AccessTokenSource>,
	provider: ProviderId,
}
impl OAuthAccess {
	/// Creates the strategy for the `github` provider.
	pub fn new(api: GitHubApi, tokens: Arc<dyn AccessTokenSource>) -> Self {
		Self { api, tokens, provider: ProviderId::github() }
	}

	/// Overrides the provider the token lookup is keyed by.
	pub fn with_provider(mut self, provider: ProviderId) -> Self {
		self.provider = provider;

		self
	}

	async fn try_resolve(&self, session: Option<&Session>) -> Result<Option<GitHubClient>> {
		let Some(user) = session::session_user(session) else {
			return Ok(None);
		};
		let Some(token) = self
			.tokens
			.access_token(user, &self.provider)
			.await?
			.filter(|token| !token.is_empty())
		else {
			return Ok(None);
		};

		tracing::info!("Using OAuth token for authenticated user.");

		Ok(Some(self.api.client(Credential::new(CredentialKind::OAuth, token))))
	}
}
impl CredentialStrategy for OAuthAccess {
	fn kind(&self) -> StrategyKind {
		StrategyKind::OAuth
	}

	fn resolve<'a>(&'a self, session: Option<&'a Session>) -> StrategyFuture<'a> {
		Box::pin(strategy::observe(self.kind(), self.try_resolve(session)))
	}
}
impl Debug for OAuthAccess {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthAccess")
			.field("api", &self.api.base_url().as_str())
			.field("provider", &self.provider)
			.finish()
	}
}
