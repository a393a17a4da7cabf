//! Anonymous access with the shared public API key.

// self
use crate::{
	auth::{Session, TokenSecret},
	github::{Credential, CredentialKind, GitHubApi, GitHubClient},
	obs::{self, StrategyKind, StrategyOutcome},
	strategy::{CredentialOutcome, CredentialStrategy, StrategyFuture},
};

/// Anonymous access through the shared public API key. Always applies.
#[derive(Clone, Debug)]
pub struct PublicAccess {
	api: GitHubApi,
	key: TokenSecret,
}
impl PublicAccess {
	/// Creates the strategy for the provided API and key.
	pub fn new(api: GitHubApi, key: TokenSecret) -> Self {
		Self { api, key }
	}

	/// Builds a client bound to the public key.
	pub fn client(&self) -> GitHubClient {
		tracing::info!("Using public GitHub API key.");
		obs::record_strategy_outcome(StrategyKind::Public, StrategyOutcome::Found);

		self.api.client(Credential::new(CredentialKind::PublicKey, self.key.clone()))
	}
}
impl CredentialStrategy for PublicAccess {
	fn kind(&self) -> StrategyKind {
		StrategyKind::Public
	}

	fn resolve<'a>(&'a self, _session: Option<&'a Session>) -> StrategyFuture<'a> {
		Box::pin(async move { CredentialOutcome::Found(self.client()) })
	}
}
