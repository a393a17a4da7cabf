//! Direct access with the token already attached to the session.

// self
use crate::{
	_prelude::*,
	auth::Session,
	github::{Credential, CredentialKind, GitHubApi, GitHubClient},
	obs::{self, StrategyKind, StrategyOutcome},
};

/// Access through a token already attached to the session.
///
/// Unlike the other strategies there is no fallback: a missing token is an error.
#[derive(Clone, Debug)]
pub struct DirectAccess {
	api: GitHubApi,
}
impl DirectAccess {
	/// Creates the strategy for the provided API.
	pub fn new(api: GitHubApi) -> Self {
		Self { api }
	}

	/// Builds a client from `session.access_token`, failing with [`Error::MissingAccessToken`].
	pub fn authenticate(&self, session: &Session) -> Result<GitHubClient> {
		obs::record_strategy_outcome(StrategyKind::Direct, StrategyOutcome::Attempt);

		let Some(token) = session.access_token.as_ref().filter(|token| !token.is_empty()) else {
			obs::record_strategy_outcome(StrategyKind::Direct, StrategyOutcome::Failed);

			return Err(Error::MissingAccessToken);
		};

		obs::record_strategy_outcome(StrategyKind::Direct, StrategyOutcome::Found);

		Ok(self.api.client(Credential::new(CredentialKind::SessionToken, token.clone())))
	}
}
