//! GitHub App installation access for users with a linked installation.

// self
use crate::{
	_prelude::*,
	account::AccountStore,
	auth::{ProviderId, Session, session},
	error::IssuanceError,
	github::{Credential, CredentialKind, GitHubApi, GitHubClient, InstallationTokenIssuer},
	obs::StrategyKind,
	strategy::{self, CredentialStrategy, StrategyFuture},
};

/// Access through the GitHub App installation linked to the user's account.
///
/// Applies only when the session has a user whose account record carries an installation id.
/// Without a configured issuer, a linked installation is reported as a failure so the gap shows
/// up in logs instead of silently falling through.
#[derive(Clone)]
pub struct InstallationAccess {
	api: GitHubApi,
	accounts: Arc<dyn AccountStore>,
	issuer: Option<Arc<dyn InstallationTokenIssuer>>,
	provider: ProviderId,
}
impl InstallationAccess {
	/// Creates the strategy for the `github` provider.
	pub fn new(
		api: GitHubApi,
		accounts: Arc<dyn AccountStore>,
		issuer: Option<Arc<dyn InstallationTokenIssuer>>,
	) -> Self {
		Self { api, accounts, issuer, provider: ProviderId::github() }
	}

	/// Overrides the provider the account lookup is keyed by.
	pub fn with_provider(mut self, provider: ProviderId) -> Self {
		self.provider = provider;

		self
	}

	async fn try_resolve(&self, session: Option<&Session>) -> Result<Option<GitHubClient>> {
		let Some(user) = session::session_user(session) else {
			return Ok(None);
		};
		let Some(account) = self.accounts.find_account(user, &self.provider).await? else {
			return Ok(None);
		};
		let Some(installation) = account.installation_id else {
			return Ok(None);
		};
		let issuer = self.issuer.as_ref().ok_or(IssuanceError::AppNotConfigured)?;

		tracing::info!(%installation, "Using GitHub App installation for authenticated user.");

		let token = issuer.issue(installation).await?;

		Ok(Some(self.api.client(Credential::new(CredentialKind::Installation, token.token))))
	}
}
impl CredentialStrategy for InstallationAccess {
	fn kind(&self) -> StrategyKind {
		StrategyKind::Installation
	}

	fn resolve<'a>(&'a self, session: Option<&'a Session>) -> StrategyFuture<'a> {
		Box::pin(strategy::observe(self.kind(), self.try_resolve(session)))
	}
}
impl Debug for InstallationAccess {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("InstallationAccess")
			.field("api", &self.api.base_url().as_str())
			.field("provider", &self.provider)
			.field("issuer_set", &self.issuer.is_some())
			.finish()
	}
}
