//! Read-only account lookups backing installation and OAuth user access.
//!
//! The account table is owned by the session subsystem; this crate only reads it. Two
//! contracts are exposed: [`AccountStore`] resolves the linked account (and its GitHub App
//! installation), while [`AccessTokenSource`] yields the stored OAuth access token.

#[cfg(feature = "sqlx")] pub mod sql;

pub mod memory;

pub use memory::MemoryAccountStore;
#[cfg(feature = "sqlx")] pub use sql::SqlAccountStore;

// self
use crate::{
	_prelude::*,
	auth::{InstallationId, ProviderId, TokenSecret, UserId},
};

/// Boxed future returned by account lookups.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Lookup contract for linked provider accounts.
pub trait AccountStore
where
	Self: Send + Sync,
{
	/// Fetches the account linked to `user` for `provider`, if any.
	fn find_account<'a>(
		&'a self,
		user: &'a UserId,
		provider: &'a ProviderId,
	) -> StoreFuture<'a, Option<AccountRecord>>;
}

/// Source of stored OAuth access tokens, keyed by user and provider.
pub trait AccessTokenSource
where
	Self: Send + Sync,
{
	/// Returns the stored access token for `user` at `provider`, if one exists.
	fn access_token<'a>(
		&'a self,
		user: &'a UserId,
		provider: &'a ProviderId,
	) -> StoreFuture<'a, Option<TokenSecret>>;
}

/// Linked account row as seen by this crate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
	/// Owning user.
	pub user_id: UserId,
	/// Provider the account is linked with.
	pub provider_id: ProviderId,
	/// GitHub App installation linked to the account, if the user installed the app.
	pub installation_id: Option<InstallationId>,
	/// OAuth access token stored at sign-in, if any.
	pub access_token: Option<TokenSecret>,
}
impl AccountRecord {
	/// Creates a record with no installation and no stored token.
	pub fn new(user_id: UserId, provider_id: ProviderId) -> Self {
		Self { user_id, provider_id, installation_id: None, access_token: None }
	}

	/// Attaches an installation identifier.
	pub fn with_installation(mut self, installation_id: InstallationId) -> Self {
		self.installation_id = Some(installation_id);

		self
	}

	/// Attaches a stored OAuth access token.
	pub fn with_access_token(mut self, token: impl Into<TokenSecret>) -> Self {
		self.access_token = Some(token.into());

		self
	}
}

/// Error type produced by [`AccountStore`] and [`AccessTokenSource`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// A stored row could not be decoded into an [`AccountRecord`].
	#[error("Malformed account row: {message}.")]
	Decode {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
