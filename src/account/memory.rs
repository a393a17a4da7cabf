//! Thread-safe in-memory account store for local development and tests.

// self
use crate::{
	_prelude::*,
	account::{AccessTokenSource, AccountRecord, AccountStore, StoreError, StoreFuture},
	auth::{ProviderId, TokenSecret, UserId},
};

type AccountMap = Arc<RwLock<HashMap<(UserId, ProviderId), AccountRecord>>>;

/// In-process account table.
///
/// [`MemoryAccountStore::fail_with`] makes every subsequent lookup return the provided error,
/// which lets callers exercise the degrade-to-absence path without a real database.
#[derive(Clone, Debug, Default)]
pub struct MemoryAccountStore {
	accounts: AccountMap,
	failure: Arc<RwLock<Option<StoreError>>>,
}
impl MemoryAccountStore {
	/// Inserts or replaces an account keyed by its user and provider.
	pub fn insert(&self, record: AccountRecord) {
		let key = (record.user_id.clone(), record.provider_id.clone());

		self.accounts.write().insert(key, record);
	}

	/// Forces every lookup to fail with `error` until [`MemoryAccountStore::clear_failure`].
	pub fn fail_with(&self, error: StoreError) {
		*self.failure.write() = Some(error);
	}

	/// Restores normal lookups.
	pub fn clear_failure(&self) {
		*self.failure.write() = None;
	}

	fn lookup_now(
		&self,
		user: &UserId,
		provider: &ProviderId,
	) -> Result<Option<AccountRecord>, StoreError> {
		if let Some(error) = self.failure.read().clone() {
			return Err(error);
		}

		Ok(self.accounts.read().get(&(user.clone(), provider.clone())).cloned())
	}
}
impl AccountStore for MemoryAccountStore {
	fn find_account<'a>(
		&'a self,
		user: &'a UserId,
		provider: &'a ProviderId,
	) -> StoreFuture<'a, Option<AccountRecord>> {
		Box::pin(async move { self.lookup_now(user, provider) })
	}
}
impl AccessTokenSource for MemoryAccountStore {
	fn access_token<'a>(
		&'a self,
		user: &'a UserId,
		provider: &'a ProviderId,
	) -> StoreFuture<'a, Option<TokenSecret>> {
		Box::pin(async move {
			Ok(self.lookup_now(user, provider)?.and_then(|record| record.access_token))
		})
	}
}
