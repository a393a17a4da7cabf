//! Relational account store backed by a [`sqlx::AnyPool`].
//!
//! Postgres is the production target (`DATABASE_URL`); SQLite works for tests. The store only
//! issues `SELECT`s against the `account` table:
//!
//! | column            | type            |
//! |-------------------|-----------------|
//! | `user_id`         | text            |
//! | `provider_id`     | text            |
//! | `installation_id` | bigint, null    |
//! | `access_token`    | text, null      |

// crates.io
use sqlx::{
	AnyPool, Row,
	any::{AnyPoolOptions, AnyRow},
};
// self
use crate::{
	_prelude::*,
	account::{AccessTokenSource, AccountRecord, AccountStore, StoreError, StoreFuture},
	auth::{InstallationId, ProviderId, TokenSecret, UserId},
};

const FIND_ACCOUNT: &str = "SELECT user_id, provider_id, installation_id, access_token \
	FROM account WHERE user_id = $1 AND provider_id = $2 LIMIT 1";

/// Account store reading linked accounts from a SQL database.
#[derive(Clone, Debug)]
pub struct SqlAccountStore {
	pool: AnyPool,
}
impl SqlAccountStore {
	const DEFAULT_MAX_CONNECTIONS: u32 = 5;

	/// Connects to the database at `database_url`.
	pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
		sqlx::any::install_default_drivers();

		let pool = AnyPoolOptions::new()
			.max_connections(Self::DEFAULT_MAX_CONNECTIONS)
			.connect(database_url)
			.await
			.map_err(backend)?;

		tracing::debug!("Account store connection pool established.");

		Ok(Self { pool })
	}

	/// Wraps an existing pool.
	pub fn with_pool(pool: AnyPool) -> Self {
		Self { pool }
	}

	/// Returns the underlying pool.
	pub fn pool(&self) -> &AnyPool {
		&self.pool
	}

	async fn fetch_row(
		&self,
		user: &UserId,
		provider: &ProviderId,
	) -> Result<Option<AccountRecord>, StoreError> {
		let row = sqlx::query(FIND_ACCOUNT)
			.bind(user.as_ref())
			.bind(provider.as_ref())
			.fetch_optional(&self.pool)
			.await
			.map_err(backend)?;

		row.as_ref().map(decode_row).transpose()
	}
}
impl AccountStore for SqlAccountStore {
	fn find_account<'a>(
		&'a self,
		user: &'a UserId,
		provider: &'a ProviderId,
	) -> StoreFuture<'a, Option<AccountRecord>> {
		Box::pin(self.fetch_row(user, provider))
	}
}
impl AccessTokenSource for SqlAccountStore {
	fn access_token<'a>(
		&'a self,
		user: &'a UserId,
		provider: &'a ProviderId,
	) -> StoreFuture<'a, Option<TokenSecret>> {
		Box::pin(async move {
			Ok(self.fetch_row(user, provider).await?.and_then(|record| record.access_token))
		})
	}
}

fn decode_row(row: &AnyRow) -> Result<AccountRecord, StoreError> {
	let user_id: String = row.try_get("user_id").map_err(decode)?;
	let provider_id: String = row.try_get("provider_id").map_err(decode)?;
	let installation_id: Option<i64> = row.try_get("installation_id").map_err(decode)?;
	let access_token: Option<String> = row.try_get("access_token").map_err(decode)?;

	Ok(AccountRecord {
		user_id: UserId::new(user_id).map_err(decode)?,
		provider_id: ProviderId::new(provider_id).map_err(decode)?,
		installation_id: installation_id
			.map(InstallationId::try_from)
			.transpose()
			.map_err(decode)?,
		access_token: access_token.filter(|token| !token.is_empty()).map(TokenSecret::new),
	})
}

fn backend(e: sqlx::Error) -> StoreError {
	StoreError::Backend { message: e.to_string() }
}

fn decode(e: impl Display) -> StoreError {
	StoreError::Decode { message: e.to_string() }
}
