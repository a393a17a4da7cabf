//! Shared reqwest transport used by GitHub clients and the installation token issuer.
//!
//! Every [`GitHubClient`](crate::github::GitHubClient) built during a request borrows a clone of
//! the same [`ReqwestHttpClient`], so connection pools are reused even though clients
//! themselves are created per call and never cached.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, error::ConfigError};

/// User agent sent with every GitHub request (GitHub rejects requests without one).
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Builds a client with the crate's user agent.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().user_agent(USER_AGENT).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
impl Default for ReqwestHttpClient {
	fn default() -> Self {
		Self(ReqwestClient::new())
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Reads a response body and decodes it with path-aware error reporting.
pub(crate) async fn read_json<T>(response: reqwest::Response) -> Result<T>
where
	T: serde::de::DeserializeOwned,
{
	let status = response.status().as_u16();
	let bytes = response.bytes().await?;
	let mut deserializer = serde_json::Deserializer::from_slice(&bytes);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::ResponseParse { source, status: Some(status) })
}

/// Converts a non-success response into [`Error::Api`], keeping GitHub's `message` field.
pub(crate) async fn api_error(response: reqwest::Response) -> Error {
	#[derive(Deserialize)]
	struct ErrorBody {
		message: Option<String>,
	}

	let status = response.status();
	let body = response.bytes().await.unwrap_or_default();
	let message = serde_json::from_slice::<ErrorBody>(&body)
		.ok()
		.and_then(|body| body.message)
		.unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_owned());

	Error::Api { status: status.as_u16(), message }
}
