//! Per-call API client wrapping exactly one credential.

// crates.io
use reqwest::{
	Method, RequestBuilder,
	header::{ACCEPT, USER_AGENT},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::Config,
	error::ConfigError,
	http::{self, ReqwestHttpClient},
};

/// Where a client's credential came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
	/// Shared public API key for anonymous access.
	PublicKey,
	/// Short-lived GitHub App installation token.
	Installation,
	/// OAuth user token read from the account store.
	OAuth,
	/// Token supplied directly on the session.
	SessionToken,
}
impl CredentialKind {
	/// Returns a stable label suitable for log fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CredentialKind::PublicKey => "public_key",
			CredentialKind::Installation => "installation",
			CredentialKind::OAuth => "oauth",
			CredentialKind::SessionToken => "session_token",
		}
	}
}
impl Display for CredentialKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A single bearer credential and its origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
	/// Origin of the credential.
	pub kind: CredentialKind,
	/// Bearer secret.
	pub secret: TokenSecret,
}
impl Credential {
	/// Pairs a secret with its origin.
	pub fn new(kind: CredentialKind, secret: impl Into<TokenSecret>) -> Self {
		Self { kind, secret: secret.into() }
	}
}

/// API base URL plus the shared transport; stamps out [`GitHubClient`]s.
#[derive(Clone, Debug)]
pub struct GitHubApi {
	base: Url,
	http: ReqwestHttpClient,
}
impl GitHubApi {
	/// REST API version pinned through `X-GitHub-Api-Version`.
	pub const API_VERSION: &'static str = "2022-11-28";
	/// Media type requested through `Accept`.
	pub const MEDIA_TYPE: &'static str = "application/vnd.github+json";

	/// Creates an API handle rooted at `base`.
	///
	/// A trailing slash is appended when missing so that paths join below the base
	/// (e.g. GitHub Enterprise's `/api/v3`).
	pub fn new(mut base: Url, http: ReqwestHttpClient) -> Self {
		if !base.path().ends_with('/') {
			let path = format!("{}/", base.path());

			base.set_path(&path);
		}

		Self { base, http }
	}

	/// Creates an API handle for the configured `GITHUB_API_URL` with a fresh transport.
	pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
		Ok(Self::new(config.github_api_url.url().clone(), ReqwestHttpClient::new()?))
	}

	/// Returns the normalized API base URL.
	pub fn base_url(&self) -> &Url {
		&self.base
	}

	/// Returns the shared transport.
	pub fn http(&self) -> &ReqwestHttpClient {
		&self.http
	}

	/// Builds a client bound to `credential`.
	pub fn client(&self, credential: Credential) -> GitHubClient {
		GitHubClient { api: self.clone(), credential }
	}

	/// Resolves `path` against the API base.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		self.base
			.join(path.trim_start_matches('/'))
			.map_err(|source| ConfigError::InvalidEndpoint { path: path.to_owned(), source })
	}

	pub(crate) fn request(
		&self,
		method: Method,
		path: &str,
		secret: &TokenSecret,
	) -> Result<RequestBuilder, ConfigError> {
		let url = self.endpoint(path)?;

		Ok(self
			.http
			.request(method, url)
			.bearer_auth(secret.expose())
			.header(ACCEPT, Self::MEDIA_TYPE)
			.header(USER_AGENT, http::USER_AGENT)
			.header("X-GitHub-Api-Version", Self::API_VERSION))
	}
}

/// Short-lived GitHub API client holding a single credential.
///
/// Clients are cheap to build and are never cached; create one per request.
#[derive(Clone, Debug)]
pub struct GitHubClient {
	api: GitHubApi,
	credential: Credential,
}
impl GitHubClient {
	/// Returns where the credential came from.
	pub fn credential_kind(&self) -> CredentialKind {
		self.credential.kind
	}

	/// Returns the bound credential.
	pub fn credential(&self) -> &Credential {
		&self.credential
	}

	/// Returns the API base URL.
	pub fn api_base(&self) -> &Url {
		self.api.base_url()
	}

	/// Starts an authenticated request against `path` (relative to the API base).
	pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
		Ok(self.api.request(method, path, &self.credential.secret)?)
	}

	/// Performs an authenticated `GET` and decodes the JSON body.
	pub async fn get_json<T>(&self, path: &str) -> Result<T>
	where
		T: serde::de::DeserializeOwned,
	{
		let response = self.request(Method::GET, path)?.send().await?;

		if !response.status().is_success() {
			return Err(http::api_error(response).await);
		}

		http::read_json(response).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn api(base: &str) -> GitHubApi {
		GitHubApi::new(
			Url::parse(base).expect("API base fixture should parse."),
			ReqwestHttpClient::default(),
		)
	}

	#[test]
	fn endpoints_join_below_enterprise_prefix() {
		let api = api("https://ghe.example.com/api/v3");

		assert_eq!(api.base_url().as_str(), "https://ghe.example.com/api/v3/");
		assert_eq!(
			api.endpoint("/user").expect("Path should join.").as_str(),
			"https://ghe.example.com/api/v3/user"
		);
		assert_eq!(
			api.endpoint("app/installations/7/access_tokens").expect("Path should join.").as_str(),
			"https://ghe.example.com/api/v3/app/installations/7/access_tokens"
		);
	}

	#[test]
	fn client_reports_credential_origin() {
		let client = api("https://api.github.com")
			.client(Credential::new(CredentialKind::OAuth, "gho_token"));

		assert_eq!(client.credential_kind(), CredentialKind::OAuth);
		assert_eq!(client.credential().secret.expose(), "gho_token");
		assert!(!format!("{client:?}").contains("gho_token"));
	}

	#[test]
	fn requests_carry_bearer_and_version_headers() {
		let client = api("https://api.github.com")
			.client(Credential::new(CredentialKind::PublicKey, "ghp_public"));
		let request = client
			.request(Method::GET, "/rate_limit")
			.expect("Request should build.")
			.build()
			.expect("Request should finalize.");

		assert_eq!(request.url().as_str(), "https://api.github.com/rate_limit");
		assert_eq!(
			request.headers().get("authorization").and_then(|v| v.to_str().ok()),
			Some("Bearer ghp_public")
		);
		assert_eq!(
			request.headers().get("x-github-api-version").and_then(|v| v.to_str().ok()),
			Some(GitHubApi::API_VERSION)
		);
		assert_eq!(
			request.headers().get("user-agent").and_then(|v| v.to_str().ok()),
			Some(http::USER_AGENT)
		);
	}
}
