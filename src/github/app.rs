//! GitHub App installation token issuance.
//!
//! [`AppTokenIssuer`] signs a short RS256 app JWT and exchanges it for an installation token
//! through `POST /app/installations/{id}/access_tokens`. Tokens are returned as-is; nothing is
//! cached or refreshed here.

// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Method;
use time::format_description::well_known::Rfc3339;
// self
use crate::{
	_prelude::*,
	auth::{InstallationId, TokenSecret},
	config::GitHubAppConfig,
	error::IssuanceError,
	github::GitHubApi,
	http,
};

/// Boxed future returned by [`InstallationTokenIssuer::issue`].
pub type IssueFuture<'a> = Pin<Box<dyn Future<Output = Result<InstallationToken>> + 'a + Send>>;

/// Exchanges an installation identifier for a short-lived installation token.
pub trait InstallationTokenIssuer
where
	Self: Send + Sync,
{
	/// Mints a token scoped to `installation`.
	fn issue(&self, installation: InstallationId) -> IssueFuture<'_>;
}

/// Installation token returned by GitHub.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallationToken {
	/// Bearer secret.
	pub token: TokenSecret,
	/// Instant after which GitHub rejects the token.
	pub expires_at: OffsetDateTime,
}

/// JWT claims GitHub expects from an app.
#[derive(Debug, Serialize)]
struct AppClaims {
	iat: i64,
	exp: i64,
	iss: String,
}

#[derive(Deserialize)]
struct AccessTokenResponse {
	token: String,
	expires_at: String,
}

/// Issuer that authenticates as a GitHub App.
#[derive(Clone)]
pub struct AppTokenIssuer {
	app_id: u64,
	key: EncodingKey,
	api: GitHubApi,
}
impl AppTokenIssuer {
	/// Clock-skew allowance applied to `iat`.
	pub const JWT_BACKDATE: Duration = Duration::seconds(60);
	/// JWT lifetime; GitHub caps it at ten minutes.
	pub const JWT_LIFETIME: Duration = Duration::minutes(9);

	/// Creates an issuer from an app id and an RSA private key in PEM form.
	pub fn new(app_id: u64, private_key_pem: &str, api: GitHubApi) -> Result<Self> {
		let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
			.map_err(IssuanceError::InvalidPrivateKey)?;

		Ok(Self { app_id, key, api })
	}

	/// Creates an issuer from validated configuration.
	pub fn from_config(config: &GitHubAppConfig, api: GitHubApi) -> Result<Self> {
		Self::new(config.app_id, config.private_key.expose(), api)
	}

	/// Returns the GitHub App identifier.
	pub fn app_id(&self) -> u64 {
		self.app_id
	}

	/// Signs an app JWT valid from `now - JWT_BACKDATE` to `now + JWT_LIFETIME`.
	pub fn app_jwt(&self, now: OffsetDateTime) -> Result<TokenSecret> {
		let claims = AppClaims {
			iat: (now - Self::JWT_BACKDATE).unix_timestamp(),
			exp: (now + Self::JWT_LIFETIME).unix_timestamp(),
			iss: self.app_id.to_string(),
		};
		let jwt = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.key)
			.map_err(IssuanceError::Signing)?;

		Ok(TokenSecret::new(jwt))
	}

	async fn issue_now(&self, installation: InstallationId) -> Result<InstallationToken> {
		let jwt = self.app_jwt(OffsetDateTime::now_utc())?;
		let path = format!("app/installations/{installation}/access_tokens");
		let response = self.api.request(Method::POST, &path, &jwt)?.send().await?;

		if !response.status().is_success() {
			return Err(http::api_error(response).await);
		}

		let body: AccessTokenResponse = http::read_json(response).await?;
		let expires_at = OffsetDateTime::parse(&body.expires_at, &Rfc3339).map_err(|source| {
			IssuanceError::InvalidExpiry { value: body.expires_at.clone(), source }
		})?;

		tracing::debug!(%installation, %expires_at, "Issued installation token.");

		Ok(InstallationToken { token: TokenSecret::new(body.token), expires_at })
	}
}
impl InstallationTokenIssuer for AppTokenIssuer {
	fn issue(&self, installation: InstallationId) -> IssueFuture<'_> {
		Box::pin(self.issue_now(installation))
	}
}
impl Debug for AppTokenIssuer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppTokenIssuer")
			.field("app_id", &self.app_id)
			.field("key", &"<redacted>")
			.field("api", &self.api.base_url().as_str())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use jsonwebtoken::{DecodingKey, Validation};
	use time::macros;
	// self
	use super::*;
	use crate::http::ReqwestHttpClient;

	const APP_KEY: &str = include_str!("../../tests/fixtures/app-key.pem");
	const APP_PUBLIC_KEY: &str = include_str!("../../tests/fixtures/app-key.pub.pem");

	fn issuer() -> AppTokenIssuer {
		let api = GitHubApi::new(
			Url::parse("https://api.github.com").expect("API base fixture should parse."),
			ReqwestHttpClient::default(),
		);

		AppTokenIssuer::new(4242, APP_KEY, api).expect("Fixture key should load.")
	}

	#[test]
	fn rejects_malformed_keys() {
		let api = GitHubApi::new(
			Url::parse("https://api.github.com").expect("API base fixture should parse."),
			ReqwestHttpClient::default(),
		);
		let err = AppTokenIssuer::new(1, "not a key", api).expect_err("Garbage keys must fail.");

		assert!(matches!(err, Error::Issuance(IssuanceError::InvalidPrivateKey(_))));
	}

	#[test]
	fn app_jwt_carries_backdated_window_and_issuer() {
		let now = macros::datetime!(2026-10-19 12:00 UTC);
		let jwt = issuer().app_jwt(now).expect("JWT should sign.");
		let header = jsonwebtoken::decode_header(jwt.expose()).expect("JWT header should decode.");
		let public_key =
			DecodingKey::from_rsa_pem(APP_PUBLIC_KEY.as_bytes()).expect("Public key should load.");
		let mut validation = Validation::new(Algorithm::RS256);

		validation.validate_exp = false;

		let claims =
			jsonwebtoken::decode::<serde_json::Value>(jwt.expose(), &public_key, &validation)
				.expect("JWT should verify against the app's public key.")
				.claims;

		assert_eq!(header.alg, Algorithm::RS256);
		assert_eq!(claims["iss"], "4242");
		assert_eq!(claims["iat"], now.unix_timestamp() - 60);
		assert_eq!(claims["exp"], now.unix_timestamp() + 540);
	}

	#[test]
	fn debug_output_hides_key() {
		let rendered = format!("{:?}", issuer());

		assert!(rendered.contains("4242"));
		assert!(!rendered.contains("PRIVATE KEY"));
	}
}
