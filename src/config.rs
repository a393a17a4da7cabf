//! Startup configuration validated from environment variables.
//!
//! [`Config::load`] is meant to run exactly once, before anything else touches the network or
//! the database. Every violation is collected into [`ConfigError::Invalid`] so operators see the
//! full list in one go; the caller is expected to treat that error as fatal. The resulting
//! [`Config`] is immutable and passed by reference to whoever needs it.

mod environment;
mod schema;

pub use environment::*;
pub use schema::{ConfigIssue, ConfigIssueKind, EnvUrl};

// std
use std::{env, ffi::OsString, io::ErrorKind, path::Path};
// self
use crate::{_prelude::*, auth::TokenSecret, config::schema::EnvReader, error::ConfigError};

/// Environment variable names read by [`Config::from_vars`].
pub mod keys {
	/// Relational store connection string.
	pub const DATABASE_URL: &str = "DATABASE_URL";
	/// GitHub OAuth app client identifier.
	pub const GITHUB_CLIENT_ID: &str = "GITHUB_CLIENT_ID";
	/// GitHub OAuth app client secret.
	pub const GITHUB_CLIENT_SECRET: &str = "GITHUB_CLIENT_SECRET";
	/// Shared key used for anonymous API access.
	pub const GITHUB_PUBLIC_API_KEY: &str = "GITHUB_PUBLIC_API_KEY";
	/// Secret used by the session subsystem.
	pub const AUTH_SECRET: &str = "AUTH_SECRET";
	/// Optional base URL of the session subsystem.
	pub const AUTH_URL: &str = "AUTH_URL";
	/// Deployment environment tag.
	pub const APP_ENV: &str = "APP_ENV";
	/// Public URL of the application.
	pub const PUBLIC_APP_URL: &str = "PUBLIC_APP_URL";
	/// Optional GitHub REST API base URL.
	pub const GITHUB_API_URL: &str = "GITHUB_API_URL";
	/// Optional GitHub App identifier.
	pub const GITHUB_APP_ID: &str = "GITHUB_APP_ID";
	/// Optional GitHub App private key (PEM).
	pub const GITHUB_APP_PRIVATE_KEY: &str = "GITHUB_APP_PRIVATE_KEY";
}

/// File loaded by [`Config::load`] before reading the process environment.
pub const LOCAL_ENV_FILE: &str = ".env.local";
/// API base used when `GITHUB_API_URL` is unset.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// GitHub App credentials used to mint installation tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GitHubAppConfig {
	/// Numeric GitHub App identifier (JWT `iss`).
	pub app_id: u64,
	/// RSA private key in PEM form.
	pub private_key: TokenSecret,
}

/// Validated, immutable process configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
	/// Relational store connection string.
	pub database_url: EnvUrl,
	/// GitHub OAuth client identifier.
	pub github_client_id: String,
	/// GitHub OAuth client secret.
	pub github_client_secret: TokenSecret,
	/// Shared key for anonymous GitHub access.
	pub github_public_api_key: TokenSecret,
	/// Session subsystem secret.
	pub auth_secret: TokenSecret,
	/// Optional session subsystem URL.
	pub auth_url: Option<EnvUrl>,
	/// Deployment environment.
	pub environment: AppEnvironment,
	/// Public application URL.
	pub public_app_url: EnvUrl,
	/// GitHub REST API base URL.
	pub github_api_url: EnvUrl,
	/// GitHub App credentials, when installation access is enabled.
	pub github_app: Option<GitHubAppConfig>,
}
impl Config {
	/// Loads [`LOCAL_ENV_FILE`] (when present) and validates the process environment.
	pub fn load() -> Result<Self, ConfigError> {
		Self::load_from(LOCAL_ENV_FILE)
	}

	/// Loads the provided dotenv file (when present) and validates the process environment.
	///
	/// Variables already set in the process take precedence over the file.
	pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		apply_env_file(path.as_ref());

		Self::from_env()
	}

	/// Validates the current process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_os_vars(env::vars_os())
	}

	/// Validates a mapping of raw OS strings.
	///
	/// Values that are not valid UTF-8 are reported as [`ConfigIssueKind::NotUnicode`] rather
	/// than treated as unset. Keys that are not valid UTF-8 cannot name a known variable and are
	/// skipped.
	pub fn from_os_vars<I>(vars: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = (OsString, OsString)>,
	{
		let mut decoded = HashMap::new();
		let mut non_unicode = Vec::new();

		for (key, value) in vars {
			let Ok(key) = key.into_string() else {
				continue;
			};

			match value.into_string() {
				Ok(value) => {
					decoded.insert(key, value);
				},
				Err(_) => non_unicode.push(key),
			}
		}

		Self::validate(&decoded, &non_unicode)
	}

	/// Validates an explicit name/value mapping.
	pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let vars: HashMap<String, String> =
			vars.into_iter().map(|(key, value)| (key.into(), value.into())).collect();

		Self::validate(&vars, &[])
	}

	fn validate(
		vars: &HashMap<String, String>,
		non_unicode: &[String],
	) -> Result<Self, ConfigError> {
		let mut reader = EnvReader::new(vars, non_unicode);
		let database_url = reader.required_url(keys::DATABASE_URL);
		let github_client_id = reader.required_string(keys::GITHUB_CLIENT_ID);
		let github_client_secret = reader.required_secret(keys::GITHUB_CLIENT_SECRET);
		let github_public_api_key = reader.required_secret(keys::GITHUB_PUBLIC_API_KEY);
		let auth_secret = reader.required_secret(keys::AUTH_SECRET);
		let auth_url = reader.optional_url(keys::AUTH_URL);
		let environment = reader.environment(keys::APP_ENV);
		let public_app_url = reader.required_url(keys::PUBLIC_APP_URL);
		let github_api_url = reader.optional_url(keys::GITHUB_API_URL);
		let github_app = reader.github_app(keys::GITHUB_APP_ID, keys::GITHUB_APP_PRIVATE_KEY);

		match (
			database_url,
			github_client_id,
			github_client_secret,
			github_public_api_key,
			auth_secret,
			auth_url,
			environment,
			public_app_url,
			github_api_url,
			github_app,
		) {
			(
				Some(database_url),
				Some(github_client_id),
				Some(github_client_secret),
				Some(github_public_api_key),
				Some(auth_secret),
				Some(auth_url),
				Some(environment),
				Some(public_app_url),
				Some(github_api_url),
				Some(github_app),
			) => {
				let github_api_url = match github_api_url {
					Some(url) => url,
					None => EnvUrl::parse(DEFAULT_GITHUB_API_URL).map_err(|e| {
						ConfigError::Invalid {
							issues: vec![ConfigIssue::new(
								keys::GITHUB_API_URL,
								ConfigIssueKind::InvalidUrl { reason: e.to_string() },
							)],
						}
					})?,
				};

				Ok(Self {
					database_url,
					github_client_id,
					github_client_secret,
					github_public_api_key,
					auth_secret,
					auth_url,
					environment,
					public_app_url,
					github_api_url,
					github_app,
				})
			},
			_ => Err(ConfigError::Invalid { issues: reader.into_issues() }),
		}
	}
}

/// What [`Config::load_from`] did with its dotenv file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EnvFile {
	Loaded,
	Missing,
	Unreadable,
}

/// Applies a dotenv file to the process environment without overriding variables already set.
pub(crate) fn apply_env_file(path: &Path) -> EnvFile {
	match dotenv::from_path(path) {
		Ok(()) => {
			tracing::debug!(path = %path.display(), "Loaded dotenv file.");

			EnvFile::Loaded
		},
		Err(dotenv::Error::Io(e)) if e.kind() == ErrorKind::NotFound => EnvFile::Missing,
		Err(e) => {
			tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable dotenv file.");

			EnvFile::Unreadable
		},
	}
}
