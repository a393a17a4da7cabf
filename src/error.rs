//! Crate-level error types shared by the config validator, account stores, and strategies.

// self
use crate::{_prelude::*, config::ConfigIssue};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Account lookup failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::account::StoreError,
	),
	/// Installation token could not be minted.
	#[error(transparent)]
	Issuance(#[from] IssuanceError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// GitHub answered with a non-success status.
	#[error("GitHub API responded with status {status}: {message}.")]
	Api {
		/// HTTP status code.
		status: u16,
		/// Message extracted from the response body.
		message: String,
	},
	/// GitHub answered with JSON that does not match the expected shape.
	#[error("GitHub API returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// The session carries no access token and the caller asked for direct access.
	#[error("No access token available.")]
	MissingAccessToken,
}

/// Configuration and validation failures. These are operator errors and are surfaced once.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// One or more environment variables failed validation.
	#[error("Invalid environment configuration: {}.", render_issues(.issues))]
	Invalid {
		/// Every violation found, in schema order.
		issues: Vec<ConfigIssue>,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// An API path could not be joined onto the configured base URL.
	#[error("API path `{path}` cannot be joined onto the base URL.")]
	InvalidEndpoint {
		/// Path that failed to join.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	/// Returns the recorded validation issues, if this is a validation failure.
	pub fn issues(&self) -> &[ConfigIssue] {
		match self {
			Self::Invalid { issues } => issues,
			_ => &[],
		}
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

fn render_issues(issues: &[ConfigIssue]) -> String {
	issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Failures raised while minting GitHub App installation tokens.
#[derive(Debug, ThisError)]
pub enum IssuanceError {
	/// No GitHub App credentials were configured.
	#[error("GitHub App credentials are not configured.")]
	AppNotConfigured,
	/// The configured private key is not a valid RSA PEM.
	#[error("GitHub App private key is invalid.")]
	InvalidPrivateKey(#[source] jsonwebtoken::errors::Error),
	/// The app JWT could not be signed.
	#[error("GitHub App JWT could not be signed.")]
	Signing(#[source] jsonwebtoken::errors::Error),
	/// The issued token carries an unparsable expiry.
	#[error("Installation token expiry `{value}` is not an RFC 3339 timestamp.")]
	InvalidExpiry {
		/// Raw expiry value.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: time::error::Parse,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the GitHub API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
impl From<ReqwestError> for Error {
	fn from(e: ReqwestError) -> Self {
		TransportError::from(e).into()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{account::StoreError, config::ConfigIssueKind};

	#[test]
	fn invalid_config_lists_every_issue() {
		let err = ConfigError::Invalid {
			issues: vec![
				ConfigIssue::new("DATABASE_URL", ConfigIssueKind::Missing),
				ConfigIssue::new("AUTH_SECRET", ConfigIssueKind::Empty),
			],
		};
		let rendered = err.to_string();

		assert!(rendered.contains("DATABASE_URL"));
		assert!(rendered.contains("AUTH_SECRET"));
		assert_eq!(err.issues().len(), 2);
	}

	#[test]
	fn store_error_converts_into_crate_error_with_source() {
		let store_error = StoreError::Backend { message: "database unreachable".into() };
		let err: Error = store_error.clone().into();

		assert!(matches!(err, Error::Storage(_)));
		assert!(err.to_string().contains("database unreachable"));

		let source = StdError::source(&err)
			.expect("Crate error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}
}
