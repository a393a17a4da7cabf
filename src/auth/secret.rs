//! Bearer secrets: API keys, OAuth tokens, installation tokens, and PEM keys.

// self
use crate::_prelude::*;

/// Credential text that never appears in `Debug` or `Display` output.
///
/// Only [`TokenSecret::expose`] hands out the raw value, at the point where it goes onto the
/// wire or into a signer.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	const MASK: &'static str = "<redacted>";

	/// Wraps `value`.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Raw secret text.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Whether the secret is the empty string, which callers treat as "no credential".
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl From<String> for TokenSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for TokenSecret {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "TokenSecret({})", Self::MASK)
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(Self::MASK)
	}
}
