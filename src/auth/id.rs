//! Strongly typed identifiers for users, auth providers, and GitHub App installations.

// std
use std::borrow::Borrow;
// self
use crate::_prelude::*;

// Every entry path (constructor, `FromStr`, serde) goes through `check_identifier`.
macro_rules! string_id {
	($(#[$meta:meta])* $name:ident => $kind:literal) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Checks `value` and wraps it.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				Self::try_from(value.into())
			}

			/// Borrows the identifier text.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				check_identifier($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, "{}({})", $kind, self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

/// Upper bound on identifier length, counted in characters.
const MAX_IDENTIFIER_CHARS: usize = 128;

/// Rejection reasons shared by every identifier type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// Empty string, or zero for installations.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Identifier type, e.g. `User`.
		kind: &'static str,
	},
	/// Whitespace anywhere in the value.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Identifier type.
		kind: &'static str,
	},
	/// Negative database value for an unsigned identifier.
	#[error("{kind} identifier cannot be negative.")]
	Negative {
		/// Identifier type.
		kind: &'static str,
	},
	/// Text that is not a decimal number.
	#[error("{kind} identifier must be numeric.")]
	NotNumeric {
		/// Identifier type.
		kind: &'static str,
	},
	/// Longer than the permitted character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Identifier type.
		kind: &'static str,
		/// Permitted character count.
		max: usize,
	},
}

string_id! {
	/// User identifier issued by the session subsystem.
	UserId => "User"
}
string_id! {
	/// Provider an account is linked through, e.g. `github`.
	ProviderId => "Provider"
}
impl ProviderId {
	/// Provider identifier under which GitHub accounts are linked.
	pub const GITHUB: &'static str = "github";

	/// Returns the `github` provider identifier.
	pub fn github() -> Self {
		Self(Self::GITHUB.to_owned())
	}
}

/// Numeric identifier of a GitHub App installation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct InstallationId(u64);
impl InstallationId {
	/// Creates a new installation identifier; zero is rejected.
	pub fn new(value: u64) -> Result<Self, IdentifierError> {
		if value == 0 {
			return Err(IdentifierError::Empty { kind: "Installation" });
		}

		Ok(Self(value))
	}

	/// Returns the raw numeric identifier.
	pub const fn get(self) -> u64 {
		self.0
	}
}
impl From<InstallationId> for u64 {
	fn from(value: InstallationId) -> Self {
		value.0
	}
}
impl TryFrom<u64> for InstallationId {
	type Error = IdentifierError;

	fn try_from(value: u64) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl TryFrom<i64> for InstallationId {
	type Error = IdentifierError;

	fn try_from(value: i64) -> Result<Self, Self::Error> {
		let value =
			u64::try_from(value).map_err(|_| IdentifierError::Negative { kind: "Installation" })?;

		Self::new(value)
	}
}
impl Debug for InstallationId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Installation({})", self.0)
	}
}
impl Display for InstallationId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.0, f)
	}
}
impl FromStr for InstallationId {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let value =
			s.parse::<u64>().map_err(|_| IdentifierError::NotNumeric { kind: "Installation" })?;

		Self::new(value)
	}
}

fn check_identifier(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
	match value.chars().count() {
		0 => Err(IdentifierError::Empty { kind }),
		n if n > MAX_IDENTIFIER_CHARS =>
			Err(IdentifierError::TooLong { kind, max: MAX_IDENTIFIER_CHARS }),
		_ if value.chars().any(char::is_whitespace) =>
			Err(IdentifierError::ContainsWhitespace { kind }),
		_ => Ok(()),
	}
}
