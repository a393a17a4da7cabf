//! Three-way result reported by every credential strategy.

// self
use crate::_prelude::*;

/// Result of a credential strategy.
#[derive(Debug)]
pub enum CredentialOutcome<T> {
	/// The strategy produced a value.
	Found(T),
	/// The strategy does not apply (no session, no account, no token).
	Absent,
	/// An unexpected downstream failure occurred.
	Failed(Error),
}
impl<T> CredentialOutcome<T> {
	/// Collapses `Absent` and `Failed` into `None`.
	pub fn into_option(self) -> Option<T> {
		match self {
			Self::Found(value) => Some(value),
			Self::Absent | Self::Failed(_) => None,
		}
	}

	/// Returns `true` when a value was produced.
	pub fn is_found(&self) -> bool {
		matches!(self, Self::Found(_))
	}

	/// Returns `true` when the strategy did not apply.
	pub fn is_absent(&self) -> bool {
		matches!(self, Self::Absent)
	}

	/// Returns the failure, if any.
	pub fn failure(&self) -> Option<&Error> {
		match self {
			Self::Failed(e) => Some(e),
			_ => None,
		}
	}

	/// Maps the found value.
	pub fn map<U, F>(self, f: F) -> CredentialOutcome<U>
	where
		F: FnOnce(T) -> U,
	{
		match self {
			Self::Found(value) => CredentialOutcome::Found(f(value)),
			Self::Absent => CredentialOutcome::Absent,
			Self::Failed(e) => CredentialOutcome::Failed(e),
		}
	}
}
impl<T> From<Result<Option<T>>> for CredentialOutcome<T> {
	fn from(result: Result<Option<T>>) -> Self {
		match result {
			Ok(Some(value)) => Self::Found(value),
			Ok(None) => Self::Absent,
			Err(e) => Self::Failed(e),
		}
	}
}
