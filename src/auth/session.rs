//! Read-only view over a session produced by the external session subsystem.

// self
use crate::{
	_prelude::*,
	auth::{TokenSecret, UserId},
};

/// Session reference handed to credential strategies.
///
/// The session subsystem owns the value; strategies only read the user identifier and, for
/// direct access, the pre-supplied access token. Both are optional because anonymous and
/// partially hydrated sessions are routine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	/// Identifier of the signed-in user, if any.
	pub user_id: Option<UserId>,
	/// Access token already attached to the session, if any.
	pub access_token: Option<TokenSecret>,
}
impl Session {
	/// Creates an anonymous session.
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// Creates a session for the provided user.
	pub fn for_user(user_id: UserId) -> Self {
		Self { user_id: Some(user_id), access_token: None }
	}

	/// Attaches a pre-supplied access token.
	pub fn with_access_token(mut self, token: impl Into<TokenSecret>) -> Self {
		self.access_token = Some(token.into());

		self
	}

	/// Returns the user identifier, if the session is signed in.
	pub fn user(&self) -> Option<&UserId> {
		self.user_id.as_ref()
	}
}

/// Extracts the user identifier from an optional session.
pub(crate) fn session_user(session: Option<&Session>) -> Option<&UserId> {
	session.and_then(Session::user)
}
