//! Credential strategies that each try to produce a [`GitHubClient`].
//!
//! Each strategy is independently callable and reports a [`CredentialOutcome`]: `Found` when it
//! produced a client, `Absent` when it does not apply to the session, and `Failed` when a
//! lookup or token call broke unexpectedly. Failures are logged where they happen and can be
//! collapsed into absence with [`CredentialOutcome::into_option`], which is what
//! [`StrategyChain`] does to keep falling through to the next source.

pub mod chain;
pub mod direct;
pub mod installation;
pub mod oauth;
pub mod outcome;
pub mod public;

pub use chain::*;
pub use direct::*;
pub use installation::*;
pub use oauth::*;
pub use outcome::*;
pub use public::*;

// self
use crate::{
	_prelude::*,
	auth::Session,
	github::GitHubClient,
	obs::{self, StrategyKind, StrategyOutcome, StrategySpan},
};

/// Boxed future returned by [`CredentialStrategy::resolve`].
pub type StrategyFuture<'a> =
	Pin<Box<dyn Future<Output = CredentialOutcome<GitHubClient>> + 'a + Send>>;

/// A single credential source.
pub trait CredentialStrategy
where
	Self: Send + Sync,
{
	/// Label used in spans, logs, and metrics.
	fn kind(&self) -> StrategyKind;

	/// Attempts to build a client for `session`.
	///
	/// Implementations never fail for the "does not apply" case; they return
	/// [`CredentialOutcome::Absent`] instead.
	fn resolve<'a>(&'a self, session: Option<&'a Session>) -> StrategyFuture<'a>;
}

/// Runs a strategy body inside its span, records the outcome, and logs failures.
pub(crate) async fn observe<Fut>(kind: StrategyKind, body: Fut) -> CredentialOutcome<GitHubClient>
where
	Fut: Future<Output = Result<Option<GitHubClient>>>,
{
	let span = StrategySpan::new(kind, "resolve");

	obs::record_strategy_outcome(kind, StrategyOutcome::Attempt);

	let outcome = span.instrument(async move { CredentialOutcome::from(body.await) }).await;

	match &outcome {
		CredentialOutcome::Found(_) => obs::record_strategy_outcome(kind, StrategyOutcome::Found),
		CredentialOutcome::Absent => {
			tracing::debug!(strategy = %kind, "Credential strategy does not apply.");
			obs::record_strategy_outcome(kind, StrategyOutcome::Absent);
		},
		CredentialOutcome::Failed(e) => {
			tracing::warn!(
				strategy = %kind,
				error = %e,
				"Credential strategy failed; treating as absent."
			);
			obs::record_strategy_outcome(kind, StrategyOutcome::Failed);
		},
	}

	outcome
}
