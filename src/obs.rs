//! Observability helpers for credential strategies.
//!
//! - Every resolution runs inside a `github_auth.strategy` span carrying the `strategy` field.
//! - With the `metrics` feature, `github_auth_strategy_total` is incremented for every attempt
//!   and outcome, labeled by `strategy` + `outcome`.

mod counter;
mod span;

pub use counter::*;
pub use span::*;

// self
use crate::_prelude::*;

/// Credential strategies observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
	/// Shared public API key.
	Public,
	/// GitHub App installation token.
	Installation,
	/// Stored OAuth user token.
	OAuth,
	/// Token supplied directly on the session.
	Direct,
}
impl StrategyKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StrategyKind::Public => "public",
			StrategyKind::Installation => "installation",
			StrategyKind::OAuth => "oauth",
			StrategyKind::Direct => "direct",
		}
	}
}
impl Display for StrategyKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyOutcome {
	/// Entry to a strategy.
	Attempt,
	/// A client was produced.
	Found,
	/// The strategy did not apply.
	Absent,
	/// An unexpected failure occurred.
	Failed,
}
impl StrategyOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StrategyOutcome::Attempt => "attempt",
			StrategyOutcome::Found => "found",
			StrategyOutcome::Absent => "absent",
			StrategyOutcome::Failed => "failed",
		}
	}
}
impl Display for StrategyOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
