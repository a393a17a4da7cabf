//! Ordered fallback across credential strategies.

// self
use crate::{
	_prelude::*,
	auth::Session,
	github::GitHubClient,
	strategy::CredentialStrategy,
};

/// Ordered list of strategies; the first one that finds a client wins.
///
/// Absent and failed strategies are skipped. Each strategy has already logged its own failure,
/// so the chain only decides what to try next.
#[derive(Clone, Default)]
pub struct StrategyChain {
	strategies: Vec<Arc<dyn CredentialStrategy>>,
}
impl StrategyChain {
	/// Creates an empty chain.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a strategy.
	pub fn then(mut self, strategy: Arc<dyn CredentialStrategy>) -> Self {
		self.strategies.push(strategy);

		self
	}

	/// Returns the number of strategies in the chain.
	pub fn len(&self) -> usize {
		self.strategies.len()
	}

	/// Returns `true` when the chain holds no strategies.
	pub fn is_empty(&self) -> bool {
		self.strategies.is_empty()
	}

	/// Tries each strategy in order and returns the first client found.
	pub async fn resolve(&self, session: Option<&Session>) -> Option<GitHubClient> {
		for strategy in &self.strategies {
			if let Some(client) = strategy.resolve(session).await.into_option() {
				return Some(client);
			}
		}

		None
	}
}
impl Debug for StrategyChain {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_list().entries(self.strategies.iter().map(|strategy| strategy.kind())).finish()
	}
}
