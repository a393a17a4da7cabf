// crates.io
use tracing::{Span, instrument::Instrumented};
// self
use crate::{_prelude::*, obs::StrategyKind};

/// Span wrapper used by credential strategies.
#[derive(Clone, Debug)]
pub struct StrategySpan {
	span: Span,
}
impl StrategySpan {
	/// Creates a new span tagged with the provided strategy + stage.
	pub fn new(kind: StrategyKind, stage: &'static str) -> Self {
		Self { span: tracing::info_span!("github_auth.strategy", strategy = kind.as_str(), stage) }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		use tracing::Instrument;

		fut.instrument(self.span.clone())
	}
}
