// self
use crate::_prelude::*;

/// Deployment environment tag read from `APP_ENV`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppEnvironment {
	/// Local development (the default).
	#[default]
	Development,
	/// Production deployment.
	Production,
	/// Automated test runs.
	Test,
}
impl AppEnvironment {
	/// Every accepted value, in schema order.
	pub const ALLOWED: [&'static str; 3] = ["development", "production", "test"];

	/// Returns the stable label for the environment.
	pub const fn as_str(self) -> &'static str {
		match self {
			AppEnvironment::Development => "development",
			AppEnvironment::Production => "production",
			AppEnvironment::Test => "test",
		}
	}

	/// Returns `true` for production deployments.
	pub const fn is_production(self) -> bool {
		matches!(self, AppEnvironment::Production)
	}
}
impl Display for AppEnvironment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for AppEnvironment {
	type Err = UnknownEnvironment;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"development" => Ok(AppEnvironment::Development),
			"production" => Ok(AppEnvironment::Production),
			"test" => Ok(AppEnvironment::Test),
			other => Err(UnknownEnvironment(other.to_owned())),
		}
	}
}

/// Error returned when an environment tag is not one of [`AppEnvironment::ALLOWED`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown environment `{0}`.")]
pub struct UnknownEnvironment(pub String);
