//! Fail-fast environment validation plus ordered GitHub credential selection: public API key,
//! GitHub App installation tokens, and OAuth user tokens, each producing a thin API client.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod account;
pub mod auth;
pub mod config;
pub mod error;
pub mod factory;
pub mod github;
pub mod http;
pub mod obs;
pub mod strategy;

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
#[cfg(feature = "sqlx")] pub use sqlx;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
