//! Thin GitHub REST client handles and GitHub App installation token issuance.

pub mod app;
pub mod client;

pub use app::*;
pub use client::*;
