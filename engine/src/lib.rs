//! Engine containing the warranty lifecycle and analytics logic.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod query;
pub mod read;

pub use self::{command::Command, query::Query};

/// [`Engine`] configuration.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// [`command::CreateWarranty`] configuration.
    pub create_warranty: command::create_warranty::Config,

    /// [`command::AppendClaim`] configuration.
    pub append_claim: command::append_claim::Config,

    /// [`query::Alerts`] configuration.
    pub alerts: query::alerts::Config,
}

/// Warranty lifecycle engine.
///
/// Pure calculator over [`domain`] values: callers own persistence and
/// delivery, the [`Engine`] owns the rules.
#[derive(Clone, Debug)]
pub struct Engine {
    /// Configuration of this [`Engine`].
    config: Config,
}

impl Engine {
    /// Creates a new [`Engine`] with the provided [`Config`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Returns [`Config`] of this [`Engine`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
