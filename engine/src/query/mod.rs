//! [`Query`] definition.

pub mod alerts;
pub mod stats;
pub mod tiers;

/// [`Query`] of the [`Engine`].
///
/// [`Engine`]: crate::Engine
pub use common::Handler as Query;

pub use self::{alerts::Alerts, stats::Stats, tiers::Tiers};
