//! [`Command`] definition.

pub mod append_claim;
pub mod create_warranty;

/// [`Command`] of the [`Engine`].
///
/// [`Engine`]: crate::Engine
pub use common::Handler as Command;

pub use self::{append_claim::AppendClaim, create_warranty::CreateWarranty};
