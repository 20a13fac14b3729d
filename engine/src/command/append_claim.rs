//! [`Command`] for filing a claim against a [`Warranty`].

use common::DateTime;
use derive_more::{Display, Error};
use smart_default::SmartDefault;
use tracerr::Traced;

use crate::{
    domain::{
        claim, employee,
        warranty::{self, State},
        Warranty,
    },
    Engine,
};

use super::Command;

/// Default set of claim motives requiring explanatory notes.
pub const DEFAULT_REQUIRES_DETAIL: [&str; 5] = [
    "Recurring failure",
    "Quality issue",
    "Rejected claim",
    "Technical evaluation",
    "Other",
];

/// [`Command`] for filing a claim against a [`Warranty`].
///
/// Textual inputs are accepted raw: trimming and validating them is this
/// [`Command`]'s contract.
#[derive(Clone, Debug)]
pub struct AppendClaim {
    /// [`Warranty`] to file the claim against.
    pub warranty: Warranty,

    /// Motive of the claim.
    pub motive: String,

    /// Resolution given to the customer.
    pub resolution: String,

    /// Explanatory notes of the claim, if any.
    pub notes: Option<String>,

    /// [`claim::Status`] to file the claim with.
    ///
    /// Claims are filed as [`claim::Status::Resolved`] unless said otherwise.
    pub status: Option<claim::Status>,

    /// ID of the employee filing the claim.
    pub employee_id: employee::Id,

    /// Name of the employee filing the claim, recorded as of this moment.
    pub employee_name: employee::Name,

    /// Current [`DateTime`].
    pub now: DateTime,
}

impl Command<AppendClaim> for Engine {
    type Ok = Warranty;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: AppendClaim) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AppendClaim {
            mut warranty,
            motive,
            resolution,
            notes,
            status,
            employee_id,
            employee_name,
            now,
        } = cmd;

        if !warranty.is_claimable() {
            return Err(tracerr::new!(E::NotClaimable {
                id: warranty.id,
                state: warranty.state,
            }));
        }

        let motive = claim::Motive::new(motive.trim())
            .ok_or(E::MotiveRequired)
            .map_err(tracerr::wrap!())?;
        let resolution = claim::Resolution::new(resolution.trim())
            .ok_or(E::ResolutionRequired)
            .map_err(tracerr::wrap!())?;

        let notes = notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(|notes| {
                claim::Notes::new(notes)
                    .ok_or_else(|| E::NotesRequired(motive.clone()))
                    .map_err(tracerr::wrap!())
            })
            .transpose()?;
        if notes.is_none()
            && (warranty.has_claims()
                || self.config().append_claim.requires_detail(motive.as_ref()))
        {
            return Err(tracerr::new!(E::NotesRequired(motive)));
        }

        let first_claim = !warranty.has_claims();
        warranty.claims.push(claim::Entry {
            id: claim::Id::new(),
            motive,
            resolution,
            notes,
            employee_id,
            employee_name,
            status: status.unwrap_or(claim::Status::Resolved),
            created_at: now.coerce(),
        });
        if first_claim {
            warranty.state = State::Claimed;
        }
        warranty.updated_at = now.coerce();

        Ok(warranty)
    }
}

/// Configuration of the [`AppendClaim`] [`Command`].
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Claim motives requiring explanatory notes.
    ///
    /// Matched against filed motives case-insensitively.
    #[default(DEFAULT_REQUIRES_DETAIL.map(String::from).into())]
    pub requires_detail_motives: Vec<String>,
}

impl Config {
    /// Indicates whether claims of the given `motive` require explanatory
    /// notes.
    #[must_use]
    pub fn requires_detail(&self, motive: &str) -> bool {
        let motive = motive.to_lowercase();
        self.requires_detail_motives
            .iter()
            .any(|m| m.to_lowercase() == motive)
    }
}

/// Error of [`AppendClaim`] [`Command`] execution.
#[derive(Debug, Display, Error)]
pub enum ExecutionError {
    /// Motive of the claim is missing.
    #[display("claim motive is required")]
    MotiveRequired,

    /// The [`Warranty`] cannot be claimed in its stored [`State`].
    #[display("`Warranty(id: {id})` is not claimable in `{state}` state")]
    NotClaimable {
        /// ID of the [`Warranty`].
        id: warranty::Id,

        /// Stored [`State`] of the [`Warranty`].
        state: State,
    },

    /// Explanatory notes are required for the claim, and are missing or
    /// unusable.
    #[display("claim of `{_0}` motive requires explanatory notes")]
    NotesRequired(#[error(not(source))] claim::Motive),

    /// Resolution of the claim is missing.
    #[display("claim resolution is required")]
    ResolutionRequired,
}

impl ExecutionError {
    /// Indicates whether this error rejects the claim's input, rather than
    /// the [`Warranty`]'s state.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        match self {
            Self::MotiveRequired
            | Self::NotesRequired(_)
            | Self::ResolutionRequired => true,
            Self::NotClaimable { .. } => false,
        }
    }
}
