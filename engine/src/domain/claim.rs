//! Claim definitions.

use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::employee;
#[cfg(doc)]
use crate::domain::Warranty;
#[cfg(doc)]
use common::DateTime;

/// [`Motive`]s suggested to UIs when filing a claim [`Entry`].
///
/// Suggestions only: any non-empty [`Motive`] is accepted.
pub const SUGGESTED_MOTIVES: [&str; 8] = [
    "Manufacturing defect",
    "Premature wear",
    "Installation issue",
    "Recurring failure",
    "Quality issue",
    "Rejected claim",
    "Technical evaluation",
    "Other",
];

/// Single claim event in a [`Warranty`]'s history.
///
/// Entries are append-only: once recorded, an [`Entry`] is never edited or
/// removed.
#[derive(Clone, Debug)]
pub struct Entry {
    /// ID of this [`Entry`].
    pub id: Id,

    /// [`Motive`] of this [`Entry`].
    pub motive: Motive,

    /// [`Resolution`] given to this [`Entry`].
    pub resolution: Resolution,

    /// Additional [`Notes`] about this [`Entry`].
    pub notes: Option<Notes>,

    /// ID of the employee who handled this [`Entry`].
    pub employee_id: employee::Id,

    /// Name of the employee who handled this [`Entry`], as recorded at the
    /// moment of filing.
    pub employee_name: employee::Name,

    /// [`Status`] of this [`Entry`].
    pub status: Status,

    /// [`DateTime`] when this [`Entry`] was filed.
    pub created_at: CreationDateTime,
}

/// ID of a claim [`Entry`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Motive of a claim [`Entry`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Motive(String);

impl Motive {
    /// Creates a new [`Motive`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `motive` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(motive: impl Into<String>) -> Self {
        Self(motive.into())
    }

    /// Creates a new [`Motive`] if the given `motive` is valid.
    #[must_use]
    pub fn new(motive: impl Into<String>) -> Option<Self> {
        let motive = motive.into();
        Self::check(&motive).then_some(Self(motive))
    }

    /// Checks whether the given `motive` is a valid [`Motive`].
    fn check(motive: impl AsRef<str>) -> bool {
        let motive = motive.as_ref();
        motive.trim() == motive && !motive.is_empty() && motive.len() <= 512
    }
}

impl FromStr for Motive {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Motive`")
    }
}

/// Resolution given to a claim [`Entry`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Resolution(String);

impl Resolution {
    /// Creates a new [`Resolution`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `resolution` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(resolution: impl Into<String>) -> Self {
        Self(resolution.into())
    }

    /// Creates a new [`Resolution`] if the given `resolution` is valid.
    #[must_use]
    pub fn new(resolution: impl Into<String>) -> Option<Self> {
        let resolution = resolution.into();
        Self::check(&resolution).then_some(Self(resolution))
    }

    /// Checks whether the given `resolution` is a valid [`Resolution`].
    fn check(resolution: impl AsRef<str>) -> bool {
        let resolution = resolution.as_ref();
        resolution.trim() == resolution
            && !resolution.is_empty()
            && resolution.len() <= 512
    }
}

impl FromStr for Resolution {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Resolution`")
    }
}

/// Additional notes on a claim [`Entry`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Notes(String);

impl Notes {
    /// Creates a new [`Notes`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `notes` match the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(notes: impl Into<String>) -> Self {
        Self(notes.into())
    }

    /// Creates a new [`Notes`] if the given `notes` are valid.
    #[must_use]
    pub fn new(notes: impl Into<String>) -> Option<Self> {
        let notes = notes.into();
        Self::check(&notes).then_some(Self(notes))
    }

    /// Checks whether the given `notes` are valid [`Notes`].
    fn check(notes: impl AsRef<str>) -> bool {
        let notes = notes.as_ref();
        notes.trim() == notes && !notes.is_empty() && notes.len() <= 2048
    }
}

impl FromStr for Notes {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Notes`")
    }
}

define_kind! {
    #[doc = "Status of a claim [`Entry`]."]
    enum Status {
        #[doc = "The claim awaits a decision."]
        Pending = 1,

        #[doc = "The claim was resolved."]
        Resolved = 2,

        #[doc = "The claim was rejected."]
        Rejected = 3,
    }
}

/// [`DateTime`] when a claim [`Entry`] was filed.
pub type CreationDateTime = DateTimeOf<(Entry, unit::Creation)>;
