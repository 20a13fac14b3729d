//! [`Warranty`] definitions.

use common::{define_kind, unit, DateTime, DateTimeOf};
use derive_more::{AsRef, Display, Error, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{claim, employee, shop, Customer, Vehicle};

/// Number of days to expiration within which a [`Warranty`] counts as
/// urgently expiring.
pub const URGENT_DAYS: i64 = 7;

/// Number of days to expiration within which a [`Warranty`] counts as
/// expiring soon.
pub const SOON_DAYS: i64 = 30;

/// Product warranty issued at the point of sale.
#[derive(Clone, Debug)]
pub struct Warranty {
    /// ID of this [`Warranty`].
    pub id: Id,

    /// ID of the shop this [`Warranty`] belongs to.
    pub shop_id: shop::Id,

    /// [`Category`] of the covered product.
    pub category: Category,

    /// [`Brand`] of the covered product.
    pub brand: Brand,

    /// [`Model`] of the covered product.
    pub model: Model,

    /// [`SerialNumber`] of the covered product, if it has one.
    pub serial_number: Option<SerialNumber>,

    /// Free-form [`Description`] of the covered product.
    pub description: Option<Description>,

    /// [`DateTime`] when the covered product was sold.
    pub sold_at: SaleDateTime,

    /// [`Price`] the covered product was sold for.
    pub price: Price,

    /// [`InvoiceNumber`] of the sale, if any.
    pub invoice_number: Option<InvoiceNumber>,

    /// ID of the employee who sold the covered product.
    pub seller_id: employee::Id,

    /// Name of the employee who sold the covered product, as recorded at the
    /// moment of the sale.
    pub seller_name: employee::Name,

    /// [`Customer`] this [`Warranty`] was issued to.
    pub customer: Customer,

    /// [`Vehicle`] the covered product was installed on, if any.
    pub vehicle: Option<Vehicle>,

    /// Coverage [`Terms`] of this [`Warranty`].
    pub terms: Terms,

    /// [`DateTime`] when this [`Warranty`] expires.
    ///
    /// Computed once when this [`Warranty`] is issued and immutable
    /// afterwards.
    pub expires_at: ExpirationDateTime,

    /// Stored lifecycle [`State`] of this [`Warranty`].
    pub state: State,

    /// Claim history of this [`Warranty`], oldest first, append-only.
    pub claims: Vec<claim::Entry>,

    /// [`DateTime`] when this [`Warranty`] was created.
    pub created_at: CreationDateTime,

    /// ID of the employee who created this [`Warranty`].
    pub created_by: employee::Id,

    /// [`DateTime`] when this [`Warranty`] was last updated.
    pub updated_at: UpdateDateTime,
}

impl Warranty {
    /// Returns the signed number of whole days from `now` until the
    /// expiration of this [`Warranty`].
    ///
    /// Any started day counts as a whole one, so the result is `0` within
    /// the last day of coverage and turns negative once a full day has
    /// passed since the expiration.
    #[must_use]
    pub fn days_to_expire(&self, now: DateTime) -> i64 {
        now.whole_days_until(self.expires_at)
    }

    /// Resolves the effective [`Status`] of this [`Warranty`] at the `now`
    /// moment.
    ///
    /// Combines the stored [`State`] with the calendar: a date-lapsed
    /// [`Warranty`] reads as [`Status::Expired`] even while its stored
    /// [`State`] still says [`State::Active`] or [`State::Claimed`].
    #[must_use]
    pub fn effective_status(&self, now: DateTime) -> Status {
        use Status as S;

        let days = self.days_to_expire(now);
        if self.state == State::Cancelled {
            S::Cancelled
        } else if self.state == State::Expired || days < 0 {
            S::Expired
        } else if self.state == State::Claimed {
            S::Claimed
        } else if days <= URGENT_DAYS {
            S::ExpiringUrgent
        } else if days <= SOON_DAYS {
            S::ExpiringSoon
        } else {
            S::Active
        }
    }

    /// Classifies this [`Warranty`] into an expiration urgency [`Tier`] at
    /// the `now` moment.
    ///
    /// [`None`] is returned for cancelled [`Warranty`]s: they have no
    /// expiration left to track.
    #[must_use]
    pub fn tier(&self, now: DateTime) -> Option<Tier> {
        if self.state == State::Cancelled {
            return None;
        }

        let days = self.days_to_expire(now);
        Some(if days < 0 {
            Tier::Overdue
        } else if days <= URGENT_DAYS {
            Tier::Urgent
        } else if days <= SOON_DAYS {
            Tier::Soon
        } else {
            Tier::Distant
        })
    }

    /// Indicates whether a claim may be filed against this [`Warranty`].
    ///
    /// Only the stored [`State`] decides: a date-lapsed [`Warranty`] stays
    /// claimable until its stored [`State`] is switched to
    /// [`State::Expired`].
    #[must_use]
    pub fn is_claimable(&self) -> bool {
        matches!(self.state, State::Active | State::Claimed)
    }

    /// Indicates whether any claim was ever filed against this [`Warranty`].
    #[must_use]
    pub fn has_claims(&self) -> bool {
        !self.claims.is_empty()
    }

    /// Returns a short human-readable label of the covered product.
    #[must_use]
    pub fn product_label(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Checks the integrity of this [`Warranty`]'s record.
    ///
    /// Engine-issued [`Warranty`]s always pass; records assembled by hand or
    /// restored from a legacy store may not. Batch queries skip records
    /// failing this check instead of aborting.
    ///
    /// # Errors
    ///
    /// If the record violates an integrity rule.
    pub fn validate(&self) -> Result<(), IntegrityError> {
        self.terms.check()?;

        if self.expires_at < self.sold_at.coerce() {
            return Err(IntegrityError::ExpiresBeforeSale);
        }

        Ok(())
    }
}

/// ID of a [`Warranty`].
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

/// Brand of the product under a [`Warranty`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Brand(String);

impl Brand {
    /// Creates a new [`Brand`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `brand` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(brand: impl Into<String>) -> Self {
        Self(brand.into())
    }

    /// Creates a new [`Brand`] if the given `brand` is valid.
    #[must_use]
    pub fn new(brand: impl Into<String>) -> Option<Self> {
        let brand = brand.into();
        Self::check(&brand).then_some(Self(brand))
    }

    /// Checks whether the given `brand` is a valid [`Brand`].
    fn check(brand: impl AsRef<str>) -> bool {
        let brand = brand.as_ref();
        brand.trim() == brand && !brand.is_empty() && brand.len() <= 512
    }
}

impl FromStr for Brand {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Brand`")
    }
}

/// Model of the product under a [`Warranty`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Model(String);

impl Model {
    /// Creates a new [`Model`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `model` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(model: impl Into<String>) -> Self {
        Self(model.into())
    }

    /// Creates a new [`Model`] if the given `model` is valid.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Option<Self> {
        let model = model.into();
        Self::check(&model).then_some(Self(model))
    }

    /// Checks whether the given `model` is a valid [`Model`].
    fn check(model: impl AsRef<str>) -> bool {
        let model = model.as_ref();
        model.trim() == model && !model.is_empty() && model.len() <= 512
    }
}

impl FromStr for Model {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Model`")
    }
}

/// Serial number of the product under a [`Warranty`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct SerialNumber(String);

impl SerialNumber {
    /// Creates a new [`SerialNumber`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `serial` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(serial: impl Into<String>) -> Self {
        Self(serial.into())
    }

    /// Creates a new [`SerialNumber`] if the given `serial` is valid.
    #[must_use]
    pub fn new(serial: impl Into<String>) -> Option<Self> {
        let serial = serial.into();
        Self::check(&serial).then_some(Self(serial))
    }

    /// Checks whether the given `serial` is a valid [`SerialNumber`].
    fn check(serial: impl AsRef<str>) -> bool {
        let serial = serial.as_ref();
        serial.trim() == serial && !serial.is_empty() && serial.len() <= 128
    }
}

impl FromStr for SerialNumber {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `SerialNumber`")
    }
}

/// Description of the product under a [`Warranty`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `description` is not empty.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(description: impl Into<String>) -> Self {
        Self(description.into())
    }

    /// Creates a new [`Description`] if the given `description` is valid.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Option<Self> {
        let description = description.into();
        Self::check(&description).then_some(Self(description))
    }

    /// Checks whether the given `description` is a valid [`Description`].
    fn check(description: impl AsRef<str>) -> bool {
        let description = description.as_ref();
        description.trim() == description
            && !description.is_empty()
            && description.len() <= 2048
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Invoice number of the sale a [`Warranty`] was issued at.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    /// Creates a new [`InvoiceNumber`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `number` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Creates a new [`InvoiceNumber`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`InvoiceNumber`].
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        number.trim() == number && !number.is_empty() && number.len() <= 64
    }
}

impl FromStr for InvoiceNumber {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `InvoiceNumber`")
    }
}

/// Sale price of the product under a [`Warranty`].
///
/// A bare non-negative amount: currency and formatting belong to the
/// rendering collaborators, and fleet revenue must stay summable.
#[derive(Clone, Copy, Debug, Display, Eq, Into, Ord, PartialEq, PartialOrd)]
pub struct Price(Decimal);

impl Price {
    /// Creates a new [`Price`] if the given `amount` is not negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (!amount.is_sign_negative()).then_some(Self(amount))
    }

    /// Returns the amount of this [`Price`].
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }
}

/// Number of calendar months a [`Warranty`] covers.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Months(u32);

impl Months {
    /// Creates a new [`Months`] if the given `months` number is positive.
    #[must_use]
    pub const fn new(months: u32) -> Option<Self> {
        if months == 0 {
            None
        } else {
            Some(Self(months))
        }
    }

    /// Returns this [`Months`] number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Number of kilometers a [`Warranty`] covers.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Kilometers(u32);

impl Kilometers {
    /// Creates a new [`Kilometers`] if the given `km` number is positive.
    #[must_use]
    pub const fn new(km: u32) -> Option<Self> {
        if km == 0 {
            None
        } else {
            Some(Self(km))
        }
    }

    /// Returns this [`Kilometers`] number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

define_kind! {
    #[doc = "Category of the product under a [`Warranty`]."]
    enum Category {
        #[doc = "Vehicle battery."]
        Battery = 1,

        #[doc = "Fire extinguisher."]
        FireExtinguisher = 2,

        #[doc = "Engine or gear oil."]
        Oil = 3,

        #[doc = "Oil, air, fuel or cabin filter."]
        Filter = 4,

        #[doc = "Grease or other lubricant."]
        Lubricant = 5,

        #[doc = "Tire."]
        Tire = 6,

        #[doc = "Shock absorber."]
        ShockAbsorber = 7,

        #[doc = "Anything else."]
        Other = 8,
    }
}

define_kind! {
    #[doc = "Stored lifecycle state of a [`Warranty`]."]
    enum State {
        #[doc = "The [`Warranty`] is in force."]
        Active = 1,

        #[doc = "The [`Warranty`] was marked as run out."]
        Expired = 2,

        #[doc = "The [`Warranty`] has at least one claim filed."]
        Claimed = 3,

        #[doc = "The [`Warranty`] was voided and never leaves this state."]
        Cancelled = 4,
    }
}

define_kind! {
    #[doc = "Kind of [`Terms`] a [`Warranty`] is covered by."]
    enum TermKind {
        #[doc = "Coverage for a number of calendar months."]
        DurationMonths = 1,

        #[doc = "Coverage for a number of kilometers driven."]
        DistanceKm = 2,

        #[doc = "Coverage ending at whichever of months or kilometers runs \
                 out first."]
        WhicheverFirst = 3,
    }
}

/// Coverage terms of a [`Warranty`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Terms {
    /// [`TermKind`] of the coverage.
    pub kind: TermKind,

    /// Covered calendar [`Months`], when the [`TermKind`] involves duration.
    pub months: Option<Months>,

    /// Covered [`Kilometers`], when the [`TermKind`] involves distance.
    pub km: Option<Kilometers>,
}

impl Terms {
    /// Creates new [`Terms`] if the given `months` and `km` match the given
    /// [`TermKind`].
    ///
    /// # Errors
    ///
    /// If the combination is incoherent.
    pub fn new(
        kind: TermKind,
        months: Option<Months>,
        km: Option<Kilometers>,
    ) -> Result<Self, InvalidTermsError> {
        let terms = Self { kind, months, km };
        terms.check().map(|()| terms)
    }

    /// Checks whether `months` and `km` of these [`Terms`] match their
    /// [`TermKind`].
    ///
    /// # Errors
    ///
    /// If the combination is incoherent.
    pub fn check(&self) -> Result<(), InvalidTermsError> {
        use InvalidTermsError as E;

        match self.kind {
            TermKind::DurationMonths => {
                if self.months.is_none() {
                    return Err(E::MonthsRequired);
                }
                if self.km.is_some() {
                    return Err(E::KilometersNotAllowed);
                }
            }
            TermKind::DistanceKm => {
                if self.km.is_none() {
                    return Err(E::KilometersRequired);
                }
                if self.months.is_some() {
                    return Err(E::MonthsNotAllowed);
                }
            }
            TermKind::WhicheverFirst => {
                if self.months.is_none() {
                    return Err(E::MonthsRequired);
                }
                if self.km.is_none() {
                    return Err(E::KilometersRequired);
                }
            }
        }

        Ok(())
    }
}

/// Error of [`Terms`] violating their [`TermKind`] coherence.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum InvalidTermsError {
    /// Kilometers are present though the [`TermKind`] forbids them.
    #[display("`Terms` don't allow kilometers")]
    KilometersNotAllowed,

    /// Kilometers are missing though the [`TermKind`] requires them.
    #[display("`Terms` require kilometers")]
    KilometersRequired,

    /// Months are present though the [`TermKind`] forbids them.
    #[display("`Terms` don't allow months")]
    MonthsNotAllowed,

    /// Months are missing though the [`TermKind`] requires them.
    #[display("`Terms` require months")]
    MonthsRequired,
}

/// Effective status of a [`Warranty`] at some moment, resolved from its
/// stored [`State`] and the calendar.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Status {
    /// The [`Warranty`] is in force with more than [`SOON_DAYS`] left.
    Active = 1,

    /// The [`Warranty`] expires within [`SOON_DAYS`].
    ExpiringSoon = 2,

    /// The [`Warranty`] expires within [`URGENT_DAYS`].
    ExpiringUrgent = 3,

    /// The [`Warranty`] has claims and hasn't lapsed yet.
    Claimed = 4,

    /// The [`Warranty`] has run out, by its stored [`State`] or by date.
    Expired = 5,

    /// The [`Warranty`] was voided.
    Cancelled = 6,
}

/// Expiration urgency tier of a [`Warranty`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Tier {
    /// Already past the expiration date.
    Overdue = 1,

    /// Expires within [`URGENT_DAYS`].
    Urgent = 2,

    /// Expires within [`SOON_DAYS`], but not within [`URGENT_DAYS`].
    Soon = 3,

    /// Expires later than [`SOON_DAYS`].
    Distant = 4,
}

/// Error of a [`Warranty`] record failing an integrity check.
#[derive(Clone, Copy, Debug, Display, Eq, Error, From, PartialEq)]
pub enum IntegrityError {
    /// The [`Warranty`] expires before being sold.
    #[display("`Warranty` expires before being sold")]
    ExpiresBeforeSale,

    /// [`Terms`] of the [`Warranty`] violate their [`TermKind`] coherence.
    #[display("invalid `Terms`: {_0}")]
    #[from]
    IncoherentTerms(InvalidTermsError),
}

/// [`DateTime`] when a [`Warranty`] was created.
pub type CreationDateTime = DateTimeOf<(Warranty, unit::Creation)>;

/// [`DateTime`] when a [`Warranty`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Warranty, unit::Update)>;

/// Marker type indicating the sale of a [`Warranty`]'s covered product.
#[derive(Clone, Copy, Debug)]
pub struct Sale;

/// [`DateTime`] when a [`Warranty`]'s covered product was sold.
pub type SaleDateTime = DateTimeOf<(Warranty, Sale)>;

/// Marker type indicating [`Warranty`] expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// [`DateTime`] when a [`Warranty`] expires.
pub type ExpirationDateTime = DateTimeOf<(Warranty, Expiration)>;

#[cfg(test)]
mod spec {
    use common::DateTime;
    use rust_decimal::Decimal;

    use crate::domain::{customer, employee, shop, Customer};

    use super::{
        Brand, Category, Id, IntegrityError, InvalidTermsError, Kilometers,
        Model, Months, Price, State, Status, TermKind, Terms, Tier, Warranty,
    };

    fn at(s: &str) -> DateTime {
        DateTime::from_rfc3339(s).unwrap()
    }

    fn warranty(sold_at: &str, expires_at: &str, state: State) -> Warranty {
        Warranty {
            id: Id::new(),
            shop_id: shop::Id::new(),
            category: Category::Battery,
            brand: Brand::new("Willard").unwrap(),
            model: Model::new("UB 620").unwrap(),
            serial_number: None,
            description: None,
            sold_at: at(sold_at).coerce(),
            price: Price::new(Decimal::new(100, 0)).unwrap(),
            invoice_number: None,
            seller_id: employee::Id::new(),
            seller_name: employee::Name::new("Luis").unwrap(),
            customer: Customer {
                name: customer::Name::new("Ana Diaz").unwrap(),
                phone: None,
                email: None,
            },
            vehicle: None,
            terms: Terms::new(TermKind::DurationMonths, Months::new(12), None)
                .unwrap(),
            expires_at: at(expires_at).coerce(),
            state,
            claims: vec![],
            created_at: at(sold_at).coerce(),
            created_by: employee::Id::new(),
            updated_at: at(sold_at).coerce(),
        }
    }

    #[test]
    fn counts_days_and_reads_urgent_near_expiration() {
        let w = warranty(
            "2024-01-01T00:00:00Z",
            "2025-01-01T00:00:00Z",
            State::Active,
        );
        let now = at("2024-12-28T00:00:00Z");

        assert_eq!(w.days_to_expire(now), 4);
        assert_eq!(w.effective_status(now), Status::ExpiringUrgent);
        assert_eq!(w.tier(now), Some(Tier::Urgent));
    }

    #[test]
    fn reads_expired_by_date_even_when_claimed() {
        let w = warranty(
            "2024-01-01T00:00:00Z",
            "2025-01-01T00:00:00Z",
            State::Claimed,
        );
        let now = at("2025-01-15T00:00:00Z");

        assert_eq!(w.days_to_expire(now), -14);
        assert_eq!(w.effective_status(now), Status::Expired);
    }

    #[test]
    fn cancelled_wins_over_every_other_signal() {
        let lapsed = warranty(
            "2024-01-01T00:00:00Z",
            "2024-02-01T00:00:00Z",
            State::Cancelled,
        );
        let current = warranty(
            "2025-01-01T00:00:00Z",
            "2026-01-01T00:00:00Z",
            State::Cancelled,
        );
        let now = at("2025-03-10T00:00:00Z");

        assert_eq!(lapsed.effective_status(now), Status::Cancelled);
        assert_eq!(current.effective_status(now), Status::Cancelled);
        assert_eq!(lapsed.tier(now), None);
        assert_eq!(current.tier(now), None);
    }

    #[test]
    fn stored_expired_reads_expired_despite_future_date() {
        let w = warranty(
            "2025-01-01T00:00:00Z",
            "2026-01-01T00:00:00Z",
            State::Expired,
        );

        assert_eq!(
            w.effective_status(at("2025-03-10T00:00:00Z")),
            Status::Expired,
        );
    }

    #[test]
    fn claimed_reads_claimed_until_the_date_lapses() {
        let w = warranty(
            "2025-01-01T00:00:00Z",
            "2026-01-01T00:00:00Z",
            State::Claimed,
        );

        assert_eq!(
            w.effective_status(at("2025-03-10T00:00:00Z")),
            Status::Claimed,
        );
    }

    #[test]
    fn grades_active_warranties_by_days_left() {
        let now = at("2025-03-10T00:00:00Z");
        let graded = [
            ("2025-03-10T00:00:00Z", Status::ExpiringUrgent),
            ("2025-03-17T00:00:00Z", Status::ExpiringUrgent),
            ("2025-03-18T00:00:00Z", Status::ExpiringSoon),
            ("2025-04-09T00:00:00Z", Status::ExpiringSoon),
            ("2025-04-10T00:00:00Z", Status::Active),
        ];

        for (expires_at, expected) in graded {
            let w = warranty("2025-01-01T00:00:00Z", expires_at, State::Active);
            assert_eq!(
                w.effective_status(now),
                expected,
                "expires at {expires_at}",
            );
        }
    }

    #[test]
    fn partitions_tiers_by_days_left() {
        let now = at("2025-03-10T00:00:00Z");
        let tiered = [
            ("2025-03-09T00:00:00Z", Tier::Overdue),
            ("2025-03-10T00:00:00Z", Tier::Urgent),
            ("2025-03-17T00:00:00Z", Tier::Urgent),
            ("2025-03-18T00:00:00Z", Tier::Soon),
            ("2025-04-09T00:00:00Z", Tier::Soon),
            ("2025-04-10T00:00:00Z", Tier::Distant),
        ];

        for (expires_at, expected) in tiered {
            let w = warranty("2024-01-01T00:00:00Z", expires_at, State::Active);
            assert_eq!(w.tier(now), Some(expected), "expires at {expires_at}");
        }
    }

    #[test]
    fn claimable_by_stored_state_only() {
        let claimable = |state| {
            warranty("2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z", state)
                .is_claimable()
        };

        assert!(claimable(State::Active));
        assert!(claimable(State::Claimed));
        assert!(!claimable(State::Expired));
        assert!(!claimable(State::Cancelled));
    }

    #[test]
    fn enforces_term_coherence() {
        use InvalidTermsError as E;

        let months = Months::new(12);
        let km = Kilometers::new(10_000);

        assert!(Terms::new(TermKind::DurationMonths, months, None).is_ok());
        assert!(Terms::new(TermKind::DistanceKm, None, km).is_ok());
        assert!(Terms::new(TermKind::WhicheverFirst, months, km).is_ok());

        assert_eq!(
            Terms::new(TermKind::DurationMonths, None, None),
            Err(E::MonthsRequired),
        );
        assert_eq!(
            Terms::new(TermKind::DurationMonths, months, km),
            Err(E::KilometersNotAllowed),
        );
        assert_eq!(
            Terms::new(TermKind::DistanceKm, None, None),
            Err(E::KilometersRequired),
        );
        assert_eq!(
            Terms::new(TermKind::DistanceKm, months, km),
            Err(E::MonthsNotAllowed),
        );
        assert_eq!(
            Terms::new(TermKind::WhicheverFirst, None, km),
            Err(E::MonthsRequired),
        );
        assert_eq!(
            Terms::new(TermKind::WhicheverFirst, months, None),
            Err(E::KilometersRequired),
        );
    }

    #[test]
    fn validates_record_integrity() {
        let sound = warranty(
            "2025-01-01T00:00:00Z",
            "2026-01-01T00:00:00Z",
            State::Active,
        );
        assert_eq!(sound.validate(), Ok(()));

        let mut incoherent = sound.clone();
        incoherent.terms.km = Kilometers::new(10_000);
        assert_eq!(
            incoherent.validate(),
            Err(IntegrityError::IncoherentTerms(
                InvalidTermsError::KilometersNotAllowed,
            )),
        );

        let inverted = warranty(
            "2026-01-01T00:00:00Z",
            "2025-01-01T00:00:00Z",
            State::Active,
        );
        assert_eq!(inverted.validate(), Err(IntegrityError::ExpiresBeforeSale));
    }

    #[test]
    fn rejects_nonpositive_numbers() {
        assert!(Months::new(0).is_none());
        assert!(Months::new(1).is_some());
        assert!(Kilometers::new(0).is_none());
        assert!(Price::new(Decimal::new(-1, 0)).is_none());
        assert!(Price::new(Decimal::ZERO).is_some());
    }

    #[test]
    fn labels_product_with_brand_and_model() {
        let w = warranty(
            "2025-01-01T00:00:00Z",
            "2026-01-01T00:00:00Z",
            State::Active,
        );

        assert_eq!(w.product_label(), "Willard UB 620");
    }
}
