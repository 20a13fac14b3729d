//! Date and time utilities.

use std::{cmp::Ordering, marker::PhantomData, ops, time::Duration};

use derive_more::{Debug, Display, Error};
use time::{format_description::well_known::Rfc3339, UtcOffset};

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// A [`DateTime`] representing the Unix epoch.
    pub const UNIX_EPOCH: Self = Self {
        inner: time::OffsetDateTime::UNIX_EPOCH,
        _of: PhantomData,
    };

    /// Creates a new [`DateTime`] representing the current date and time.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn now() -> Self {
        let inner = time::OffsetDateTime::now_utc();
        Self {
            _of: PhantomData,
            inner: inner
                .replace_microsecond(inner.microsecond())
                .expect("infallible"),
        }
    }

    /// Creates a new [`DateTime`] from the provided [`UNIX_EPOCH`] timestamp.
    ///
    /// [`None`] is returned if the timestamp is invalid.
    ///
    /// [`UNIX_EPOCH`]: Self::UNIX_EPOCH
    #[must_use]
    pub fn from_unix_timestamp(timestamp: i64) -> Option<Self> {
        Some(Self {
            inner: time::OffsetDateTime::from_unix_timestamp(timestamp).ok()?,
            _of: PhantomData,
        })
    }

    /// Returns the [`UNIX_EPOCH`] timestamp of this [`DateTime`].
    ///
    /// [`UNIX_EPOCH`]: Self::UNIX_EPOCH
    #[must_use]
    pub fn unix_timestamp(&self) -> i64 {
        self.inner.unix_timestamp()
    }

    /// Creates a new [`DateTime`] from the provided [RFC 3339] string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        use ParseError as E;

        time::OffsetDateTime::parse(input, &Rfc3339)
            .map_err(E::Parse)?
            .try_into()
            .map_err(E::ComponentRange)
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner.format(&Rfc3339).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 3339: {e}")
        })
    }

    /// Returns the number of whole days from this [`DateTime`] until the
    /// `other` one, counting any started day as a whole one.
    ///
    /// The result is negative whenever the `other` [`DateTime`] lies a full
    /// day (or more) in the past of this one.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn whole_days_until<OtherOf: ?Sized>(
        self,
        other: DateTimeOf<OtherOf>,
    ) -> i64 {
        /// Number of nanoseconds in a single day.
        const NANOS_PER_DAY: i128 = 86_400_000_000_000;

        let nanos = (other.inner - self.inner).whole_nanoseconds();
        let days = nanos.div_euclid(NANOS_PER_DAY)
            + i128::from(nanos.rem_euclid(NANOS_PER_DAY) != 0);
        i64::try_from(days).expect("infallible")
    }

    /// Adds the provided number of calendar `months` to this [`DateTime`],
    /// clamping the day to the last one of the resulting month whenever the
    /// original day doesn't exist in it.
    ///
    /// [`None`] is returned if the resulting date is unrepresentable.
    #[must_use]
    pub fn checked_add_months(self, months: u32) -> Option<Self> {
        let date = self.inner.date();
        let month0 = i64::from(u8::from(date.month())) - 1 + i64::from(months);
        let year = i32::try_from(
            i64::from(date.year()).checked_add(month0.div_euclid(12))?,
        )
        .ok()?;
        let month =
            time::Month::try_from(u8::try_from(month0.rem_euclid(12)).ok()? + 1)
                .ok()?;
        let day = date.day().min(month.length(year));
        Some(Self {
            inner: self.inner.replace_date(
                time::Date::from_calendar_date(year, month, day).ok()?,
            ),
            _of: PhantomData,
        })
    }

    /// Subtracts the provided number of whole `days` from this [`DateTime`].
    ///
    /// [`None`] is returned if the resulting date is unrepresentable.
    #[must_use]
    pub fn checked_sub_days(self, days: u32) -> Option<Self> {
        Some(Self {
            inner: self
                .inner
                .checked_sub(time::Duration::days(i64::from(days)))?,
            _of: PhantomData,
        })
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing [`DateTime`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Failed to parse the string into an [`DateTime`].
    Parse(time::error::Parse),

    /// Parsed [`DateTime`] has an out of range component.
    ComponentRange(time::error::ComponentRange),
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> TryFrom<time::OffsetDateTime> for DateTimeOf<Of> {
    type Error = time::error::ComponentRange;

    fn try_from(dt: time::OffsetDateTime) -> Result<Self, Self::Error> {
        dt.to_offset(UtcOffset::UTC)
            .replace_microsecond(dt.microsecond())
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for time::OffsetDateTime {
    fn from(dt: DateTimeOf<Of>) -> Self {
        dt.inner
    }
}

impl<Of: ?Sized> ops::Add<Duration> for DateTimeOf<Of> {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self {
            inner: self.inner + rhs,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> ops::Sub<Duration> for DateTimeOf<Of> {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self {
            inner: self.inner - rhs,
            _of: PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    //! Module providing integration with [`serde`] crate.

    use super::DateTimeOf;

    pub mod unix_timestamp {
        //! Module providing serialization and deserialization of [`DateTimeOf`]
        //! as a Unix timestamp.

        use serde::{de::Error, Deserialize, Deserializer, Serializer};

        use super::DateTimeOf;

        /// Serializes the [`DateTimeOf`] as a Unix timestamp.
        ///
        /// # Errors
        ///
        /// Returns an error if the timestamp is invalid.
        pub fn serialize<Of, S>(
            dt: &DateTimeOf<Of>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
            Of: ?Sized,
        {
            serializer.serialize_i64(dt.unix_timestamp())
        }

        /// Deserializes the Unix timestamp into a [`DateTimeOf`].
        ///
        /// # Errors
        ///
        /// Returns an error if the timestamp is invalid.
        pub fn deserialize<'de, D, Of>(
            deserializer: D,
        ) -> Result<DateTimeOf<Of>, D::Error>
        where
            D: Deserializer<'de>,
            Of: ?Sized,
        {
            DateTimeOf::from_unix_timestamp(i64::deserialize(deserializer)?)
                .ok_or_else(|| Error::custom("invalid timestamp"))
        }
    }
}

#[cfg(test)]
mod spec {
    use super::DateTime;

    fn at(s: &str) -> DateTime {
        DateTime::from_rfc3339(s).unwrap()
    }

    #[test]
    fn counts_zero_days_for_same_instant() {
        let now = at("2025-03-10T12:00:00Z");

        assert_eq!(now.whole_days_until(now), 0);
    }

    #[test]
    fn counts_started_day_as_whole() {
        let now = at("2025-03-10T12:00:00Z");

        assert_eq!(now.whole_days_until(at("2025-03-10T12:00:01Z")), 1);
        assert_eq!(now.whole_days_until(at("2025-03-11T11:59:59Z")), 1);
        assert_eq!(now.whole_days_until(at("2025-03-11T12:00:00Z")), 1);
        assert_eq!(now.whole_days_until(at("2025-03-11T12:00:01Z")), 2);
    }

    #[test]
    fn counts_past_instants_negatively() {
        let now = at("2025-03-10T12:00:00Z");

        assert_eq!(now.whole_days_until(at("2025-03-10T11:59:59Z")), 0);
        assert_eq!(now.whole_days_until(at("2025-03-09T12:00:00Z")), -1);
        assert_eq!(now.whole_days_until(at("2025-03-09T11:59:59Z")), -1);
        assert_eq!(now.whole_days_until(at("2025-03-08T12:00:00Z")), -2);
    }

    #[test]
    fn adds_months_preserving_day_and_time() {
        let dt = at("2025-01-15T09:30:00Z");

        assert_eq!(
            dt.checked_add_months(3),
            Some(at("2025-04-15T09:30:00Z")),
        );
        assert_eq!(
            dt.checked_add_months(12),
            Some(at("2026-01-15T09:30:00Z")),
        );
        assert_eq!(dt.checked_add_months(0), Some(dt));
    }

    #[test]
    fn adds_months_across_year_boundary() {
        assert_eq!(
            at("2024-12-05T00:00:00Z").checked_add_months(2),
            Some(at("2025-02-05T00:00:00Z")),
        );
    }

    #[test]
    fn clamps_added_months_to_month_end() {
        assert_eq!(
            at("2025-01-31T10:00:00Z").checked_add_months(1),
            Some(at("2025-02-28T10:00:00Z")),
        );
        assert_eq!(
            at("2024-01-31T10:00:00Z").checked_add_months(1),
            Some(at("2024-02-29T10:00:00Z")),
        );
        assert_eq!(
            at("2025-08-31T10:00:00Z").checked_add_months(3),
            Some(at("2025-11-30T10:00:00Z")),
        );
    }

    #[test]
    fn refuses_unrepresentable_month_addition() {
        assert_eq!(
            at("2025-01-15T00:00:00Z").checked_add_months(12 * 100_000),
            None,
        );
    }

    #[test]
    fn subtracts_whole_days() {
        let dt = at("2025-06-01T00:00:00Z");

        assert_eq!(dt.checked_sub_days(7), Some(at("2025-05-25T00:00:00Z")));
        assert_eq!(dt.checked_sub_days(30), Some(at("2025-05-02T00:00:00Z")));
        assert_eq!(dt.checked_sub_days(0), Some(dt));
    }
}
