//! [`Warranty`] read model definition.

#[cfg(doc)]
use crate::domain::Warranty;

pub mod list {
    //! [`Warranty`]s list definitions.

    use std::ops::RangeInclusive;

    use crate::domain::{warranty, Warranty};

    /// Free-text needle searched over the textual fields of a [`Warranty`].
    ///
    /// Normalized once at construction. Matching is a case-insensitive
    /// substring test against the customer name, the vehicle plate, and the
    /// product brand, model and description.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct TextQuery(String);

    impl TextQuery {
        /// Creates a new [`TextQuery`] if the given `needle` is not blank.
        #[must_use]
        pub fn new(needle: impl AsRef<str>) -> Option<Self> {
            let needle = needle.as_ref().trim().to_lowercase();
            (!needle.is_empty()).then_some(Self(needle))
        }

        /// Indicates whether the given [`Warranty`] matches this needle.
        #[must_use]
        pub fn matches(&self, warranty: &Warranty) -> bool {
            let fields: [Option<&str>; 5] = [
                Some(warranty.customer.name.as_ref()),
                warranty.vehicle.as_ref().map(|v| v.plate.as_ref()),
                Some(warranty.brand.as_ref()),
                Some(warranty.model.as_ref()),
                warranty.description.as_ref().map(AsRef::as_ref),
            ];
            fields
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&self.0))
        }
    }

    /// Structured filter for [`Warranty`] lists.
    ///
    /// Set fields are conjuncted; unset ones match everything.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`warranty::Category`] to filter by.
        pub category: Option<warranty::Category>,

        /// Stored [`warranty::State`] to filter by.
        pub state: Option<warranty::State>,

        /// Sale [`DateTime`] range to filter by, inclusive on both ends.
        ///
        /// [`DateTime`]: common::DateTime
        pub sold: Option<RangeInclusive<warranty::SaleDateTime>>,
    }

    impl Filter {
        /// Indicates whether the given [`Warranty`] passes this [`Filter`].
        #[must_use]
        pub fn matches(&self, warranty: &Warranty) -> bool {
            self.category.map_or(true, |c| c == warranty.category)
                && self.state.map_or(true, |s| s == warranty.state)
                && self
                    .sold
                    .as_ref()
                    .map_or(true, |sold| sold.contains(&warranty.sold_at))
        }
    }
}
