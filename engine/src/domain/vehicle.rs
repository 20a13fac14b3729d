//! [`Vehicle`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};

#[cfg(doc)]
use crate::domain::Warranty;

/// Vehicle the product under a [`Warranty`] was installed on.
///
/// The whole group is optional on a [`Warranty`] (not every product relates
/// to a vehicle), but a recorded [`Vehicle`] always carries its [`Plate`].
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// [`Plate`] of this [`Vehicle`].
    pub plate: Plate,

    /// [`Brand`] of this [`Vehicle`].
    pub brand: Option<Brand>,

    /// [`Model`] of this [`Vehicle`].
    pub model: Option<Model>,

    /// [`Odometer`] reading at the moment of the sale.
    ///
    /// A snapshot only: nothing in this engine ever tracks the current
    /// mileage of a [`Vehicle`].
    pub odometer: Option<Odometer>,
}

/// License plate of a [`Vehicle`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Plate(String);

impl Plate {
    /// Creates a new [`Plate`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `plate` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(plate: impl Into<String>) -> Self {
        Self(plate.into())
    }

    /// Creates a new [`Plate`] if the given `plate` is valid.
    #[must_use]
    pub fn new(plate: impl Into<String>) -> Option<Self> {
        let plate = plate.into();
        Self::check(&plate).then_some(Self(plate))
    }

    /// Checks whether the given `plate` is a valid [`Plate`].
    fn check(plate: impl AsRef<str>) -> bool {
        let plate = plate.as_ref();
        plate.trim() == plate && !plate.is_empty() && plate.len() <= 32
    }
}

impl FromStr for Plate {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Plate`")
    }
}

/// Brand of a [`Vehicle`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
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

/// Model of a [`Vehicle`].
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

/// Odometer reading of a [`Vehicle`], in kilometers.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, Hash, Into, Ord, PartialEq,
    PartialOrd,
)]
pub struct Odometer(u32);
