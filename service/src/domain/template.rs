//! [`InstallmentTemplate`] definitions.


#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Percent};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Installment;

/// Reusable payment plan an [`Installment`] ledger is generated from.
#[derive(Clone, Debug)]
pub struct InstallmentTemplate {
    /// ID of this [`InstallmentTemplate`].
    pub id: Id,

    /// [`Name`] of this [`InstallmentTemplate`], unique within the society.
    pub name: Name,

    /// Share of the price paid upfront.
    pub down_payment: Percent,

    /// Number of monthly [`Installment`]s the remainder is split into.
    pub months: TotalMonths,

    /// [`DateTime`] when this [`InstallmentTemplate`] was created.
    pub created_at: CreationDateTime,
}

/// ID of an [`InstallmentTemplate`].
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
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name of an [`InstallmentTemplate`] (like `5 Marla - 2 Years`).
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Number of monthly [`Installment`]s of an [`InstallmentTemplate`].
///
/// Always at least `1`.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, PartialEq)]
pub struct TotalMonths(u32);

impl TotalMonths {
    /// Creates a new [`TotalMonths`] if the given `months` is at least `1`.
    #[must_use]
    pub fn new(months: u32) -> Option<Self> {
        (months >= 1).then_some(Self(months))
    }

    /// Creates a new [`TotalMonths`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided `months` must be at least `1`.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(months: u32) -> Self {
        Self(months)
    }

    /// Returns the underlying number of months.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl FromStr for TotalMonths {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `TotalMonths`")
    }
}

/// [`DateTime`] when an [`InstallmentTemplate`] was created.
pub type CreationDateTime = DateTimeOf<(InstallmentTemplate, unit::Creation)>;
