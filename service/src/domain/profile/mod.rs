//! [`Profile`] definitions.

pub mod session;

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use self::session::Session;

/// Registered person: a member of the society staff or a client.
#[derive(Clone, Debug, From)]
pub struct Profile {
    /// ID of this [`Profile`].
    pub id: Id,

    /// [`Name`] of this [`Profile`].
    pub name: Name,

    /// [`Cnic`] of this [`Profile`].
    pub cnic: Cnic,

    /// [`Role`] of this [`Profile`].
    pub role: Role,

    /// [`BiometricRef`] captured for this [`Profile`], if any.
    pub biometric_ref: Option<BiometricRef>,

    /// Whether the biometric identity of this [`Profile`] was verified.
    pub biometric_verified: bool,

    /// [`DateTime`] when this [`Profile`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Profile`].
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

/// Name of a [`Profile`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
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

/// [CNIC] (national identity card number) of a [`Profile`].
///
/// [CNIC]: https://en.wikipedia.org/wiki/CNIC_(Pakistan)
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Cnic(String);

impl Cnic {
    /// Creates a new [`Cnic`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `cnic` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(cnic: impl Into<String>) -> Self {
        Self(cnic.into())
    }

    /// Creates a new [`Cnic`] if the given `cnic` is valid.
    #[must_use]
    pub fn new(cnic: impl Into<String>) -> Option<Self> {
        let cnic = cnic.into();
        Self::check(&cnic).then_some(Self(cnic))
    }

    /// Checks whether the given `cnic` is a valid [`Cnic`].
    ///
    /// The expected format is `12345-1234567-1`.
    fn check(cnic: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Cnic`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\d{5}-\d{7}-\d$").expect("valid regex")
        });

        REGEX.is_match(cnic.as_ref())
    }
}

impl FromStr for Cnic {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Cnic`")
    }
}

/// Reference to a captured biometric record of a [`Profile`] in an external
/// verification system.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct BiometricRef(String);

impl BiometricRef {
    /// Creates a new [`BiometricRef`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `reference` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Creates a new [`BiometricRef`] if the given `reference` is valid.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Option<Self> {
        let reference = reference.into();
        Self::check(&reference).then_some(Self(reference))
    }

    /// Checks whether the given `reference` is a valid [`BiometricRef`].
    fn check(reference: impl AsRef<str>) -> bool {
        let reference = reference.as_ref();
        reference.trim() == reference
            && !reference.is_empty()
            && reference.len() <= 512
    }
}

impl FromStr for BiometricRef {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `BiometricRef`")
    }
}

define_kind! {
    #[doc = "Role of a [`Profile`]."]
    enum Role {
        #[doc = "Full access to every operation."]
        Superadmin,

        #[doc = "Manages plots and sales."]
        Manager,

        #[doc = "Manages installments and payments."]
        Accountant,

        #[doc = "Society client owning or purchasing plots."]
        Client,
    }
}

/// [`DateTime`] when a [`Profile`] was created.
pub type CreationDateTime = DateTimeOf<(Profile, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::Cnic;

    #[test]
    fn cnic_accepts_valid_format() {
        assert!(Cnic::new("12345-1234567-1").is_some());
        assert!(Cnic::new("00000-0000000-0").is_some());
    }

    #[test]
    fn cnic_rejects_invalid_format() {
        assert!(Cnic::new("12345-1234567").is_none());
        assert!(Cnic::new("123451234567-1").is_none());
        assert!(Cnic::new("1234a-1234567-1").is_none());
        assert!(Cnic::new(" 12345-1234567-1").is_none());
        assert!(Cnic::new("").is_none());
    }
}
