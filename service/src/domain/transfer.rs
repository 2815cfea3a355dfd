//! [`Transfer`] definitions.


use common::{unit, DateTime, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use xxhash_rust::xxh3;

use crate::domain::{plot, profile};
#[cfg(doc)]
use crate::domain::{Plot, Profile};

/// Immutable record of a [`Plot`] ownership change.
#[derive(Clone, Debug)]
pub struct Transfer {
    /// ID of this [`Transfer`].
    pub id: Id,

    /// ID of the [`Plot`] whose ownership changed.
    pub plot_id: plot::Id,

    /// ID of the [`Profile`] the [`Plot`] was transferred from.
    ///
    /// [`None`] when the [`Plot`] had no owner yet.
    pub from: Option<profile::Id>,

    /// ID of the [`Profile`] the [`Plot`] was transferred to.
    pub to: profile::Id,

    /// Fee charged for this [`Transfer`].
    pub fee: Money,

    /// Human-readable [`Number`] of this [`Transfer`], unique within the
    /// society.
    pub number: Number,

    /// [`DateTime`] when this [`Transfer`] was recorded.
    pub created_at: CreationDateTime,
}

/// ID of a [`Transfer`].
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

/// Human-readable number of a [`Transfer`] (like `TRN-1A2B3C4D-1724630400`).
///
/// Uniqueness is enforced by the database, not by the generation scheme.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Number(String);

impl Number {
    /// Creates a new [`Number`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `num` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(num: impl Into<String>) -> Self {
        Self(num.into())
    }

    /// Creates a new [`Number`] if the given `num` is valid.
    #[must_use]
    pub fn new(num: impl Into<String>) -> Option<Self> {
        let num = num.into();
        Self::check(&num).then_some(Self(num))
    }

    /// Generates a new [`Number`] for a [`Transfer`] of the given [`Plot`]
    /// recorded at the given [`DateTime`].
    #[must_use]
    pub fn generate(plot_id: plot::Id, at: DateTime) -> Self {
        let digest = xxh3::xxh3_64(Uuid::from(plot_id).as_bytes());
        #[expect(clippy::cast_possible_truncation, reason = "intended")]
        let fragment = digest as u32;
        Self(format!("TRN-{fragment:08X}-{}", at.unix_timestamp()))
    }

    /// Checks whether the given `num` is a valid [`Number`].
    fn check(num: impl AsRef<str>) -> bool {
        let num = num.as_ref();
        num.starts_with("TRN-") && num.len() <= 64
    }
}

impl FromStr for Number {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Number`")
    }
}

/// [`DateTime`] when a [`Transfer`] was recorded.
pub type CreationDateTime = DateTimeOf<(Transfer, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::domain::plot;

    use super::Number;

    #[test]
    fn generated_number_matches_format() {
        let at = DateTime::from_rfc3339("2024-08-26T00:00:00Z").unwrap();
        let number = Number::generate(plot::Id::new(), at);

        let mut parts = AsRef::<str>::as_ref(&number).splitn(3, '-');
        assert_eq!(parts.next(), Some("TRN"));

        let fragment = parts.next().unwrap();
        assert_eq!(fragment.len(), 8);
        assert!(fragment.chars().all(|c| c.is_ascii_hexdigit()));

        let timestamp = parts.next().unwrap();
        assert_eq!(timestamp, at.unix_timestamp().to_string());
    }

    #[test]
    fn generated_number_is_stable_for_same_plot_and_time() {
        let at = DateTime::from_rfc3339("2024-08-26T00:00:00Z").unwrap();
        let plot_id = plot::Id::new();

        assert_eq!(
            Number::generate(plot_id, at),
            Number::generate(plot_id, at),
        );
    }
}
