//! [`PurchaseRequest`] definitions.


#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{plot, profile};
#[cfg(doc)]
use crate::domain::{Plot, Profile};

/// Client request to purchase a [`Plot`], awaiting staff review.
#[derive(Clone, Debug)]
pub struct PurchaseRequest {
    /// ID of this [`PurchaseRequest`].
    pub id: Id,

    /// ID of the [`Profile`] requesting the purchase.
    pub client_id: profile::Id,

    /// ID of the [`Plot`] requested.
    pub plot_id: plot::Id,

    /// [`PlanLabel`] naming the payment plan the client asked for.
    pub plan_label: PlanLabel,

    /// [`Status`] of this [`PurchaseRequest`].
    pub status: Status,

    /// [`DateTime`] when this [`PurchaseRequest`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`PurchaseRequest`].
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

/// Label of the payment plan a [`PurchaseRequest`] asks for, matching an
/// [`InstallmentTemplate`] name.
///
/// [`InstallmentTemplate`]: crate::domain::InstallmentTemplate
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct PlanLabel(String);

impl PlanLabel {
    /// Creates a new [`PlanLabel`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `label` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Creates a new [`PlanLabel`] if the given `label` is valid.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Option<Self> {
        let label = label.into();
        Self::check(&label).then_some(Self(label))
    }

    /// Checks whether the given `label` is a valid [`PlanLabel`].
    fn check(label: impl AsRef<str>) -> bool {
        let label = label.as_ref();
        label.trim() == label && !label.is_empty() && label.len() <= 512
    }
}

impl FromStr for PlanLabel {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `PlanLabel`")
    }
}

define_kind! {
    #[doc = "Status of a [`PurchaseRequest`]."]
    enum Status {
        #[doc = "The [`PurchaseRequest`] is awaiting review."]
        Pending,

        #[doc = "The [`PurchaseRequest`] was approved and the sale executed."]
        Approved,

        #[doc = "The [`PurchaseRequest`] was rejected."]
        Rejected,
    }
}

impl Status {
    /// Indicates whether this [`Status`] is final.
    #[must_use]
    pub fn is_final(self) -> bool {
        match self {
            Self::Approved | Self::Rejected => true,
            Self::Pending => false,
        }
    }
}

/// [`DateTime`] when a [`PurchaseRequest`] was created.
pub type CreationDateTime = DateTimeOf<(PurchaseRequest, unit::Creation)>;
