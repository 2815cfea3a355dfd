//! [`Installment`]-related read definitions.

use common::Money;

use crate::domain::{installment, plot, profile};
#[cfg(doc)]
use crate::domain::{Installment, Plot, Profile};

/// Guarded settlement of an [`Installment`].
///
/// Applies only while the [`Installment`] is not [`installment::Status::Paid`]
/// yet.
#[derive(Clone, Copy, Debug)]
pub struct Settle {
    /// ID of the [`Installment`] being settled.
    pub id: installment::Id,

    /// [`DateTime`] when the payment was received.
    ///
    /// [`DateTime`]: common::DateTime
    pub paid_at: installment::PaymentDateTime,
}

/// Guarded amendment of an [`Installment`] due date and amount.
///
/// Applies only while the [`Installment`] is not [`installment::Status::Paid`]
/// yet.
#[derive(Clone, Copy, Debug)]
pub struct Amend {
    /// ID of the [`Installment`] being amended.
    pub id: installment::Id,

    /// New due [`DateTime`] of the [`Installment`].
    ///
    /// [`DateTime`]: common::DateTime
    pub due_at: installment::DueDateTime,

    /// New amount of the [`Installment`].
    pub amount: Money,
}

/// Reassignment of all [`installment::Status::Pending`] [`Installment`]s of a
/// [`Plot`] to another [`Profile`].
#[derive(Clone, Copy, Debug)]
pub struct Reassign {
    /// ID of the [`Plot`] whose [`Installment`]s are reassigned.
    pub plot_id: plot::Id,

    /// ID of the [`Profile`] taking over the obligations.
    pub to: profile::Id,
}

/// Marking of all [`installment::Status::Pending`] [`Installment`]s due
/// before the deadline as [`installment::Status::Overdue`].
#[derive(Clone, Copy, Debug)]
pub struct FlagOverdue {
    /// Due [`DateTime`] before which unpaid [`Installment`]s become overdue.
    ///
    /// [`DateTime`]: common::DateTime
    pub deadline: installment::DueDateTime,
}

pub mod list {
    //! [`Installment`]s list definitions.

    use crate::domain::{installment, plot, profile};
    #[cfg(doc)]
    use crate::domain::{Installment, Plot, Profile};

    /// Filter for listing [`Installment`]s.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`Plot`] to filter by.
        pub plot_id: Option<plot::Id>,

        /// Obliged [`Profile`] to filter by.
        pub profile_id: Option<profile::Id>,

        /// [`installment::Status`] to filter by.
        pub status: Option<installment::Status>,
    }
}
