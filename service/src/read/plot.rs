//! [`Plot`]-related read definitions.

use crate::domain::{plot, profile};
#[cfg(doc)]
use crate::domain::{Plot, Profile};

/// Guarded status change of a [`Plot`] to [`plot::Status::Sold`].
///
/// Applies only while the [`Plot`] still has the expected [`plot::Status`],
/// so a concurrent sale of the same [`Plot`] loses the race instead of
/// double-selling it.
#[derive(Clone, Copy, Debug)]
pub struct Sold {
    /// ID of the [`Plot`] being sold.
    pub id: plot::Id,

    /// ID of the [`Profile`] becoming the owner.
    pub owner_id: profile::Id,

    /// [`plot::Status`] the [`Plot`] is expected to have.
    pub was: plot::Status,
}

/// Guarded status change of a [`Plot`] from [`plot::Status::Available`] to
/// [`plot::Status::Reserved`].
#[derive(Clone, Copy, Debug)]
pub struct Reserve {
    /// ID of the [`Plot`] being reserved.
    pub id: plot::Id,
}

/// Guarded status change of a [`Plot`] from [`plot::Status::Reserved`] back
/// to [`plot::Status::Available`].
#[derive(Clone, Copy, Debug)]
pub struct Release {
    /// ID of the [`Plot`] being released.
    pub id: plot::Id,
}

/// Reassignment of a [`Plot`] to a new owning [`Profile`].
#[derive(Clone, Copy, Debug)]
pub struct NewOwner {
    /// ID of the [`Plot`] being reassigned.
    pub id: plot::Id,

    /// ID of the [`Profile`] becoming the owner.
    pub owner_id: profile::Id,
}

pub mod list {
    //! [`Plot`]s list definitions.

    use crate::domain::{plot, profile};
    #[cfg(doc)]
    use crate::domain::{Plot, Profile};

    /// Filter for listing [`Plot`]s.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`plot::Status`] to filter by.
        pub status: Option<plot::Status>,

        /// [`plot::TownName`] to filter by.
        pub town: Option<plot::TownName>,

        /// Owning [`Profile`] to filter by.
        pub owner_id: Option<profile::Id>,
    }
}
