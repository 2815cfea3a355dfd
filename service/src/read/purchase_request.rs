//! [`PurchaseRequest`]-related read definitions.

use crate::domain::purchase_request;
#[cfg(doc)]
use crate::domain::PurchaseRequest;

/// Guarded finalization of a [`PurchaseRequest`].
///
/// Applies only while the [`PurchaseRequest`] is still
/// [`purchase_request::Status::Pending`], so concurrent reviews of the same
/// [`PurchaseRequest`] cannot both win.
#[derive(Clone, Copy, Debug)]
pub struct Finalize {
    /// ID of the [`PurchaseRequest`] being finalized.
    pub id: purchase_request::Id,

    /// Final [`purchase_request::Status`] to set.
    pub status: purchase_request::Status,
}

pub mod list {
    //! [`PurchaseRequest`]s list definitions.

    use crate::domain::{profile, purchase_request};
    #[cfg(doc)]
    use crate::domain::{Profile, PurchaseRequest};

    /// Filter for listing [`PurchaseRequest`]s.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// Requesting [`Profile`] to filter by.
        pub client_id: Option<profile::Id>,

        /// [`purchase_request::Status`] to filter by.
        pub status: Option<purchase_request::Status>,
    }
}
