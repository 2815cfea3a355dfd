//! [`Query`] collection related to the multiple [`PurchaseRequest`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::{domain::PurchaseRequest, read};

use super::DatabaseQuery;

/// Queries a list of [`PurchaseRequest`]s matching a
/// [`read::purchase_request::list::Filter`].
pub type List = DatabaseQuery<
    By<Vec<PurchaseRequest>, read::purchase_request::list::Filter>,
>;
