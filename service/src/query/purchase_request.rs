//! [`Query`] collection related to a single [`PurchaseRequest`].

use common::operations::By;

use crate::domain::{purchase_request, PurchaseRequest};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`PurchaseRequest`] by its [`purchase_request::Id`].
pub type ById =
    DatabaseQuery<By<Option<PurchaseRequest>, purchase_request::Id>>;
