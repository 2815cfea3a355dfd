//! [`Query`] collection related to the multiple [`Installment`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::{domain::Installment, read};

use super::DatabaseQuery;

/// Queries a list of [`Installment`]s matching a
/// [`read::installment::list::Filter`].
pub type List =
    DatabaseQuery<By<Vec<Installment>, read::installment::list::Filter>>;
