//! [`Query`] collection related to the multiple [`Transfer`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::{domain::Transfer, read};

use super::DatabaseQuery;

/// Queries a list of [`Transfer`]s matching a
/// [`read::transfer::list::Filter`].
pub type List = DatabaseQuery<By<Vec<Transfer>, read::transfer::list::Filter>>;
