//! [`Query`] collection related to the multiple [`Plot`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::{domain::Plot, read};

use super::DatabaseQuery;

/// Queries a list of [`Plot`]s matching a [`read::plot::list::Filter`].
pub type List = DatabaseQuery<By<Vec<Plot>, read::plot::list::Filter>>;
