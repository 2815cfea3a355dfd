//! [`Query`] collection related to the multiple [`InstallmentTemplate`]s.

use common::operations::By;

use crate::domain::InstallmentTemplate;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the list of all [`InstallmentTemplate`]s.
pub type List = DatabaseQuery<By<Vec<InstallmentTemplate>, ()>>;
