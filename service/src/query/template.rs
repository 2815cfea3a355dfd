//! [`Query`] collection related to a single [`InstallmentTemplate`].

use common::operations::By;

use crate::domain::{template, InstallmentTemplate};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`InstallmentTemplate`] by its [`template::Id`].
pub type ById = DatabaseQuery<By<Option<InstallmentTemplate>, template::Id>>;

/// Queries an [`InstallmentTemplate`] by its [`template::Name`].
pub type ByName =
    DatabaseQuery<By<Option<InstallmentTemplate>, template::Name>>;
