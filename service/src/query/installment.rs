//! [`Query`] collection related to a single [`Installment`].

use common::operations::By;

use crate::domain::{installment, Installment};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Installment`] by its [`installment::Id`].
pub type ById = DatabaseQuery<By<Option<Installment>, installment::Id>>;
