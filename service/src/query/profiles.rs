//! [`Query`] collection related to the multiple [`Profile`]s.

use common::operations::By;

use crate::domain::{profile, Profile};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of [`Profile`]s, optionally filtered by [`profile::Role`].
pub type List = DatabaseQuery<By<Vec<Profile>, Option<profile::Role>>>;
