//! [`Command`] for registering a new [`Profile`].

use common::{operations::Insert, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{profile, Profile},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for registering a new [`Profile`].
#[derive(Clone, Debug)]
pub struct CreateProfile {
    /// [`profile::Name`] of a new [`Profile`].
    pub name: profile::Name,

    /// [`profile::Cnic`] of a new [`Profile`].
    pub cnic: profile::Cnic,

    /// [`profile::Role`] of a new [`Profile`].
    pub role: profile::Role,
}

impl<Db> Command<CreateProfile> for Service<Db>
where
    Db: Database<Insert<Profile>, Err = Traced<database::Error>>,
{
    type Ok = Profile;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateProfile) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateProfile { name, cnic, role } = cmd;

        let profile = Profile {
            id: profile::Id::new(),
            name,
            cnic,
            role,
            biometric_ref: None,
            biometric_verified: false,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(profile.clone()))
            .await
            .map_err(|e| {
                if e.as_ref().is_unique_violation(Some("profiles_cnic_key")) {
                    tracerr::new!(E::DuplicateCnic(profile.cnic.clone()))
                } else {
                    tracerr::map_from(e)
                }
            })
            .map(drop)?;

        Ok(profile)
    }
}

/// Error of [`CreateProfile`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Profile`] with the provided [`profile::Cnic`] already exists.
    #[display("`Profile(cnic: {_0})` already exists")]
    DuplicateCnic(#[error(not(source))] profile::Cnic),
}
