//! [`Command`] for recording a biometric verification of a [`Profile`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{profile, Profile},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for recording a biometric verification of a [`Profile`].
///
/// Stores the reference to the captured biometric record and marks the
/// [`Profile`] as verified.
#[derive(Clone, Debug)]
pub struct VerifyBiometric {
    /// ID of the [`Profile`] being verified.
    pub profile_id: profile::Id,

    /// [`profile::BiometricRef`] captured by the external verification
    /// system.
    pub biometric_ref: profile::BiometricRef,
}

impl<Db> Command<VerifyBiometric> for Service<Db>
where
    Db: Database<
            Select<By<Option<Profile>, profile::Id>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        > + Database<Update<Profile>, Err = Traced<database::Error>>,
{
    type Ok = Profile;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: VerifyBiometric,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let VerifyBiometric {
            profile_id,
            biometric_ref,
        } = cmd;

        let mut profile = self
            .database()
            .execute(Select(By::<Option<Profile>, _>::new(profile_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ProfileNotExists(profile_id))
            .map_err(tracerr::wrap!())?;

        profile.biometric_ref = Some(biometric_ref);
        profile.biometric_verified = true;

        self.database()
            .execute(Update(profile.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(profile)
    }
}

/// Error of [`VerifyBiometric`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Profile`] with the provided ID does not exist.
    #[display("`Profile(id: {_0})` does not exist")]
    ProfileNotExists(#[error(not(source))] profile::Id),
}
