//! [`Command`] for settling an [`Installment`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{installment, Installment},
    infra::{database, Database},
    read,
    Service,
};

use super::Command;

/// [`Command`] for settling an [`Installment`].
#[derive(Clone, Copy, Debug)]
pub struct MarkInstallmentPaid {
    /// ID of the [`Installment`] to settle.
    pub installment_id: installment::Id,
}

impl<Db> Command<MarkInstallmentPaid> for Service<Db>
where
    Db: Database<
            Select<By<Option<Installment>, installment::Id>>,
            Ok = Option<Installment>,
            Err = Traced<database::Error>,
        > + Database<
            Update<read::installment::Settle>,
            Ok = bool,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Installment;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: MarkInstallmentPaid,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let MarkInstallmentPaid { installment_id } = cmd;

        let mut installment = self
            .database()
            .execute(Select(By::<Option<Installment>, _>::new(installment_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::InstallmentNotExists(installment_id))
            .map_err(tracerr::wrap!())?;

        let paid_at = DateTime::now().coerce();
        let settled = self
            .database()
            .execute(Update(read::installment::Settle {
                id: installment.id,
                paid_at,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !settled {
            return Err(tracerr::new!(E::AlreadySettled(installment.id)));
        }

        installment.status = installment::Status::Paid;
        installment.paid_at = Some(paid_at);

        Ok(installment)
    }
}

/// Error of [`MarkInstallmentPaid`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Installment`] has already been paid.
    #[display("`Installment(id: {_0})` is already settled")]
    AlreadySettled(#[error(not(source))] installment::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Installment`] with the provided ID does not exist.
    #[display("`Installment(id: {_0})` does not exist")]
    InstallmentNotExists(#[error(not(source))] installment::Id),
}
