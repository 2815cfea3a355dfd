//! [`Command`] for amending an [`Installment`].

use common::{
    operations::{By, Select, Update},
    Money,
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

/// [`Command`] for amending the due date and amount of an unsettled
/// [`Installment`].
#[derive(Clone, Copy, Debug)]
pub struct AmendInstallment {
    /// ID of the [`Installment`] to amend.
    pub installment_id: installment::Id,

    /// New due [`DateTime`] of the [`Installment`].
    ///
    /// [`DateTime`]: common::DateTime
    pub due_at: installment::DueDateTime,

    /// New amount of the [`Installment`].
    pub amount: Money,
}

impl<Db> Command<AmendInstallment> for Service<Db>
where
    Db: Database<
            Select<By<Option<Installment>, installment::Id>>,
            Ok = Option<Installment>,
            Err = Traced<database::Error>,
        > + Database<
            Update<read::installment::Amend>,
            Ok = bool,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Installment;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AmendInstallment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AmendInstallment {
            installment_id,
            due_at,
            amount,
        } = cmd;

        let mut installment = self
            .database()
            .execute(Select(By::<Option<Installment>, _>::new(installment_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::InstallmentNotExists(installment_id))
            .map_err(tracerr::wrap!())?;
        if installment.status == installment::Status::Paid {
            return Err(tracerr::new!(E::AlreadySettled(installment.id)));
        }

        let amended = self
            .database()
            .execute(Update(read::installment::Amend {
                id: installment.id,
                due_at,
                amount,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !amended {
            // Settled concurrently between the read and the update.
            return Err(tracerr::new!(E::AlreadySettled(installment.id)));
        }

        installment.due_at = due_at;
        installment.amount = amount;

        Ok(installment)
    }
}

/// Error of [`AmendInstallment`] [`Command`] execution.
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
