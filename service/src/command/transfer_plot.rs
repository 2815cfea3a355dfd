//! [`Command`] for transferring ownership of a [`Plot`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted, Update},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{plot, profile, transfer, Plot, Profile, Transfer},
    infra::{database, Database},
    read,
    Service,
};

use super::Command;

/// [`Command`] for transferring ownership of a [`Plot`].
///
/// Appends an immutable [`Transfer`] record, reassigns all pending
/// installments of the [`Plot`] to the new owner and updates the [`Plot`]
/// owner, in a single transaction. The [`Transfer`] record is written before
/// any obligation is reassigned.
#[derive(Clone, Debug)]
pub struct TransferPlot {
    /// ID of the [`Plot`] to transfer.
    pub plot_id: plot::Id,

    /// ID of the [`Profile`] taking over the [`Plot`].
    pub to: profile::Id,

    /// Fee charged for the transfer.
    pub fee: Money,
}

impl<Db> Command<TransferPlot> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Plot>, plot::Id>>,
            Ok = Option<Plot>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Profile>, profile::Id>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<Insert<Transfer>, Err = Traced<database::Error>>
        + Database<
            Update<read::installment::Reassign>,
            Ok = u64,
            Err = Traced<database::Error>,
        > + Database<
            Update<read::plot::NewOwner>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
    Transacted<Db>:
        Database<Lock<By<Plot, plot::Id>>, Err = Traced<database::Error>>,
{
    type Ok = Transfer;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: TransferPlot) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let TransferPlot { plot_id, to, fee } = cmd;

        let plot = self
            .database()
            .execute(Select(By::<Option<Plot>, _>::new(plot_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PlotNotExists(plot_id))
            .map_err(tracerr::wrap!())?;

        let new_owner = self
            .database()
            .execute(Select(By::<Option<Profile>, _>::new(to)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OwnerNotExists(to))
            .map_err(tracerr::wrap!())?;

        let now = DateTime::now();
        let transfer = Transfer {
            id: transfer::Id::new(),
            plot_id: plot.id,
            from: plot.owner_id,
            to: new_owner.id,
            fee,
            number: transfer::Number::generate(plot.id, now),
            created_at: now.coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Plot`.
        tx.execute(Lock(By::new(plot.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        // The `Transfer` record must hit the ledger before any obligation is
        // reassigned.
        tx.execute(Insert(transfer.clone()))
            .await
            .map_err(|e| {
                if e.as_ref().is_unique_violation(Some("transfers_number_key"))
                {
                    tracerr::new!(E::DuplicateNumber(transfer.number.clone()))
                } else {
                    tracerr::map_from(e)
                }
            })
            .map(drop)?;

        let reassigned = tx
            .execute(Update(read::installment::Reassign {
                plot_id: plot.id,
                to: new_owner.id,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tracing::debug!(
            plot_id = %plot.id,
            count = reassigned,
            "pending installments reassigned",
        );

        tx.execute(Update(read::plot::NewOwner {
            id: plot.id,
            owner_id: new_owner.id,
        }))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))
        .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(transfer)
    }
}

/// Error of [`TransferPlot`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Generated [`transfer::Number`] collided with an existing [`Transfer`].
    #[display("`Transfer(number: {_0})` already exists")]
    DuplicateNumber(#[error(not(source))] transfer::Number),

    /// [`Profile`] with the provided ID does not exist.
    #[display("`Profile(id: {_0})` does not exist")]
    OwnerNotExists(#[error(not(source))] profile::Id),

    /// [`Plot`] with the provided ID does not exist.
    #[display("`Plot(id: {_0})` does not exist")]
    PlotNotExists(#[error(not(source))] plot::Id),
}
