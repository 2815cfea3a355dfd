//! [`Command`] for selling a [`Plot`] to a client.

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{installment, plot, profile, Installment, Plot, Profile},
    infra::{database, Database},
    read,
    Service,
};

use super::Command;

/// [`Command`] for selling a [`Plot`] to a client.
///
/// Marks the [`Plot`] as [`plot::Status::Sold`] and generates its
/// [`Installment`] ledger in a single transaction.
#[derive(Clone, Debug)]
pub struct SellPlot {
    /// ID of the [`Plot`] to sell.
    pub plot_id: plot::Id,

    /// ID of the [`Profile`] buying the [`Plot`].
    pub client_id: profile::Id,

    /// Payment [`installment::Plan`] of the sale.
    pub plan: installment::Plan,
}

impl<Db> Command<SellPlot> for Service<Db>
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
    Transacted<Db>: Database<
            Update<read::plot::Sold>,
            Ok = bool,
            Err = Traced<database::Error>,
        > + Database<Insert<Vec<Installment>>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Transacted<Db>:
        Database<Lock<By<Plot, plot::Id>>, Err = Traced<database::Error>>,
{
    type Ok = Vec<Installment>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SellPlot) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SellPlot {
            plot_id,
            client_id,
            plan,
        } = cmd;

        let plot = self
            .database()
            .execute(Select(By::<Option<Plot>, _>::new(plot_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PlotNotExists(plot_id))
            .map_err(tracerr::wrap!())?;
        if plot.status != plot::Status::Available {
            return Err(tracerr::new!(E::PlotUnavailable(plot_id)));
        }

        let client = self
            .database()
            .execute(Select(By::<Option<Profile>, _>::new(client_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ClientNotExists(client_id))
            .map_err(tracerr::wrap!())?;

        let ledger = installment::schedule(
            plot.price,
            plot.id,
            client.id,
            &plan,
            DateTime::now(),
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

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

        let sold = tx
            .execute(Update(read::plot::Sold {
                id: plot.id,
                owner_id: client.id,
                was: plot::Status::Available,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !sold {
            // Lost the race: the `Plot` is not `Available` anymore.
            return Err(tracerr::new!(E::PlotUnavailable(plot.id)));
        }

        tx.execute(Insert(ledger.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(ledger)
    }
}

/// Error of [`SellPlot`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Profile`] with the provided ID does not exist.
    #[display("`Profile(id: {_0})` does not exist")]
    ClientNotExists(#[error(not(source))] profile::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Provided [`installment::Plan`] cannot produce a valid ledger.
    #[display("invalid payment plan: {_0}")]
    #[from]
    InvalidPlan(installment::PlanError),

    /// [`Plot`] with the provided ID does not exist.
    #[display("`Plot(id: {_0})` does not exist")]
    PlotNotExists(#[error(not(source))] plot::Id),

    /// [`Plot`] with the provided ID is not open for sale.
    #[display("`Plot(id: {_0})` is not available for sale")]
    PlotUnavailable(#[error(not(source))] plot::Id),
}
