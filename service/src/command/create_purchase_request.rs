//! [`Command`] for submitting a new [`PurchaseRequest`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{plot, profile, purchase_request, Plot, Profile, PurchaseRequest},
    infra::{database, Database},
    read,
    Service,
};

use super::Command;

/// [`Command`] for submitting a new [`PurchaseRequest`].
///
/// Reserves the requested [`Plot`] while the [`PurchaseRequest`] awaits
/// review.
#[derive(Clone, Debug)]
pub struct CreatePurchaseRequest {
    /// ID of the [`Profile`] requesting the purchase.
    pub client_id: profile::Id,

    /// ID of the [`Plot`] requested.
    pub plot_id: plot::Id,

    /// [`purchase_request::PlanLabel`] of the payment plan asked for.
    pub plan_label: purchase_request::PlanLabel,
}

impl<Db> Command<CreatePurchaseRequest> for Service<Db>
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
            Update<read::plot::Reserve>,
            Ok = bool,
            Err = Traced<database::Error>,
        > + Database<Insert<PurchaseRequest>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Transacted<Db>:
        Database<Lock<By<Plot, plot::Id>>, Err = Traced<database::Error>>,
{
    type Ok = PurchaseRequest;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreatePurchaseRequest,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreatePurchaseRequest {
            client_id,
            plot_id,
            plan_label,
        } = cmd;

        let client = self
            .database()
            .execute(Select(By::<Option<Profile>, _>::new(client_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ClientNotExists(client_id))
            .map_err(tracerr::wrap!())?;

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

        let request = PurchaseRequest {
            id: purchase_request::Id::new(),
            client_id: client.id,
            plot_id: plot.id,
            plan_label,
            status: purchase_request::Status::Pending,
            created_at: DateTime::now().coerce(),
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

        let reserved = tx
            .execute(Update(read::plot::Reserve { id: plot.id }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !reserved {
            return Err(tracerr::new!(E::PlotUnavailable(plot.id)));
        }

        tx.execute(Insert(request.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(request)
    }
}

/// Error of [`CreatePurchaseRequest`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Profile`] with the provided ID does not exist.
    #[display("`Profile(id: {_0})` does not exist")]
    ClientNotExists(#[error(not(source))] profile::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Plot`] with the provided ID does not exist.
    #[display("`Plot(id: {_0})` does not exist")]
    PlotNotExists(#[error(not(source))] plot::Id),

    /// [`Plot`] with the provided ID is not open for sale.
    #[display("`Plot(id: {_0})` is not available for sale")]
    PlotUnavailable(#[error(not(source))] plot::Id),
}
