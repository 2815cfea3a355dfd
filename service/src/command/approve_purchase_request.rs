//! [`Command`] for approving a [`PurchaseRequest`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        installment, plot, purchase_request, template, Installment,
        InstallmentTemplate, Plot, PurchaseRequest,
    },
    infra::{database, Database},
    read,
    Service,
};

use super::Command;

/// [`Command`] for approving a [`PurchaseRequest`].
///
/// Finalizes the [`PurchaseRequest`] as approved and executes the sale it
/// asked for: the reserved [`Plot`] is sold to the requesting client and its
/// [`Installment`] ledger is generated from the [`InstallmentTemplate`] named
/// by the request's plan label, all in a single transaction.
#[derive(Clone, Copy, Debug)]
pub struct ApprovePurchaseRequest {
    /// ID of the [`PurchaseRequest`] to approve.
    pub request_id: purchase_request::Id,
}

impl<Db> Command<ApprovePurchaseRequest> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<PurchaseRequest>, purchase_request::Id>>,
            Ok = Option<PurchaseRequest>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Plot>, plot::Id>>,
            Ok = Option<Plot>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<InstallmentTemplate>, template::Name>>,
            Ok = Option<InstallmentTemplate>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Update<read::purchase_request::Finalize>,
            Ok = bool,
            Err = Traced<database::Error>,
        > + Database<
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

    async fn execute(
        &self,
        cmd: ApprovePurchaseRequest,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ApprovePurchaseRequest { request_id } = cmd;

        let request = self
            .database()
            .execute(Select(By::<Option<PurchaseRequest>, _>::new(request_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RequestNotExists(request_id))
            .map_err(tracerr::wrap!())?;
        if request.status.is_final() {
            return Err(tracerr::new!(E::RequestAlreadyFinalized(request_id)));
        }

        let plot = self
            .database()
            .execute(Select(By::<Option<Plot>, _>::new(request.plot_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PlotNotExists(request.plot_id))
            .map_err(tracerr::wrap!())?;

        let plan_name = template::Name::new(AsRef::<str>::as_ref(&request.plan_label))
            .ok_or_else(|| E::UnknownPlanLabel(request.plan_label.clone()))
            .map_err(tracerr::wrap!())?;
        let template = self
            .database()
            .execute(Select(By::<Option<InstallmentTemplate>, _>::new(
                plan_name,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::UnknownPlanLabel(request.plan_label.clone()))
            .map_err(tracerr::wrap!())?;

        let ledger = installment::schedule(
            plot.price,
            plot.id,
            request.client_id,
            &installment::Plan::from(&template),
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

        let finalized = tx
            .execute(Update(read::purchase_request::Finalize {
                id: request.id,
                status: purchase_request::Status::Approved,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !finalized {
            // Reviewed concurrently: the decision that came first stands.
            return Err(tracerr::new!(E::RequestAlreadyFinalized(request.id)));
        }

        let sold = tx
            .execute(Update(read::plot::Sold {
                id: plot.id,
                owner_id: request.client_id,
                was: plot::Status::Reserved,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !sold {
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

/// Error of [`ApprovePurchaseRequest`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Plan of the [`PurchaseRequest`] cannot produce a valid ledger.
    #[display("invalid payment plan: {_0}")]
    #[from]
    InvalidPlan(installment::PlanError),

    /// [`Plot`] of the [`PurchaseRequest`] does not exist anymore.
    #[display("`Plot(id: {_0})` does not exist")]
    PlotNotExists(#[error(not(source))] plot::Id),

    /// [`Plot`] of the [`PurchaseRequest`] is not reserved for it anymore.
    #[display("`Plot(id: {_0})` is not available for sale")]
    PlotUnavailable(#[error(not(source))] plot::Id),

    /// [`PurchaseRequest`] has already been reviewed.
    #[display("`PurchaseRequest(id: {_0})` is already finalized")]
    RequestAlreadyFinalized(#[error(not(source))] purchase_request::Id),

    /// [`PurchaseRequest`] with the provided ID does not exist.
    #[display("`PurchaseRequest(id: {_0})` does not exist")]
    RequestNotExists(#[error(not(source))] purchase_request::Id),

    /// No [`InstallmentTemplate`] matches the plan label of the
    /// [`PurchaseRequest`].
    #[display("no installment template matches plan label `{_0}`")]
    UnknownPlanLabel(
        #[error(not(source))] purchase_request::PlanLabel,
    ),
}
