//! [`Command`] for rejecting a [`PurchaseRequest`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{plot, purchase_request, Plot, PurchaseRequest},
    infra::{database, Database},
    read,
    Service,
};

use super::Command;

/// [`Command`] for rejecting a [`PurchaseRequest`].
///
/// Finalizes the [`PurchaseRequest`] as rejected and releases the [`Plot`] it
/// reserved.
#[derive(Clone, Copy, Debug)]
pub struct RejectPurchaseRequest {
    /// ID of the [`PurchaseRequest`] to reject.
    pub request_id: purchase_request::Id,
}

impl<Db> Command<RejectPurchaseRequest> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<PurchaseRequest>, purchase_request::Id>>,
            Ok = Option<PurchaseRequest>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Update<read::purchase_request::Finalize>,
            Ok = bool,
            Err = Traced<database::Error>,
        > + Database<
            Update<read::plot::Release>,
            Ok = bool,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
    Transacted<Db>:
        Database<Lock<By<Plot, plot::Id>>, Err = Traced<database::Error>>,
{
    type Ok = PurchaseRequest;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RejectPurchaseRequest,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RejectPurchaseRequest { request_id } = cmd;

        let mut request = self
            .database()
            .execute(Select(By::<Option<PurchaseRequest>, _>::new(request_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RequestNotExists(request_id))
            .map_err(tracerr::wrap!())?;
        if request.status.is_final() {
            return Err(tracerr::new!(E::RequestAlreadyFinalized(request_id)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Plot`.
        tx.execute(Lock(By::new(request.plot_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let finalized = tx
            .execute(Update(read::purchase_request::Finalize {
                id: request.id,
                status: purchase_request::Status::Rejected,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !finalized {
            // Reviewed concurrently: the decision that came first stands.
            return Err(tracerr::new!(E::RequestAlreadyFinalized(request.id)));
        }

        // The plot may have been sold directly in the meantime, in which case
        // there is no reservation left to release.
        _ = tx
            .execute(Update(read::plot::Release {
                id: request.plot_id,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        request.status = purchase_request::Status::Rejected;

        Ok(request)
    }
}

/// Error of [`RejectPurchaseRequest`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`PurchaseRequest`] has already been reviewed.
    #[display("`PurchaseRequest(id: {_0})` is already finalized")]
    RequestAlreadyFinalized(#[error(not(source))] purchase_request::Id),

    /// [`PurchaseRequest`] with the provided ID does not exist.
    #[display("`PurchaseRequest(id: {_0})` does not exist")]
    RequestNotExists(#[error(not(source))] purchase_request::Id),
}
