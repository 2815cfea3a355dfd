//! [`Command`] for flagging overdue [`Installment`]s.

use common::{operations::Update, DateTime};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Installment;
use crate::{
    infra::{database, Database},
    read,
    Service,
};

use super::Command;

/// [`Command`] for flagging all pending [`Installment`]s past their due date
/// (plus the configured grace period) as overdue.
///
/// Returns the number of flagged [`Installment`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlagOverdueInstallments;

impl<Db> Command<FlagOverdueInstallments> for Service<Db>
where
    Db: Database<
        Update<read::installment::FlagOverdue>,
        Ok = u64,
        Err = Traced<database::Error>,
    >,
{
    type Ok = u64;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        _: FlagOverdueInstallments,
    ) -> Result<Self::Ok, Self::Err> {
        let deadline =
            (DateTime::now() - self.config().overdue_grace_period).coerce();

        let flagged = self
            .database()
            .execute(Update(read::installment::FlagOverdue { deadline }))
            .await
            .map_err(tracerr::wrap!())?;
        if flagged > 0 {
            tracing::info!(count = flagged, "installments flagged as overdue");
        }

        Ok(flagged)
    }
}

/// Error of [`FlagOverdueInstallments`] [`Command`] execution.
pub type ExecutionError = database::Error;
