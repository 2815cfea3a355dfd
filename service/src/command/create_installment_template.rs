//! [`Command`] for creating a new [`InstallmentTemplate`].

use common::{operations::Insert, DateTime, Percent};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{template, InstallmentTemplate},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`InstallmentTemplate`].
#[derive(Clone, Debug)]
pub struct CreateInstallmentTemplate {
    /// [`template::Name`] of a new [`InstallmentTemplate`].
    pub name: template::Name,

    /// Share of the price paid upfront.
    pub down_payment: Percent,

    /// Number of monthly installments.
    pub months: template::TotalMonths,
}

impl<Db> Command<CreateInstallmentTemplate> for Service<Db>
where
    Db: Database<Insert<InstallmentTemplate>, Err = Traced<database::Error>>,
{
    type Ok = InstallmentTemplate;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateInstallmentTemplate,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateInstallmentTemplate {
            name,
            down_payment,
            months,
        } = cmd;

        let template = InstallmentTemplate {
            id: template::Id::new(),
            name,
            down_payment,
            months,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(template.clone()))
            .await
            .map_err(|e| {
                if e.as_ref().is_unique_violation(Some(
                    "installment_templates_name_key",
                )) {
                    tracerr::new!(E::DuplicateName(template.name.clone()))
                } else {
                    tracerr::map_from(e)
                }
            })
            .map(drop)?;

        Ok(template)
    }
}

/// Error of [`CreateInstallmentTemplate`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`InstallmentTemplate`] with the provided [`template::Name`] already
    /// exists.
    #[display("`InstallmentTemplate(name: {_0})` already exists")]
    DuplicateName(#[error(not(source))] template::Name),
}
