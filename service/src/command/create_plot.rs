//! [`Command`] for registering a new [`Plot`].

use common::{operations::Insert, DateTime, Money};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{plot, Plot},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for registering a new [`Plot`].
#[derive(Clone, Debug)]
pub struct CreatePlot {
    /// [`plot::Number`] of a new [`Plot`].
    pub number: plot::Number,

    /// [`plot::TownName`] of a new [`Plot`].
    pub town: plot::TownName,

    /// Size of a new [`Plot`] in marlas.
    pub size_marla: plot::SizeMarla,

    /// Full price of a new [`Plot`].
    pub price: Money,
}

impl<Db> Command<CreatePlot> for Service<Db>
where
    Db: Database<Insert<Plot>, Err = Traced<database::Error>>,
{
    type Ok = Plot;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreatePlot) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreatePlot {
            number,
            town,
            size_marla,
            price,
        } = cmd;

        let plot = Plot {
            id: plot::Id::new(),
            number,
            town,
            size_marla,
            price,
            status: plot::Status::Available,
            owner_id: None,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(plot.clone()))
            .await
            .map_err(|e| {
                if e.as_ref().is_unique_violation(Some("plots_number_key")) {
                    tracerr::new!(E::DuplicateNumber(plot.number.clone()))
                } else {
                    tracerr::map_from(e)
                }
            })
            .map(drop)?;

        Ok(plot)
    }
}

/// Error of [`CreatePlot`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Plot`] with the provided [`plot::Number`] already exists.
    #[display("`Plot(number: {_0})` already exists")]
    DuplicateNumber(#[error(not(source))] plot::Number),
}
