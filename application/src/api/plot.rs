//! [`Plot`]-related definitions.

use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A land `Plot` of the housing society.
#[derive(Clone, Debug)]
pub struct Plot {
    /// ID of this [`Plot`].
    pub id: Id,

    /// [`domain::Plot`] representing this [`Plot`].
    plot: OnceCell<domain::Plot>,
}

impl From<domain::Plot> for Plot {
    fn from(plot: domain::Plot) -> Self {
        Self {
            id: plot.id.into(),
            plot: OnceCell::new_with(Some(plot)),
        }
    }
}

impl Plot {
    /// Creates a new [`Plot`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Plot`] with the provided ID exists,
    /// otherwise accessing this [`Plot`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            plot: OnceCell::new(),
        }
    }

    /// Returns the [`domain::Plot`] representing this [`Plot`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Plot`] doesn't exist.
    async fn plot(&self, ctx: &Context) -> Result<&domain::Plot, Error> {
        let id = self.id.into();
        self.plot
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::plot::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|p| {
                        future::ready(p.ok_or_else(|| {
                            api::query::PlotError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A land `Plot` of the housing society.
#[graphql_object(context = Context)]
impl Plot {
    /// Unique identifier of this `Plot`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Plot.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Number of this `Plot`, unique within the society.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Plot.number",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn number(&self, ctx: &Context) -> Result<Number, Error> {
        Ok(self.plot(ctx).await?.number.clone().into())
    }

    /// Town (sector) this `Plot` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Plot.town",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn town(&self, ctx: &Context) -> Result<TownName, Error> {
        Ok(self.plot(ctx).await?.town.clone().into())
    }

    /// Size of this `Plot` in marlas.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Plot.sizeMarla",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn size_marla(&self, ctx: &Context) -> Result<i32, Error> {
        self.plot(ctx)
            .await?
            .size_marla
            .try_into()
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Full price of this `Plot`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Plot.price",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn price(&self, ctx: &Context) -> Result<Money, Error> {
        Ok(self.plot(ctx).await?.price)
    }

    /// Status of this `Plot`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Plot.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status(&self, ctx: &Context) -> Result<Status, Error> {
        Ok(self.plot(ctx).await?.status.into())
    }

    /// `Profile` currently owning this `Plot`, if sold.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Plot.owner",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn owner(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Profile>, Error> {
        Ok(self.plot(ctx).await?.owner_id.map(|id| {
            #[expect(
                unsafe_code,
                reason = "`owner_id` loaded from repository guarantees \
                          `Profile` existence"
            )]
            unsafe {
                api::Profile::new_unchecked(id)
            }
        }))
    }

    /// `DateTime` when this `Plot` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Plot.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.plot(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `Plot`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::plot::Id)]
#[into(domain::plot::Id)]
#[graphql(name = "PlotId", transparent)]
pub struct Id(Uuid);

/// Number of a `Plot` within the society.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PlotNumber",
    with = scalar::Via::<domain::plot::Number>,
)]
pub struct Number(domain::plot::Number);

/// Name of the town (sector) a `Plot` belongs to.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PlotTownName",
    with = scalar::Via::<domain::plot::TownName>,
)]
pub struct TownName(domain::plot::TownName);

/// Status of a `Plot`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "PlotStatus")]
pub enum Status {
    /// `Plot` is open for sale.
    Available,

    /// `Plot` is held by a pending `PurchaseRequest`.
    Reserved,

    /// `Plot` has been sold.
    Sold,
}

impl From<domain::plot::Status> for Status {
    fn from(status: domain::plot::Status) -> Self {
        match status {
            domain::plot::Status::Available => Self::Available,
            domain::plot::Status::Reserved => Self::Reserved,
            domain::plot::Status::Sold => Self::Sold,
        }
    }
}

impl From<Status> for domain::plot::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Available => Self::Available,
            Status::Reserved => Self::Reserved,
            Status::Sold => Self::Sold,
        }
    }
}
