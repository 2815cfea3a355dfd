//! [`Installment`]-related definitions.

use common::{DateTime, Money};
use derive_more::{Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, AsError, Context, Error};

/// Single payment obligation of a `Plot` purchase.
#[derive(Clone, Debug)]
pub struct Installment {
    /// ID of this [`Installment`].
    pub id: Id,

    /// [`domain::Installment`] representing this [`Installment`].
    installment: OnceCell<domain::Installment>,
}

impl From<domain::Installment> for Installment {
    fn from(installment: domain::Installment) -> Self {
        Self {
            id: installment.id.into(),
            installment: OnceCell::new_with(Some(installment)),
        }
    }
}

impl Installment {
    /// Creates a new [`Installment`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Installment`] with the provided ID exists,
    /// otherwise accessing this [`Installment`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            installment: OnceCell::new(),
        }
    }

    /// Returns the [`domain::Installment`] representing this [`Installment`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Installment`] doesn't exist.
    async fn installment(
        &self,
        ctx: &Context,
    ) -> Result<&domain::Installment, Error> {
        let id = self.id.into();
        self.installment
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::installment::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|i| {
                        future::ready(i.ok_or_else(|| {
                            api::query::InstallmentError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// Single payment obligation of a `Plot` purchase.
#[graphql_object(context = Context)]
impl Installment {
    /// Unique identifier of this `Installment`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Installment.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// `Plot` this `Installment` pays for.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Installment.plot",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn plot(&self, ctx: &Context) -> Result<api::Plot, Error> {
        let plot_id = self.installment(ctx).await?.plot_id;
        #[expect(
            unsafe_code,
            reason = "`plot_id` loaded from repository guarantees `Plot` \
                      existence"
        )]
        Ok(unsafe { api::Plot::new_unchecked(plot_id) })
    }

    /// `Profile` obliged to pay this `Installment`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Installment.profile",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn profile(&self, ctx: &Context) -> Result<api::Profile, Error> {
        let profile_id = self.installment(ctx).await?.profile_id;
        #[expect(
            unsafe_code,
            reason = "`profile_id` loaded from repository guarantees \
                      `Profile` existence"
        )]
        Ok(unsafe { api::Profile::new_unchecked(profile_id) })
    }

    /// Kind of this `Installment`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Installment.kind",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn kind(&self, ctx: &Context) -> Result<Kind, Error> {
        Ok(self.installment(ctx).await?.kind.into())
    }

    /// `DateTime` when this `Installment` comes due.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Installment.dueAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn due_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.installment(ctx).await?.due_at.coerce())
    }

    /// Amount to be paid.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Installment.amount",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn amount(&self, ctx: &Context) -> Result<Money, Error> {
        Ok(self.installment(ctx).await?.amount)
    }

    /// Status of this `Installment`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Installment.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status(&self, ctx: &Context) -> Result<Status, Error> {
        Ok(self.installment(ctx).await?.status.into())
    }

    /// `DateTime` when this `Installment` was paid, if it was.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Installment.paidAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn paid_at(
        &self,
        ctx: &Context,
    ) -> Result<Option<DateTime>, Error> {
        Ok(self.installment(ctx).await?.paid_at.map(|at| at.coerce()))
    }
}

/// Unique identifier of an `Installment`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::installment::Id)]
#[into(domain::installment::Id)]
#[graphql(name = "InstallmentId", transparent)]
pub struct Id(Uuid);

/// Kind of an `Installment`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "InstallmentKind")]
pub enum Kind {
    /// Upfront share of the price.
    DownPayment,

    /// Regular monthly payment.
    Monthly,
}

impl From<domain::installment::Kind> for Kind {
    fn from(kind: domain::installment::Kind) -> Self {
        match kind {
            domain::installment::Kind::DownPayment => Self::DownPayment,
            domain::installment::Kind::Monthly => Self::Monthly,
        }
    }
}

impl From<Kind> for domain::installment::Kind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::DownPayment => Self::DownPayment,
            Kind::Monthly => Self::Monthly,
        }
    }
}

/// Status of an `Installment`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "InstallmentStatus")]
pub enum Status {
    /// `Installment` is awaiting payment.
    Pending,

    /// `Installment` has been paid.
    Paid,

    /// `Installment` is past its due date and unpaid.
    Overdue,
}

impl From<domain::installment::Status> for Status {
    fn from(status: domain::installment::Status) -> Self {
        match status {
            domain::installment::Status::Pending => Self::Pending,
            domain::installment::Status::Paid => Self::Paid,
            domain::installment::Status::Overdue => Self::Overdue,
        }
    }
}

impl From<Status> for domain::installment::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Pending => Self::Pending,
            Status::Paid => Self::Paid,
            Status::Overdue => Self::Overdue,
        }
    }
}

/// Single entry of a custom payment plan.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "InstallmentScheduleEntry")]
pub struct ScheduleEntry {
    /// Kind of the `Installment`.
    pub kind: Kind,

    /// `DateTime` when the `Installment` comes due.
    pub due_at: DateTime,

    /// Amount to be paid.
    pub amount: Money,
}

impl From<ScheduleEntry> for domain::installment::CustomInstallment {
    fn from(entry: ScheduleEntry) -> Self {
        let ScheduleEntry {
            kind,
            due_at,
            amount,
        } = entry;
        Self {
            kind: kind.into(),
            due_at: due_at.coerce(),
            amount,
        }
    }
}
