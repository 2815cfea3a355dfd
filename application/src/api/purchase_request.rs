//! [`PurchaseRequest`]-related definitions.

use common::DateTime;
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

/// A client's `PurchaseRequest` for buying a `Plot`.
#[derive(Clone, Debug)]
pub struct PurchaseRequest {
    /// ID of this [`PurchaseRequest`].
    pub id: Id,

    /// [`domain::PurchaseRequest`] representing this [`PurchaseRequest`].
    request: OnceCell<domain::PurchaseRequest>,
}

impl From<domain::PurchaseRequest> for PurchaseRequest {
    fn from(request: domain::PurchaseRequest) -> Self {
        Self {
            id: request.id.into(),
            request: OnceCell::new_with(Some(request)),
        }
    }
}

impl PurchaseRequest {
    /// Creates a new [`PurchaseRequest`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`PurchaseRequest`] with the provided ID
    /// exists, otherwise accessing this [`PurchaseRequest`] will result with
    /// an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            request: OnceCell::new(),
        }
    }

    /// Returns the [`domain::PurchaseRequest`] representing this
    /// [`PurchaseRequest`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::PurchaseRequest`] doesn't exist.
    async fn request(
        &self,
        ctx: &Context,
    ) -> Result<&domain::PurchaseRequest, Error> {
        let id = self.id.into();
        self.request
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::purchase_request::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|r| {
                        future::ready(r.ok_or_else(|| {
                            api::query::PurchaseRequestError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A client's `PurchaseRequest` for buying a `Plot`.
#[graphql_object(context = Context)]
impl PurchaseRequest {
    /// Unique identifier of this `PurchaseRequest`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PurchaseRequest.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// `Profile` of the client who placed this `PurchaseRequest`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PurchaseRequest.client",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn client(&self, ctx: &Context) -> Result<api::Profile, Error> {
        let client_id = self.request(ctx).await?.client_id;
        #[expect(
            unsafe_code,
            reason = "`client_id` loaded from repository guarantees \
                      `Profile` existence"
        )]
        Ok(unsafe { api::Profile::new_unchecked(client_id) })
    }

    /// `Plot` this `PurchaseRequest` asks to buy.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PurchaseRequest.plot",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn plot(&self, ctx: &Context) -> Result<api::Plot, Error> {
        let plot_id = self.request(ctx).await?.plot_id;
        #[expect(
            unsafe_code,
            reason = "`plot_id` loaded from repository guarantees `Plot` \
                      existence"
        )]
        Ok(unsafe { api::Plot::new_unchecked(plot_id) })
    }

    /// Label of the payment plan this `PurchaseRequest` asks for.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PurchaseRequest.planLabel",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn plan_label(&self, ctx: &Context) -> Result<PlanLabel, Error> {
        Ok(self.request(ctx).await?.plan_label.clone().into())
    }

    /// Status of this `PurchaseRequest`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PurchaseRequest.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status(&self, ctx: &Context) -> Result<Status, Error> {
        Ok(self.request(ctx).await?.status.into())
    }

    /// `DateTime` when this `PurchaseRequest` was placed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PurchaseRequest.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.request(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `PurchaseRequest`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::purchase_request::Id)]
#[into(domain::purchase_request::Id)]
#[graphql(name = "PurchaseRequestId", transparent)]
pub struct Id(Uuid);

/// Label of the payment plan a `PurchaseRequest` asks for.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PurchaseRequestPlanLabel",
    with = scalar::Via::<domain::purchase_request::PlanLabel>,
)]
pub struct PlanLabel(domain::purchase_request::PlanLabel);

/// Status of a `PurchaseRequest`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "PurchaseRequestStatus")]
pub enum Status {
    /// `PurchaseRequest` is awaiting review.
    Pending,

    /// `PurchaseRequest` has been approved and the sale finalized.
    Approved,

    /// `PurchaseRequest` has been rejected.
    Rejected,
}

impl From<domain::purchase_request::Status> for Status {
    fn from(status: domain::purchase_request::Status) -> Self {
        match status {
            domain::purchase_request::Status::Pending => Self::Pending,
            domain::purchase_request::Status::Approved => Self::Approved,
            domain::purchase_request::Status::Rejected => Self::Rejected,
        }
    }
}

impl From<Status> for domain::purchase_request::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Pending => Self::Pending,
            Status::Approved => Self::Approved,
            Status::Rejected => Self::Rejected,
        }
    }
}
