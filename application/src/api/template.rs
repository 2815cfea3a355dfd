//! [`InstallmentTemplate`]-related definitions.

use common::{DateTime, Percent};
use derive_more::{AsRef, Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// Reusable payment plan an `Installment` ledger is generated from.
#[derive(Clone, Debug)]
pub struct InstallmentTemplate {
    /// ID of this [`InstallmentTemplate`].
    pub id: Id,

    /// [`domain::InstallmentTemplate`] representing this
    /// [`InstallmentTemplate`].
    template: OnceCell<domain::InstallmentTemplate>,
}

impl From<domain::InstallmentTemplate> for InstallmentTemplate {
    fn from(template: domain::InstallmentTemplate) -> Self {
        Self {
            id: template.id.into(),
            template: OnceCell::new_with(Some(template)),
        }
    }
}

impl InstallmentTemplate {
    /// Creates a new [`InstallmentTemplate`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`InstallmentTemplate`] with the provided ID
    /// exists, otherwise accessing this [`InstallmentTemplate`] will result
    /// with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            template: OnceCell::new(),
        }
    }

    /// Returns the [`domain::InstallmentTemplate`] representing this
    /// [`InstallmentTemplate`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::InstallmentTemplate`] doesn't exist.
    async fn template(
        &self,
        ctx: &Context,
    ) -> Result<&domain::InstallmentTemplate, Error> {
        let id = self.id.into();
        self.template
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::template::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|t| {
                        future::ready(t.ok_or_else(|| {
                            api::query::InstallmentTemplateError::NotExists
                                .into()
                        }))
                    })
            })
            .await
    }
}

/// Reusable payment plan an `Installment` ledger is generated from.
#[graphql_object(context = Context)]
impl InstallmentTemplate {
    /// Unique identifier of this `InstallmentTemplate`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "InstallmentTemplate.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `InstallmentTemplate`, unique within the society.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "InstallmentTemplate.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.template(ctx).await?.name.clone().into())
    }

    /// Share of the price paid upfront.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "InstallmentTemplate.downPayment",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn down_payment(&self, ctx: &Context) -> Result<Percent, Error> {
        Ok(self.template(ctx).await?.down_payment)
    }

    /// Number of monthly `Installment`s the remainder is split into.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "InstallmentTemplate.months",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn months(&self, ctx: &Context) -> Result<i32, Error> {
        self.template(ctx)
            .await?
            .months
            .get()
            .try_into()
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// `DateTime` when this `InstallmentTemplate` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "InstallmentTemplate.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.template(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of an `InstallmentTemplate`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::template::Id)]
#[into(domain::template::Id)]
#[graphql(name = "InstallmentTemplateId", transparent)]
pub struct Id(Uuid);

/// Name of an `InstallmentTemplate`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "InstallmentTemplateName",
    with = scalar::Via::<domain::template::Name>,
)]
pub struct Name(domain::template::Name);
