//! [`Transfer`]-related definitions.

use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    Context,
};

/// Immutable record of a `Plot` ownership `Transfer`.
#[derive(Clone, Debug, From)]
pub struct Transfer(domain::Transfer);

/// Immutable record of a `Plot` ownership `Transfer`.
#[graphql_object(context = Context)]
impl Transfer {
    /// Unique identifier of this `Transfer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Transfer.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `Plot` whose ownership was transferred.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Transfer.plot",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn plot(&self) -> api::Plot {
        #[expect(
            unsafe_code,
            reason = "`plot_id` loaded from repository guarantees `Plot` \
                      existence"
        )]
        unsafe {
            api::Plot::new_unchecked(self.0.plot_id)
        }
    }

    /// `Profile` the `Plot` was transferred from, if it had an owner.
    #[graphql(name = "from")]
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Transfer.from",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn from_owner(&self) -> Option<api::Profile> {
        self.0.from.map(|id| {
            #[expect(
                unsafe_code,
                reason = "`from` loaded from repository guarantees `Profile` \
                          existence"
            )]
            unsafe {
                api::Profile::new_unchecked(id)
            }
        })
    }

    /// `Profile` the `Plot` was transferred to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Transfer.to",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn to(&self) -> api::Profile {
        #[expect(
            unsafe_code,
            reason = "`to` loaded from repository guarantees `Profile` \
                      existence"
        )]
        unsafe {
            api::Profile::new_unchecked(self.0.to)
        }
    }

    /// Fee charged for this `Transfer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Transfer.fee",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn fee(&self) -> Money {
        self.0.fee
    }

    /// Human-readable number of this `Transfer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Transfer.number",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn number(&self) -> Number {
        self.0.number.clone().into()
    }

    /// `DateTime` when this `Transfer` was recorded.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Transfer.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Transfer`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::transfer::Id)]
#[into(domain::transfer::Id)]
#[graphql(name = "TransferId", transparent)]
pub struct Id(Uuid);

/// Human-readable number of a `Transfer`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TransferNumber",
    with = scalar::Via::<domain::transfer::Number>,
)]
pub struct Number(domain::transfer::Number);
