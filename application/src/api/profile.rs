//! [`Profile`]-related definitions.

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

/// A `Profile` of a person registered in the society.
#[derive(Clone, Debug)]
pub struct Profile {
    /// ID of this [`Profile`].
    pub id: Id,

    /// [`domain::Profile`] representing this [`Profile`].
    profile: OnceCell<domain::Profile>,
}

impl From<domain::Profile> for Profile {
    fn from(profile: domain::Profile) -> Self {
        Self {
            id: profile.id.into(),
            profile: OnceCell::new_with(Some(profile)),
        }
    }
}

impl Profile {
    /// Creates a new [`Profile`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Profile`] with the provided ID exists,
    /// otherwise accessing this [`Profile`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            profile: OnceCell::new(),
        }
    }

    /// Returns the [`domain::Profile`] representing this [`Profile`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Profile`] doesn't exist.
    async fn profile(&self, ctx: &Context) -> Result<&domain::Profile, Error> {
        let id = self.id.into();
        self.profile
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::profile::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|p| {
                        future::ready(p.ok_or_else(|| {
                            api::query::ProfileError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A `Profile` of a person registered in the society.
#[graphql_object(context = Context)]
impl Profile {
    /// Unique identifier of this `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.profile(ctx).await?.name.clone().into())
    }

    /// [CNIC] of this `Profile`.
    ///
    /// Visible to the `Profile` itself and to `SUPERADMIN`s only.
    ///
    /// [CNIC]: https://wikipedia.org/wiki/CNIC_(Pakistan)
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.cnic",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn cnic(&self, ctx: &Context) -> Result<Option<Cnic>, Error> {
        let session = ctx.current_session().await?;

        let is_current = session.profile_id == self.id;
        Ok(
            if is_current
                || session.role == domain::profile::Role::Superadmin
            {
                Some(self.profile(ctx).await?.cnic.clone().into())
            } else {
                None
            },
        )
    }

    /// Role of this `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.role",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn role(&self, ctx: &Context) -> Result<Role, Error> {
        Ok(self.profile(ctx).await?.role.into())
    }

    /// Indicator whether this `Profile` has passed biometric verification.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.biometricVerified",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn biometric_verified(
        &self,
        ctx: &Context,
    ) -> Result<bool, Error> {
        Ok(self.profile(ctx).await?.biometric_verified)
    }

    /// Reference to the stored biometric record of this `Profile`.
    ///
    /// Visible to the `Profile` itself and to `SUPERADMIN`s only.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.biometricRef",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn biometric_ref(
        &self,
        ctx: &Context,
    ) -> Result<Option<BiometricRef>, Error> {
        let session = ctx.current_session().await?;

        let is_current = session.profile_id == self.id;
        Ok(
            if is_current
                || session.role == domain::profile::Role::Superadmin
            {
                self.profile(ctx).await?.biometric_ref.clone().map(Into::into)
            } else {
                None
            },
        )
    }

    /// `DateTime` when this `Profile` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.profile(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `Profile`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::profile::Id)]
#[into(domain::profile::Id)]
#[graphql(name = "ProfileId", transparent)]
pub struct Id(Uuid);

/// Name of a `Profile`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProfileName",
    with = scalar::Via::<domain::profile::Name>,
)]
pub struct Name(domain::profile::Name);

/// [CNIC] of a `Profile`.
///
/// [CNIC]: https://wikipedia.org/wiki/CNIC_(Pakistan)
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProfileCnic",
    with = scalar::Via::<domain::profile::Cnic>,
)]
pub struct Cnic(domain::profile::Cnic);

/// Reference to the stored biometric record of a `Profile`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProfileBiometricRef",
    with = scalar::Via::<domain::profile::BiometricRef>,
)]
pub struct BiometricRef(domain::profile::BiometricRef);

/// Role of a `Profile`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ProfileRole")]
pub enum Role {
    /// Full access to the whole system.
    Superadmin,

    /// Plot management and selling.
    Manager,

    /// Installment and payment management.
    Accountant,

    /// Regular member of the society.
    Client,
}

impl From<domain::profile::Role> for Role {
    fn from(role: domain::profile::Role) -> Self {
        match role {
            domain::profile::Role::Superadmin => Self::Superadmin,
            domain::profile::Role::Manager => Self::Manager,
            domain::profile::Role::Accountant => Self::Accountant,
            domain::profile::Role::Client => Self::Client,
        }
    }
}

impl From<Role> for domain::profile::Role {
    fn from(role: Role) -> Self {
        match role {
            Role::Superadmin => Self::Superadmin,
            Role::Manager => Self::Manager,
            Role::Accountant => Self::Accountant,
            Role::Client => Self::Client,
        }
    }
}
