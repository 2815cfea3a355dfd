//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{domain::profile::Role, query, read, Query as _};

use crate::{api, define_error, menu, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the currently authenticated `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myProfile",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_profile(ctx: &Context) -> Result<api::Profile, Error> {
        let my_id = ctx.current_session().await?.profile_id;
        ctx.service()
            .execute(query::profile::ById::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ProfileError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the navigation menu of the currently authenticated `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "menu",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn menu(ctx: &Context) -> Result<Vec<menu::MenuItem>, Error> {
        let session = ctx.current_session().await?;
        Ok(menu::for_role(session.role))
    }

    /// Returns the `Profile` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROFILE_NOT_EXISTS` - the `Profile` with the specified ID does not
    ///                          exist;
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is not a `SUPERADMIN`
    ///                         and tries to access another `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "profile",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn profile(
        id: api::profile::Id,
        ctx: &Context,
    ) -> Result<api::Profile, Error> {
        let session = ctx.current_session().await?;
        if session.profile_id != id && session.role != Role::Superadmin {
            return Err(ctx.error()(api::PrivilegeError::Insufficient.into()));
        }

        ctx.service()
            .execute(query::profile::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ProfileError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Lists the `Profile`s, optionally narrowed to the specified role.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is not a `SUPERADMIN`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "profiles",
            otel.name = Self::SPAN_NAME,
            role = ?role,
        ),
    )]
    pub async fn profiles(
        role: Option<api::profile::Role>,
        ctx: &Context,
    ) -> Result<Vec<api::Profile>, Error> {
        _ = ctx.authorize(&[Role::Superadmin]).await?;

        ctx.service()
            .execute(query::profiles::List::by(role.map(Into::into)))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|profiles| profiles.into_iter().map(Into::into).collect())
    }

    /// Returns the `Plot` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PLOT_NOT_EXISTS` - the `Plot` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "plot",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn plot(
        id: api::plot::Id,
        ctx: &Context,
    ) -> Result<api::Plot, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::plot::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| PlotError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Plot` with the specified number.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PLOT_NOT_EXISTS` - the `Plot` with the specified number does not
    ///                       exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "plotByNumber",
            number = %number,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn plot_by_number(
        number: api::plot::Number,
        ctx: &Context,
    ) -> Result<api::Plot, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::plot::ByNumber::by(number.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| PlotError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Lists the `Plot`s matching the specified filters.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "plots",
            otel.name = Self::SPAN_NAME,
            owner_id = ?owner_id,
            status = ?status,
            town = ?town.as_ref().map(ToString::to_string),
        ),
    )]
    pub async fn plots(
        status: Option<api::plot::Status>,
        town: Option<api::plot::TownName>,
        owner_id: Option<api::profile::Id>,
        ctx: &Context,
    ) -> Result<Vec<api::Plot>, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::plots::List::by(read::plot::list::Filter {
                status: status.map(Into::into),
                town: town.map(Into::into),
                owner_id: owner_id.map(Into::into),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|plots| plots.into_iter().map(Into::into).collect())
    }

    /// Returns the `Installment` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INSTALLMENT_NOT_EXISTS` - the `Installment` with the specified ID
    ///                              does not exist;
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is neither an
    ///                         `ACCOUNTANT` nor a `SUPERADMIN`, nor the
    ///                         `Profile` obliged to pay it.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "installment",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn installment(
        id: api::installment::Id,
        ctx: &Context,
    ) -> Result<api::Installment, Error> {
        let session = ctx.current_session().await?;

        let installment = ctx
            .service()
            .execute(query::installment::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| InstallmentError::NotExists.into())
            .map_err(ctx.error())?;

        let is_own = api::profile::Id::from(installment.profile_id)
            == session.profile_id;
        if !is_own
            && !matches!(session.role, Role::Accountant | Role::Superadmin)
        {
            return Err(ctx.error()(api::PrivilegeError::Insufficient.into()));
        }

        Ok(installment.into())
    }

    /// Lists the `Installment`s matching the specified filters.
    ///
    /// `CLIENT`s only see their own `Installment`s, whatever the filters say.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is neither an
    ///                         `ACCOUNTANT`, nor a `SUPERADMIN`, nor a
    ///                         `CLIENT`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "installments",
            otel.name = Self::SPAN_NAME,
            plot_id = ?plot_id,
            profile_id = ?profile_id,
            status = ?status,
        ),
    )]
    pub async fn installments(
        plot_id: Option<api::plot::Id>,
        profile_id: Option<api::profile::Id>,
        status: Option<api::installment::Status>,
        ctx: &Context,
    ) -> Result<Vec<api::Installment>, Error> {
        let session = ctx.current_session().await?;
        let profile_id = if session.role == Role::Client {
            Some(session.profile_id)
        } else {
            _ = ctx.authorize(&[Role::Accountant, Role::Superadmin]).await?;
            profile_id
        };

        ctx.service()
            .execute(query::installments::List::by(
                read::installment::list::Filter {
                    plot_id: plot_id.map(Into::into),
                    profile_id: profile_id.map(Into::into),
                    status: status.map(Into::into),
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Lists all the `InstallmentTemplate`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "installmentTemplates",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn installment_templates(
        ctx: &Context,
    ) -> Result<Vec<api::InstallmentTemplate>, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::templates::List::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|templates| templates.into_iter().map(Into::into).collect())
    }

    /// Returns the `PurchaseRequest` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PURCHASE_REQUEST_NOT_EXISTS` - the `PurchaseRequest` with the
    ///                                   specified ID does not exist;
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is not a `SUPERADMIN`
    ///                         and is not the client who placed it.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "purchaseRequest",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn purchase_request(
        id: api::purchase_request::Id,
        ctx: &Context,
    ) -> Result<api::PurchaseRequest, Error> {
        let session = ctx.current_session().await?;

        let request = ctx
            .service()
            .execute(query::purchase_request::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| PurchaseRequestError::NotExists.into())
            .map_err(ctx.error())?;

        let is_own =
            api::profile::Id::from(request.client_id) == session.profile_id;
        if !is_own && session.role != Role::Superadmin {
            return Err(ctx.error()(api::PrivilegeError::Insufficient.into()));
        }

        Ok(request.into())
    }

    /// Lists the `PurchaseRequest`s matching the specified filters.
    ///
    /// `CLIENT`s only see their own `PurchaseRequest`s, whatever the filters
    /// say.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is neither a
    ///                         `SUPERADMIN` nor a `CLIENT`.
    #[tracing::instrument(
        skip_all,
        fields(
            client_id = ?client_id,
            gql.name = "purchaseRequests",
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn purchase_requests(
        client_id: Option<api::profile::Id>,
        status: Option<api::purchase_request::Status>,
        ctx: &Context,
    ) -> Result<Vec<api::PurchaseRequest>, Error> {
        let session = ctx.current_session().await?;
        let client_id = if session.role == Role::Client {
            Some(session.profile_id)
        } else {
            _ = ctx.authorize(&[Role::Superadmin]).await?;
            client_id
        };

        ctx.service()
            .execute(query::purchase_requests::List::by(
                read::purchase_request::list::Filter {
                    client_id: client_id.map(Into::into),
                    status: status.map(Into::into),
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Lists the `Transfer`s matching the specified filters.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is not a `SUPERADMIN`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "transfers",
            otel.name = Self::SPAN_NAME,
            plot_id = ?plot_id,
            to = ?to,
        ),
    )]
    pub async fn transfers(
        plot_id: Option<api::plot::Id>,
        to: Option<api::profile::Id>,
        ctx: &Context,
    ) -> Result<Vec<api::Transfer>, Error> {
        _ = ctx.authorize(&[Role::Superadmin]).await?;

        ctx.service()
            .execute(query::transfers::List::by(read::transfer::list::Filter {
                plot_id: plot_id.map(Into::into),
                to: to.map(Into::into),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|transfers| transfers.into_iter().map(Into::into).collect())
    }
}

define_error! {
    enum InstallmentError {
        #[code = "INSTALLMENT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Installment` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum InstallmentTemplateError {
        #[code = "INSTALLMENT_TEMPLATE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`InstallmentTemplate` with the specified ID does not \
                     exist"]
        NotExists,
    }
}

define_error! {
    enum PlotError {
        #[code = "PLOT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Plot` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum ProfileError {
        #[code = "PROFILE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Profile` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum PurchaseRequestError {
        #[code = "PURCHASE_REQUEST_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`PurchaseRequest` with the specified ID does not exist"]
        NotExists,
    }
}
