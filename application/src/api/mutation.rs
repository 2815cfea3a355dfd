//! GraphQL [`Mutation`]s definitions.

use common::{DateTime, Money, Percent};
use juniper::graphql_object;
use service::{
    command,
    domain::{installment, profile::Role, template},
    query, Command as _, Query as _,
};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Registers a new `Plot` with the provided details.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PLOT_NUMBER_OCCUPIED` - provided `PlotNumber` is occupied by
    ///                            another `Plot`;
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is neither a `MANAGER`
    ///                         nor a `SUPERADMIN`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createPlot",
            number = %number,
            otel.name = Self::SPAN_NAME,
            price = price.to_string(),
            size_marla = %size_marla,
            town = %town,
        ),
    )]
    pub async fn create_plot(
        number: api::plot::Number,
        town: api::plot::TownName,
        size_marla: i32,
        price: Money,
        ctx: &Context,
    ) -> Result<api::Plot, Error> {
        let size_marla = size_marla.try_into().map_err(AsError::into_error)?;

        _ = ctx.authorize(&[Role::Manager, Role::Superadmin]).await?;

        ctx.service()
            .execute(command::CreatePlot {
                number: number.into(),
                town: town.into(),
                size_marla,
                price,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Registers a new `Profile` with the provided details.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CNIC_OCCUPIED` - provided `ProfileCnic` is occupied by another
    ///                     `Profile`;
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is not a `SUPERADMIN`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createProfile",
            name = %name,
            otel.name = Self::SPAN_NAME,
            role = ?role,
        ),
    )]
    pub async fn create_profile(
        name: api::profile::Name,
        cnic: api::profile::Cnic,
        role: api::profile::Role,
        ctx: &Context,
    ) -> Result<api::Profile, Error> {
        _ = ctx.authorize(&[Role::Superadmin]).await?;

        ctx.service()
            .execute(command::CreateProfile {
                name: name.into(),
                cnic: cnic.into(),
                role: role.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `InstallmentTemplate` with the provided details.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `TEMPLATE_NAME_OCCUPIED` - provided `InstallmentTemplateName` is
    ///                              occupied by another `InstallmentTemplate`;
    /// - `INVALID_MONTHS` - provided `months` is not a positive number;
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is not a `SUPERADMIN`.
    #[tracing::instrument(
        skip_all,
        fields(
            down_payment = %down_payment,
            gql.name = "createInstallmentTemplate",
            months = %months,
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_installment_template(
        name: api::template::Name,
        down_payment: Percent,
        months: i32,
        ctx: &Context,
    ) -> Result<api::InstallmentTemplate, Error> {
        let months = u32::try_from(months)
            .ok()
            .and_then(template::TotalMonths::new)
            .ok_or_else(|| MonthsError::Invalid.into())
            .map_err(ctx.error())?;

        _ = ctx.authorize(&[Role::Superadmin]).await?;

        ctx.service()
            .execute(command::CreateInstallmentTemplate {
                name: name.into(),
                down_payment,
                months,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Sells the `Plot` to the client with the provided `ProfileCnic`,
    /// generating its `Installment` ledger.
    ///
    /// The payment plan is taken either from the `InstallmentTemplate` with
    /// the provided name, or from the explicitly provided schedule.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PLAN_AMBIGUOUS` - exactly one of `templateName` or `schedule` must
    ///                      be provided;
    /// - `INSTALLMENT_TEMPLATE_NOT_EXISTS` - no `InstallmentTemplate` with
    ///                                       the provided name exists;
    /// - `PLOT_NOT_EXISTS` - the `Plot` with the provided ID does not exist;
    /// - `PLOT_UNAVAILABLE` - the `Plot` with the provided ID is not open
    ///                        for sale;
    /// - `CLIENT_NOT_FOUND` - the provided `ProfileCnic` does not resolve to
    ///                        any `Profile`;
    /// - `INVALID_PLAN` - the plan cannot produce a valid ledger;
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is neither a `MANAGER`
    ///                         nor a `SUPERADMIN`.
    #[tracing::instrument(
        skip_all,
        fields(
            client_cnic = %client_cnic,
            gql.name = "sellPlot",
            otel.name = Self::SPAN_NAME,
            plot_id = %plot_id,
            template_name = ?template_name.as_ref().map(ToString::to_string),
        ),
    )]
    pub async fn sell_plot(
        plot_id: api::plot::Id,
        client_cnic: api::profile::Cnic,
        template_name: Option<api::template::Name>,
        schedule: Option<Vec<api::installment::ScheduleEntry>>,
        ctx: &Context,
    ) -> Result<Vec<api::Installment>, Error> {
        _ = ctx.authorize(&[Role::Manager, Role::Superadmin]).await?;

        let client = ctx
            .service()
            .execute(query::profile::ByCnic::by(client_cnic.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| LookupError::ClientNotFound.into())
            .map_err(ctx.error())?;

        let plan = match (template_name, schedule) {
            (Some(name), None) => {
                let tpl = ctx
                    .service()
                    .execute(query::template::ByName::by(name.into()))
                    .await
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())?
                    .ok_or_else(|| {
                        api::query::InstallmentTemplateError::NotExists.into()
                    })
                    .map_err(ctx.error())?;
                installment::Plan::from(&tpl)
            }
            (None, Some(entries)) => installment::Plan::Custom(
                entries.into_iter().map(Into::into).collect(),
            ),
            (Some(_), Some(_)) | (None, None) => {
                return Err(ctx.error()(PlanChoiceError::Ambiguous.into()));
            }
        };

        ctx.service()
            .execute(command::SellPlot {
                plot_id: plot_id.into(),
                client_id: client.id,
                plan,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ledger| ledger.into_iter().map(Into::into).collect())
    }

    /// Marks the `Installment` with the provided ID as paid.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INSTALLMENT_ALREADY_SETTLED` - the `Installment` has already been
    ///                                   paid;
    /// - `INSTALLMENT_NOT_EXISTS` - the `Installment` with the provided ID
    ///                              does not exist;
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is neither an
    ///                         `ACCOUNTANT` nor a `SUPERADMIN`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "markInstallmentPaid",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn mark_installment_paid(
        id: api::installment::Id,
        ctx: &Context,
    ) -> Result<api::Installment, Error> {
        _ = ctx.authorize(&[Role::Accountant, Role::Superadmin]).await?;

        ctx.service()
            .execute(command::MarkInstallmentPaid {
                installment_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Amends the due date and amount of the `Installment` with the provided
    /// ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INSTALLMENT_ALREADY_SETTLED` - the `Installment` has already been
    ///                                   paid;
    /// - `INSTALLMENT_NOT_EXISTS` - the `Installment` with the provided ID
    ///                              does not exist;
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is neither an
    ///                         `ACCOUNTANT` nor a `SUPERADMIN`.
    #[tracing::instrument(
        skip_all,
        fields(
            amount = amount.to_string(),
            due_at = %due_at.to_rfc3339(),
            gql.name = "amendInstallment",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn amend_installment(
        id: api::installment::Id,
        due_at: DateTime,
        amount: Money,
        ctx: &Context,
    ) -> Result<api::Installment, Error> {
        _ = ctx.authorize(&[Role::Accountant, Role::Superadmin]).await?;

        ctx.service()
            .execute(command::AmendInstallment {
                installment_id: id.into(),
                due_at: due_at.coerce(),
                amount,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Transfers the ownership of the `Plot` to the `Profile` with the
    /// provided `ProfileCnic`.
    ///
    /// All the pending `Installment`s of the `Plot` move to the new owner,
    /// and an immutable `Transfer` record is written.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PLOT_NOT_EXISTS` - the `Plot` with the provided ID does not exist;
    /// - `OWNER_NOT_FOUND` - the provided `ProfileCnic` does not resolve to
    ///                       any `Profile`;
    /// - `TRANSFER_NUMBER_OCCUPIED` - the generated `TransferNumber` collided
    ///                                with an existing `Transfer`;
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is not a `SUPERADMIN`.
    #[tracing::instrument(
        skip_all,
        fields(
            fee = fee.to_string(),
            gql.name = "transferPlot",
            otel.name = Self::SPAN_NAME,
            plot_id = %plot_id,
            to_cnic = %to_cnic,
        ),
    )]
    pub async fn transfer_plot(
        plot_id: api::plot::Id,
        to_cnic: api::profile::Cnic,
        fee: Money,
        ctx: &Context,
    ) -> Result<api::Transfer, Error> {
        _ = ctx.authorize(&[Role::Superadmin]).await?;

        let new_owner = ctx
            .service()
            .execute(query::profile::ByCnic::by(to_cnic.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| LookupError::OwnerNotFound.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::TransferPlot {
                plot_id: plot_id.into(),
                to: new_owner.id,
                fee,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Places a new `PurchaseRequest` for the `Plot` on behalf of the
    /// currently authenticated `Profile`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PLOT_NOT_EXISTS` - the `Plot` with the provided ID does not exist;
    /// - `PLOT_UNAVAILABLE` - the `Plot` with the provided ID is not open
    ///                        for sale.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createPurchaseRequest",
            otel.name = Self::SPAN_NAME,
            plan_label = %plan_label,
            plot_id = %plot_id,
        ),
    )]
    pub async fn create_purchase_request(
        plot_id: api::plot::Id,
        plan_label: api::purchase_request::PlanLabel,
        ctx: &Context,
    ) -> Result<api::PurchaseRequest, Error> {
        let my_id = ctx.current_session().await?.profile_id;

        ctx.service()
            .execute(command::CreatePurchaseRequest {
                client_id: my_id.into(),
                plot_id: plot_id.into(),
                plan_label: plan_label.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Approves the `PurchaseRequest` with the provided ID, finalizing the
    /// sale and generating the `Installment` ledger.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `REQUEST_ALREADY_FINALIZED` - the `PurchaseRequest` has already
    ///                                 been reviewed;
    /// - `PURCHASE_REQUEST_NOT_EXISTS` - the `PurchaseRequest` with the
    ///                                   provided ID does not exist;
    /// - `UNKNOWN_PLAN_LABEL` - no `InstallmentTemplate` matches the plan
    ///                          label of the `PurchaseRequest`;
    /// - `PLOT_NOT_EXISTS` - the requested `Plot` does not exist anymore;
    /// - `PLOT_UNAVAILABLE` - the requested `Plot` is not open for sale;
    /// - `INVALID_PLAN` - the plan cannot produce a valid ledger;
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is not a `SUPERADMIN`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "approvePurchaseRequest",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn approve_purchase_request(
        id: api::purchase_request::Id,
        ctx: &Context,
    ) -> Result<Vec<api::Installment>, Error> {
        _ = ctx.authorize(&[Role::Superadmin]).await?;

        ctx.service()
            .execute(command::ApprovePurchaseRequest {
                request_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ledger| ledger.into_iter().map(Into::into).collect())
    }

    /// Rejects the `PurchaseRequest` with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `REQUEST_ALREADY_FINALIZED` - the `PurchaseRequest` has already
    ///                                 been reviewed;
    /// - `PURCHASE_REQUEST_NOT_EXISTS` - the `PurchaseRequest` with the
    ///                                   provided ID does not exist;
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is not a `SUPERADMIN`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "rejectPurchaseRequest",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn reject_purchase_request(
        id: api::purchase_request::Id,
        ctx: &Context,
    ) -> Result<api::PurchaseRequest, Error> {
        _ = ctx.authorize(&[Role::Superadmin]).await?;

        ctx.service()
            .execute(command::RejectPurchaseRequest {
                request_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Records the biometric verification of the `Profile` with the provided
    /// ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROFILE_NOT_EXISTS` - the `Profile` with the provided ID does not
    ///                          exist;
    /// - `INSUFFICIENT_ROLE` - the current `Profile` is not a `SUPERADMIN`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "verifyBiometric",
            otel.name = Self::SPAN_NAME,
            profile_id = %profile_id,
        ),
    )]
    pub async fn verify_biometric(
        profile_id: api::profile::Id,
        biometric_ref: api::profile::BiometricRef,
        ctx: &Context,
    ) -> Result<api::Profile, Error> {
        _ = ctx.authorize(&[Role::Superadmin]).await?;

        ctx.service()
            .execute(command::VerifyBiometric {
                profile_id: profile_id.into(),
                biometric_ref: biometric_ref.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum MonthsError {
        #[code = "INVALID_MONTHS"]
        #[status = BAD_REQUEST]
        #[message = "Provided `months` must be a positive number"]
        Invalid,
    }
}

define_error! {
    enum PlanChoiceError {
        #[code = "PLAN_AMBIGUOUS"]
        #[status = BAD_REQUEST]
        #[message = "Exactly one of `templateName` or `schedule` must be \
                     provided"]
        Ambiguous,
    }
}

define_error! {
    enum LookupError {
        #[code = "CLIENT_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Provided `ProfileCnic` does not resolve to any `Profile`"]
        ClientNotFound,

        #[code = "OWNER_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Provided `ProfileCnic` does not resolve to any `Profile`"]
        OwnerNotFound,
    }
}

impl AsError for command::create_plot::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PLOT_NUMBER_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`PlotNumber` is occupied by another `Plot`"]
                NumberOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DuplicateNumber(_) => Some(Error::NumberOccupied.into()),
        }
    }
}

impl AsError for command::create_profile::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CNIC_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`ProfileCnic` is occupied by another `Profile`"]
                CnicOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DuplicateCnic(_) => Some(Error::CnicOccupied.into()),
        }
    }
}

impl AsError for command::create_installment_template::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "TEMPLATE_NAME_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`InstallmentTemplateName` is occupied by another \
                             `InstallmentTemplate`"]
                NameOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DuplicateName(_) => Some(Error::NameOccupied.into()),
        }
    }
}

impl AsError for command::sell_plot::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CLIENT_NOT_FOUND"]
                #[status = NOT_FOUND]
                #[message = "Client `Profile` does not exist"]
                ClientNotExists,

                #[code = "INVALID_PLAN"]
                #[status = BAD_REQUEST]
                #[message = "Plan cannot produce a valid `Installment` ledger"]
                InvalidPlan,

                #[code = "PLOT_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Plot` with the provided ID does not exist"]
                PlotNotExists,

                #[code = "PLOT_UNAVAILABLE"]
                #[status = CONFLICT]
                #[message = "`Plot` with the provided ID is not open for sale"]
                PlotUnavailable,
            }
        }

        Some(match self {
            Self::ClientNotExists(_) => Error::ClientNotExists.into(),
            Self::Db(e) => return e.try_as_error(),
            Self::InvalidPlan(_) => Error::InvalidPlan.into(),
            Self::PlotNotExists(_) => Error::PlotNotExists.into(),
            Self::PlotUnavailable(_) => Error::PlotUnavailable.into(),
        })
    }
}

impl AsError for command::mark_installment_paid::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INSTALLMENT_ALREADY_SETTLED"]
                #[status = CONFLICT]
                #[message = "`Installment` with the provided ID has already \
                             been paid"]
                AlreadySettled,

                #[code = "INSTALLMENT_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Installment` with the provided ID does not \
                             exist"]
                NotExists,
            }
        }

        Some(match self {
            Self::AlreadySettled(_) => Error::AlreadySettled.into(),
            Self::Db(e) => return e.try_as_error(),
            Self::InstallmentNotExists(_) => Error::NotExists.into(),
        })
    }
}

impl AsError for command::amend_installment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INSTALLMENT_ALREADY_SETTLED"]
                #[status = CONFLICT]
                #[message = "`Installment` with the provided ID has already \
                             been paid"]
                AlreadySettled,

                #[code = "INSTALLMENT_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Installment` with the provided ID does not \
                             exist"]
                NotExists,
            }
        }

        Some(match self {
            Self::AlreadySettled(_) => Error::AlreadySettled.into(),
            Self::Db(e) => return e.try_as_error(),
            Self::InstallmentNotExists(_) => Error::NotExists.into(),
        })
    }
}

impl AsError for command::transfer_plot::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "TRANSFER_NUMBER_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "Generated `TransferNumber` collided with an \
                             existing `Transfer`"]
                NumberOccupied,

                #[code = "OWNER_NOT_FOUND"]
                #[status = NOT_FOUND]
                #[message = "Receiving `Profile` does not exist"]
                OwnerNotExists,

                #[code = "PLOT_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Plot` with the provided ID does not exist"]
                PlotNotExists,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::DuplicateNumber(_) => Error::NumberOccupied.into(),
            Self::OwnerNotExists(_) => Error::OwnerNotExists.into(),
            Self::PlotNotExists(_) => Error::PlotNotExists.into(),
        })
    }
}

impl AsError for command::create_purchase_request::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PLOT_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Plot` with the provided ID does not exist"]
                PlotNotExists,

                #[code = "PLOT_UNAVAILABLE"]
                #[status = CONFLICT]
                #[message = "`Plot` with the provided ID is not open for sale"]
                PlotUnavailable,
            }
        }

        Some(match self {
            Self::ClientNotExists(_) => return None,
            Self::Db(e) => return e.try_as_error(),
            Self::PlotNotExists(_) => Error::PlotNotExists.into(),
            Self::PlotUnavailable(_) => Error::PlotUnavailable.into(),
        })
    }
}

impl AsError for command::approve_purchase_request::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_PLAN"]
                #[status = BAD_REQUEST]
                #[message = "Plan cannot produce a valid `Installment` ledger"]
                InvalidPlan,

                #[code = "PLOT_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Requested `Plot` does not exist anymore"]
                PlotNotExists,

                #[code = "PLOT_UNAVAILABLE"]
                #[status = CONFLICT]
                #[message = "Requested `Plot` is not open for sale"]
                PlotUnavailable,

                #[code = "REQUEST_ALREADY_FINALIZED"]
                #[status = CONFLICT]
                #[message = "`PurchaseRequest` with the provided ID has \
                             already been reviewed"]
                RequestAlreadyFinalized,

                #[code = "PURCHASE_REQUEST_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`PurchaseRequest` with the provided ID does not \
                             exist"]
                RequestNotExists,

                #[code = "UNKNOWN_PLAN_LABEL"]
                #[status = BAD_REQUEST]
                #[message = "No `InstallmentTemplate` matches the plan label \
                             of the `PurchaseRequest`"]
                UnknownPlanLabel,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::InvalidPlan(_) => Error::InvalidPlan.into(),
            Self::PlotNotExists(_) => Error::PlotNotExists.into(),
            Self::PlotUnavailable(_) => Error::PlotUnavailable.into(),
            Self::RequestAlreadyFinalized(_) => {
                Error::RequestAlreadyFinalized.into()
            }
            Self::RequestNotExists(_) => Error::RequestNotExists.into(),
            Self::UnknownPlanLabel(_) => Error::UnknownPlanLabel.into(),
        })
    }
}

impl AsError for command::reject_purchase_request::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "REQUEST_ALREADY_FINALIZED"]
                #[status = CONFLICT]
                #[message = "`PurchaseRequest` with the provided ID has \
                             already been reviewed"]
                RequestAlreadyFinalized,

                #[code = "PURCHASE_REQUEST_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`PurchaseRequest` with the provided ID does not \
                             exist"]
                RequestNotExists,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::RequestAlreadyFinalized(_) => {
                Error::RequestAlreadyFinalized.into()
            }
            Self::RequestNotExists(_) => Error::RequestNotExists.into(),
        })
    }
}

impl AsError for command::verify_biometric::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PROFILE_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Profile` with the provided ID does not exist"]
                NotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ProfileNotExists(_) => Some(Error::NotExists.into()),
        }
    }
}
