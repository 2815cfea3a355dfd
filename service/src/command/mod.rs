//! [`Command`] definition.

pub mod amend_installment;
pub mod approve_purchase_request;
pub mod authorize_session;
pub mod create_installment_template;
pub mod create_plot;
pub mod create_profile;
pub mod create_purchase_request;
pub mod flag_overdue_installments;
pub mod mark_installment_paid;
pub mod reject_purchase_request;
pub mod sell_plot;
pub mod transfer_plot;
pub mod verify_biometric;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    amend_installment::AmendInstallment,
    approve_purchase_request::ApprovePurchaseRequest,
    authorize_session::AuthorizeSession,
    create_installment_template::CreateInstallmentTemplate,
    create_plot::CreatePlot, create_profile::CreateProfile,
    create_purchase_request::CreatePurchaseRequest,
    flag_overdue_installments::FlagOverdueInstallments,
    mark_installment_paid::MarkInstallmentPaid,
    reject_purchase_request::RejectPurchaseRequest, sell_plot::SellPlot,
    transfer_plot::TransferPlot, verify_biometric::VerifyBiometric,
};
