//! Domain definitions.

pub mod installment;
pub mod plot;
pub mod profile;
pub mod purchase_request;
pub mod template;
pub mod transfer;

pub use self::{
    installment::Installment, plot::Plot, profile::Profile,
    purchase_request::PurchaseRequest, template::InstallmentTemplate,
    transfer::Transfer,
};
