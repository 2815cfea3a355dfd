//! Read entities definitions.

pub mod installment;
pub mod plot;
pub mod purchase_request;
pub mod transfer;
