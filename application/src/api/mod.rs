//! GraphQL API definitions.

pub mod installment;
mod mutation;
pub mod plot;
pub mod profile;
pub mod purchase_request;
mod query;
pub mod scalar;
pub mod template;
pub mod transfer;

use crate::{define_error, Context};

pub use self::{
    installment::Installment, mutation::Mutation, plot::Plot,
    profile::Profile, purchase_request::PurchaseRequest, query::Query,
    template::InstallmentTemplate, transfer::Transfer,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<
    'static,
    Query,
    Mutation,
    juniper::EmptySubscription<Context>,
>;

define_error! {
    enum PrivilegeError {
        #[code = "INSUFFICIENT_ROLE"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `Profile` has no sufficient role"]
        Insufficient,
    }
}
