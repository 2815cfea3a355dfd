//! Role-scoped navigation menu definitions.

use juniper::GraphQLEnum;
use service::domain::profile;

/// Single item of the navigation menu.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum MenuItem {
    /// Overview of the society.
    Dashboard,

    /// Management of all `Plot`s.
    Plots,

    /// Selling `Plot`s and reviewing `PurchaseRequest`s.
    Selling,

    /// Management of `Installment`s and payments.
    Installments,

    /// Management of `Profile`s.
    Profiles,

    /// Review of `PurchaseRequest`s.
    PurchaseRequests,

    /// History of ownership `Transfer`s.
    Transfers,

    /// System settings.
    Settings,

    /// `Plot`s owned by the current `Profile`.
    MyPlots,

    /// `Installment`s of the current `Profile`.
    MyInstallments,

    /// `PurchaseRequest`s of the current `Profile`.
    MyRequests,
}

/// Returns the [`MenuItem`]s available to the provided [`profile::Role`].
#[must_use]
pub fn for_role(role: profile::Role) -> Vec<MenuItem> {
    use MenuItem as M;

    match role {
        profile::Role::Superadmin => vec![
            M::Dashboard,
            M::Plots,
            M::Selling,
            M::Installments,
            M::Profiles,
            M::PurchaseRequests,
            M::Transfers,
            M::Settings,
        ],
        profile::Role::Manager => vec![M::Dashboard, M::Plots, M::Selling],
        profile::Role::Accountant => vec![M::Dashboard, M::Installments],
        profile::Role::Client => vec![
            M::Dashboard,
            M::MyPlots,
            M::MyInstallments,
            M::MyRequests,
        ],
    }
}

#[cfg(test)]
mod spec {
    use service::domain::profile::Role;

    use super::{for_role, MenuItem};

    #[test]
    fn superadmin_sees_all_management_sections() {
        let menu = for_role(Role::Superadmin);

        for item in [
            MenuItem::Plots,
            MenuItem::Selling,
            MenuItem::Installments,
            MenuItem::Profiles,
            MenuItem::PurchaseRequests,
            MenuItem::Transfers,
            MenuItem::Settings,
        ] {
            assert!(menu.contains(&item), "missing {item:?}");
        }
    }

    #[test]
    fn manager_is_scoped_to_plots_and_selling() {
        assert_eq!(
            for_role(Role::Manager),
            vec![MenuItem::Dashboard, MenuItem::Plots, MenuItem::Selling],
        );
    }

    #[test]
    fn accountant_is_scoped_to_installments() {
        assert_eq!(
            for_role(Role::Accountant),
            vec![MenuItem::Dashboard, MenuItem::Installments],
        );
    }

    #[test]
    fn client_sees_own_items_only() {
        let menu = for_role(Role::Client);

        assert_eq!(
            menu,
            vec![
                MenuItem::Dashboard,
                MenuItem::MyPlots,
                MenuItem::MyInstallments,
                MenuItem::MyRequests,
            ],
        );
        assert!(!menu.contains(&MenuItem::Profiles));
        assert!(!menu.contains(&MenuItem::Settings));
    }

    #[test]
    fn every_role_starts_with_dashboard() {
        for role in [
            Role::Superadmin,
            Role::Manager,
            Role::Accountant,
            Role::Client,
        ] {
            assert_eq!(for_role(role).first(), Some(&MenuItem::Dashboard));
        }
    }
}
