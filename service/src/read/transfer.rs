//! [`Transfer`]-related read definitions.

pub mod list {
    //! [`Transfer`]s list definitions.

    use crate::domain::{plot, profile};
    #[cfg(doc)]
    use crate::domain::{Plot, Profile, Transfer};

    /// Filter for listing [`Transfer`]s.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`Plot`] to filter by.
        pub plot_id: Option<plot::Id>,

        /// Receiving [`Profile`] to filter by.
        pub to: Option<profile::Id>,
    }
}
