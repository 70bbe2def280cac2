// Crate-internal.
// ---

pub(crate) mod reporting {
    pub(crate) mod dashboard_metrics;
    pub(crate) mod goal_progress;
    pub(crate) mod partner_summary;
    pub(crate) mod payout_history;
}

// Public exports.
// ---

pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod reporting {
        pub use crate::impl_ext::reporting::dashboard_metrics::*;
        pub use crate::impl_ext::reporting::goal_progress::*;
        pub use crate::impl_ext::reporting::partner_summary::*;
        pub use crate::impl_ext::reporting::payout_history::*;
    }
}
