//! Table assembly: signal/backup partitioning and menu regeneration.

pub mod partition;
pub mod regenerate;

pub use partition::partition;
pub use regenerate::{
    MissingList, MissingValue, NoEstimate, Regeneration, Regenerator, ValueEstimator,
};
