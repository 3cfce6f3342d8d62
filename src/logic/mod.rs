pub mod aridity;
pub mod calculations;
pub mod coefficients;
pub mod deficit;
pub mod job_watch;
pub mod management;

pub use aridity::assess_aridity;
pub use deficit::compute_simple_deficit;
pub use job_watch::{cancel_pair, JobOutcome, JobWatcher};
pub use management::compute_management_plan;
