mod jobs;
mod observability;

pub use jobs::build_job_runner;
pub use observability::ObservabilityServices;
