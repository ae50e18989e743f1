mod optimize;

pub use optimize::{DatabaseOptimizationReport, OptimizeDatabaseUseCase};
