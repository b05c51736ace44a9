pub mod optimization_cache;
pub mod reporter;
pub mod result_writer;
pub mod title_optimizer;

pub use optimization_cache::OptimizationCache;
pub use reporter::{NoopReporter, Reporter, RunStats, TracingReporter};
pub use result_writer::ResultWriter;
pub use title_optimizer::TitleOptimizer;
