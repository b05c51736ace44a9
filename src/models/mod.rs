pub mod article;
pub mod loaders;

pub use article::{now_timestamp, ArticleRecord, OptimizedRecord, RunResult};
pub use loaders::{load_articles, load_run_result};
