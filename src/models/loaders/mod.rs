pub mod json_loader;

pub use json_loader::{load_articles, load_run_result};
