//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! app (加载文章 / 缓存，写入结果)
//!     ↓
//! article_processor (处理 Vec<ArticleRecord>)
//!     ↓
//! workflow::ArticleFlow (处理单篇文章)
//!     ↓
//! services (能力层：optimizer / cache / writer / reporter)
//!     ↓
//! clients (基础设施：LlmClient)
//! ```
//!
//! 编排层只做调度和统计，不做具体业务判断。

pub mod app;
pub mod article_processor;

// 重新导出主要类型
pub use app::{App, RunSummary};
pub use article_processor::process_articles;
