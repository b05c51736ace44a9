pub mod article_ctx;
pub mod article_flow;

pub use article_ctx::ArticleCtx;
pub use article_flow::{ArticleFlow, ProcessResult};
