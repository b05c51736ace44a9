//! 文章列表处理器 - 编排层
//!
//! ## 职责
//!
//! 按顺序遍历本次运行的文章（`Vec<ArticleRecord>` 的前 N 篇），
//! 委托 `ArticleFlow` 处理单篇文章，并维护统计。
//!
//! - 严格串行，不并发
//! - 单篇失败不影响后续文章
//! - 输出保持原文章顺序（缓存与新结果交错）

use crate::clients::ChatBackend;
use crate::models::{ArticleRecord, OptimizedRecord};
use crate::services::{OptimizationCache, RunStats};
use crate::workflow::{ArticleCtx, ArticleFlow, ProcessResult};

/// 处理前 `limit` 篇文章
///
/// # 返回
/// 返回 (按文章顺序排列的结果, 统计信息)
pub async fn process_articles<B: ChatBackend>(
    flow: &ArticleFlow<B>,
    articles: &[ArticleRecord],
    limit: usize,
    cache: &OptimizationCache,
) -> (Vec<OptimizedRecord>, RunStats) {
    let mut records = Vec::new();
    let mut stats = RunStats::default();

    for (index, article) in articles.iter().take(limit).enumerate() {
        let ctx = ArticleCtx::new(index + 1);
        let result = flow.run(article, &ctx, cache).await;

        stats.total += 1;
        match &result {
            ProcessResult::Cached(_) => stats.cached += 1,
            ProcessResult::Optimized(_) => stats.optimized += 1,
            ProcessResult::Failed(_) => stats.failed += 1,
        }
        records.extend(result.into_record());
    }

    (records, stats)
}
