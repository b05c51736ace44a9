//! 文章处理流程 - 流程层
//!
//! 核心职责：定义"一篇文章"的完整处理流程
//!
//! 流程顺序：
//! 1. 命中缓存 → 原样复用
//! 2. 未命中 → （必要时等待）→ 优化标题 → 生成新记录
//! 3. 优化失败 → 报告并跳过，不影响其他文章

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

use crate::clients::ChatBackend;
use crate::error::OptimizeError;
use crate::models::{now_timestamp, ArticleRecord, OptimizedRecord};
use crate::services::{OptimizationCache, Reporter, TitleOptimizer};
use crate::workflow::article_ctx::ArticleCtx;

/// 第一篇之后每次远程调用前的固定等待
pub const PACING_DELAY: Duration = Duration::from_secs(1);

/// 文章处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 命中缓存，未调用 LLM
    Cached(OptimizedRecord),
    /// 新生成的标题
    Optimized(OptimizedRecord),
    /// 永久失败，文章不会出现在结果中
    Failed(OptimizeError),
}

impl ProcessResult {
    /// 写入结果文件的记录（失败时没有）
    pub fn into_record(self) -> Option<OptimizedRecord> {
        match self {
            ProcessResult::Cached(record) | ProcessResult::Optimized(record) => Some(record),
            ProcessResult::Failed(_) => None,
        }
    }
}

/// 文章处理流程
///
/// - 决定何时复用缓存、何时调用 LLM
/// - 失败只影响当前文章
/// - 只依赖业务能力（services）
pub struct ArticleFlow<B> {
    optimizer: TitleOptimizer<B>,
    reporter: Arc<dyn Reporter>,
}

impl<B: ChatBackend> ArticleFlow<B> {
    /// 创建新的文章处理流程
    pub fn new(backend: B, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            optimizer: TitleOptimizer::new(backend, reporter.clone()),
            reporter,
        }
    }

    pub fn optimizer(&self) -> &TitleOptimizer<B> {
        &self.optimizer
    }

    pub async fn run(
        &self,
        article: &ArticleRecord,
        ctx: &ArticleCtx,
        cache: &OptimizationCache,
    ) -> ProcessResult {
        self.reporter.article_started(ctx.index, &article.title);

        // ========== 流程 1: 缓存 ==========
        if let Some(cached) = cache.get(&article.title) {
            self.reporter.cache_hit(ctx.index, cached);
            return ProcessResult::Cached(cached.clone());
        }

        // ========== 流程 2: 调用 LLM ==========
        if ctx.pace_before_call {
            debug!("{} 等待 {:?} 后再请求", ctx, PACING_DELAY);
            sleep(PACING_DELAY).await;
        }

        match self
            .optimizer
            .optimize(&article.title, &article.description)
            .await
        {
            Ok(optimized_title) => ProcessResult::Optimized(OptimizedRecord::from_article(
                article,
                optimized_title,
                now_timestamp(),
            )),
            // ========== 流程 3: 失败兜底 ==========
            Err(e) => {
                self.reporter.article_skipped(ctx.index, &e);
                ProcessResult::Failed(e)
            }
        }
    }
}
