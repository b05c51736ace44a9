//! 进度报告 - 业务能力层
//!
//! 优化器和编排层通过 `Reporter` 输出进度，不直接依赖全局日志

use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::error::{LlmError, OptimizeError};
use crate::models::OptimizedRecord;
use crate::utils::logging::{log_startup, print_final_stats, truncate_text};

/// 一次运行的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// 新生成的标题
    pub optimized: usize,
    /// 复用缓存
    pub cached: usize,
    /// 永久失败被跳过
    pub failed: usize,
    /// 处理的文章总数
    pub total: usize,
}

impl RunStats {
    /// 写入结果文件的记录数
    pub fn written(&self) -> usize {
        self.optimized + self.cached
    }
}

/// 进度报告能力
///
/// 所有方法默认什么都不做，实现方按需覆盖。
pub trait Reporter: Send + Sync {
    /// 本次运行开始
    fn run_started(&self, _model: &str, _input: &Path, _article_limit: usize) {}

    /// 本次运行结束
    fn run_finished(&self, _stats: &RunStats, _output: &Path) {}

    /// 开始处理第 `index` 篇文章（从 1 开始）
    fn article_started(&self, _index: usize, _title: &str) {}

    /// 命中缓存，跳过远程调用
    fn cache_hit(&self, _index: usize, _record: &OptimizedRecord) {}

    /// 即将发起第 `attempt` 次请求
    fn request_started(&self, _title: &str, _attempt: usize) {}

    /// 遇到限流，等待后重试
    fn retry_scheduled(
        &self,
        _title: &str,
        _attempt: usize,
        _max_attempts: usize,
        _error: &LlmError,
    ) {
    }

    /// 生成新标题成功
    fn optimize_succeeded(&self, _title: &str, _optimized_title: &str) {}

    /// 优化失败（该文章将被跳过）
    fn optimize_failed(&self, _title: &str, _error: &OptimizeError) {}

    /// 文章因优化失败被跳过，不影响后续文章
    fn article_skipped(&self, _index: usize, _error: &OptimizeError) {}

    /// 结果已写入文件
    fn results_saved(&self, _path: &Path, _count: usize) {}
}

/// 什么都不输出
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {}

/// 通过 `tracing` 输出到控制台和日志文件
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn run_started(&self, model: &str, input: &Path, article_limit: usize) {
        log_startup(model, input, article_limit);
    }

    fn run_finished(&self, stats: &RunStats, output: &Path) {
        print_final_stats(stats.optimized, stats.cached, stats.failed, stats.total, output);
        debug!("共写入 {} 条记录", stats.written());
    }

    fn article_started(&self, index: usize, title: &str) {
        info!("\n📰 文章 {}:", index);
        info!("原标题: {}", title);
    }

    fn cache_hit(&self, _index: usize, record: &OptimizedRecord) {
        info!("♻️ 已在缓存中 (优化于 {})", record.optimized_at);
        info!("优化后: {}", record.optimized_title);
        info!("{}", "-".repeat(50));
    }

    fn request_started(&self, title: &str, attempt: usize) {
        info!(
            "🤖 正在请求 LLM 优化标题 (第 {} 次): {}",
            attempt,
            truncate_text(title, 60)
        );
    }

    fn retry_scheduled(&self, title: &str, attempt: usize, max_attempts: usize, error: &LlmError) {
        warn!(
            "API 请求频繁限制 (尝试 {}/{}), 等待 2 秒后重试... [{}] {}",
            attempt,
            max_attempts,
            truncate_text(title, 40),
            error
        );
    }

    fn optimize_succeeded(&self, _title: &str, optimized_title: &str) {
        info!("✓ 优化后: {}", optimized_title);
        info!("{}", "-".repeat(50));
    }

    fn optimize_failed(&self, title: &str, error: &OptimizeError) {
        error!("❌ 标题优化失败 [{}]: {}", truncate_text(title, 40), error);
    }

    fn article_skipped(&self, index: usize, error: &OptimizeError) {
        warn!(
            "⚠️ 文章 {} 已跳过 (共请求 {} 次)，继续处理下一篇",
            index,
            error.attempts()
        );
        info!("{}", "-".repeat(50));
    }

    fn results_saved(&self, path: &Path, count: usize) {
        info!("\n💾 {} 条优化结果已保存至: {}", count, path.display());
    }
}
