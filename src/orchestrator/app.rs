//! 应用入口 - 编排层
//!
//! ## 核心功能
//!
//! 1. **加载文章**：输入文件缺失或损坏直接终止（不写任何结果）
//! 2. **加载缓存**：读取上一次的结果文件，缺失时为空缓存
//! 3. **逐篇处理**：委托 `article_processor`
//! 4. **写入结果**：整体覆盖输出文件
//! 5. **全局统计**：通过 `Reporter` 输出

use std::path::PathBuf;
use std::sync::Arc;

use crate::clients::{ChatBackend, LlmClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{load_articles, RunResult};
use crate::orchestrator::article_processor;
use crate::services::{OptimizationCache, Reporter, ResultWriter, RunStats, TracingReporter};
use crate::workflow::ArticleFlow;

/// 一次运行的汇总
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub stats: RunStats,
    pub output_path: PathBuf,
    pub result: RunResult,
}

/// 应用主结构
pub struct App<B = LlmClient> {
    config: Config,
    flow: ArticleFlow<B>,
    reporter: Arc<dyn Reporter>,
}

impl App<LlmClient> {
    /// 使用真实 LLM 客户端初始化应用
    pub fn initialize(config: Config) -> Self {
        let client = LlmClient::new(&config);
        Self::with_backend(config, client, Arc::new(TracingReporter))
    }
}

impl<B: ChatBackend> App<B> {
    /// 使用指定后端和报告器初始化应用
    pub fn with_backend(config: Config, backend: B, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            flow: ArticleFlow::new(backend, reporter.clone()),
            config,
            reporter,
        }
    }

    pub fn backend(&self) -> &B {
        self.flow.optimizer().backend()
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<RunSummary> {
        self.reporter.run_started(
            self.backend().model_name(),
            &self.config.input_path,
            self.config.article_limit,
        );

        // 输入文件必须可用，否则不做任何处理
        let articles = load_articles(&self.config.input_path).await?;

        let cache = OptimizationCache::load(&self.config.output_path).await;

        let (records, stats) = article_processor::process_articles(
            &self.flow,
            &articles,
            self.config.article_limit,
            &cache,
        )
        .await;

        let writer = ResultWriter::with_path(&self.config.output_path);
        let result = writer.write(&records).await?;
        self.reporter.results_saved(writer.output_path(), result.articles.len());

        self.reporter.run_finished(&stats, writer.output_path());

        Ok(RunSummary {
            stats,
            output_path: writer.output_path().to_path_buf(),
            result,
        })
    }
}
