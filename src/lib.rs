//! # Title Optimizer
//!
//! 读取文章列表，调用 LLM 为每篇文章生成更吸引人的标题，并将结果写入文件。
//! 上一次运行的结果文件同时作为缓存，已优化过的标题不再重复请求。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 持有 HTTP 客户端，只暴露能力
//! - `ChatBackend` - "发一条消息、拿回文本"的能力
//! - `LlmClient` - 基于 `async-openai` 的实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单篇文章
//! - `TitleOptimizer` - 提示词 + 限流重试
//! - `OptimizationCache` - 按原标题查找上一次的结果
//! - `ResultWriter` - 整体写入结果文件
//! - `Reporter` - 进度输出
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一篇文章"的完整处理流程
//! - `ArticleFlow` - 缓存 → 等待 → 优化 → 记录 / 跳过
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 加载输入与缓存、写入结果
//! - `orchestrator/article_processor` - 串行遍历前 N 篇文章
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ChatBackend, LlmClient};
pub use config::Config;
pub use error::{AppError, AppResult, ConfigError, DataError, LlmError, OptimizeError};
pub use models::{ArticleRecord, OptimizedRecord, RunResult};
pub use orchestrator::{App, RunSummary};
pub use services::{NoopReporter, OptimizationCache, Reporter, RunStats, TracingReporter};
pub use workflow::{ArticleCtx, ArticleFlow, ProcessResult};
