//! 标题优化服务 - 业务能力层
//!
//! 只负责"把一个标题改写得更吸引人"，不关心文章列表和缓存
//!
//! ## 重试策略
//! - 错误文本包含 "rate limit" 视为限流，等待 2 秒后重试
//! - 最多重试 3 次（共 4 次请求）
//! - 其他错误立即返回，不重试

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::clients::ChatBackend;
use crate::error::{LlmError, OptimizeError};
use crate::services::reporter::Reporter;

/// 限流后的最大重试次数
pub const MAX_RETRIES: usize = 3;

/// 最多请求次数（首次 + 重试）
pub const MAX_ATTEMPTS: usize = MAX_RETRIES + 1;

/// 每次限流重试前的等待时间
pub const RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// 单次请求的结果分类
#[derive(Debug)]
enum AttemptOutcome {
    /// 拿到了文本
    Success(String),
    /// 限流，可以重试
    Transient(LlmError),
    /// 其他错误，不再重试
    Permanent(LlmError),
}

impl From<Result<String, LlmError>> for AttemptOutcome {
    fn from(result: Result<String, LlmError>) -> Self {
        match result {
            Ok(text) => AttemptOutcome::Success(text),
            Err(e) if e.is_rate_limited() => AttemptOutcome::Transient(e),
            Err(e) => AttemptOutcome::Permanent(e),
        }
    }
}

/// 标题优化服务
///
/// 职责：
/// - 构建提示词
/// - 调用 LLM 并按限流策略重试
/// - 清理返回的标题文本
/// - 不出现 Vec<ArticleRecord>
/// - 不关心缓存
pub struct TitleOptimizer<B> {
    backend: B,
    reporter: Arc<dyn Reporter>,
}

impl<B: ChatBackend> TitleOptimizer<B> {
    /// 创建新的标题优化服务
    pub fn new(backend: B, reporter: Arc<dyn Reporter>) -> Self {
        Self { backend, reporter }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 为一篇文章生成新标题
    ///
    /// # 参数
    /// - `title`: 原标题
    /// - `description`: 文章描述
    ///
    /// # 返回
    /// 返回清理后的新标题；限流重试耗尽或遇到其他错误时返回 `OptimizeError`
    pub async fn optimize(&self, title: &str, description: &str) -> Result<String, OptimizeError> {
        let prompt = build_prompt(title, description);
        let mut attempt = 0;

        loop {
            attempt += 1;
            self.reporter.request_started(title, attempt);

            match AttemptOutcome::from(self.backend.complete(&prompt).await) {
                AttemptOutcome::Success(raw) => {
                    let optimized = clean_title(&raw);
                    self.reporter.optimize_succeeded(title, &optimized);
                    return Ok(optimized);
                }
                AttemptOutcome::Transient(source) if attempt < MAX_ATTEMPTS => {
                    self.reporter.retry_scheduled(title, attempt, MAX_ATTEMPTS, &source);
                    sleep(RETRY_BACKOFF).await;
                }
                AttemptOutcome::Transient(source) => {
                    let err = OptimizeError::RateLimitExhausted {
                        attempts: attempt,
                        source,
                    };
                    self.reporter.optimize_failed(title, &err);
                    return Err(err);
                }
                AttemptOutcome::Permanent(source) => {
                    let err = OptimizeError::Remote { source };
                    self.reporter.optimize_failed(title, &err);
                    return Err(err);
                }
            }
        }
    }
}

/// 构建标题优化提示词
pub fn build_prompt(title: &str, description: &str) -> String {
    format!(
        r#"Given this original title: "{}"
and description: "{}"
Generate a more engaging title that is:
- Clear and concise (max 10 words)
- Engaging but not clickbait
- Factually accurate
Return only the new title, nothing else."#,
        title, description
    )
}

/// 去掉首尾空白和模型可能加上的引号
pub fn clean_title(raw: &str) -> String {
    raw.trim().trim_matches('"').trim().to_string()
}
