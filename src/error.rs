use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型（均为致命错误）
///
/// 单篇文章的 `OptimizeError` 在流程层被吸收，不会出现在这里。
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 数据文件错误
    #[error("数据错误: {0}")]
    Data(#[from] DataError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量不存在（或为空）
    #[error("环境变量 {var_name} 不存在，请在环境或 .env 文件中设置")]
    EnvVarNotFound { var_name: String },
}

/// 数据文件错误（DataUnavailable）
#[derive(Debug, Error)]
pub enum DataError {
    /// 文件不存在
    #[error("文件不存在: {}", path.display())]
    NotFound { path: PathBuf },
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({}): {source}", path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 序列化失败
    #[error("序列化结果失败: {0}")]
    SerializeFailed(#[source] serde_json::Error),
}

/// LLM 服务错误
///
/// `message` 保留底层错误的原始文本，限流判断基于这段文本。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    /// 构建请求失败
    #[error("构建 LLM 请求失败: {message}")]
    RequestBuildFailed { message: String },
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {message}")]
    ApiCallFailed { model: String, message: String },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

impl LlmError {
    /// 底层错误文本
    pub fn message(&self) -> &str {
        match self {
            LlmError::RequestBuildFailed { message } | LlmError::ApiCallFailed { message, .. } => {
                message
            }
            LlmError::EmptyContent { .. } => "",
        }
    }

    /// 错误文本中包含 "rate limit"（不区分大小写）即视为限流
    pub fn is_rate_limited(&self) -> bool {
        self.message().to_lowercase().contains("rate limit")
    }
}

/// 单篇文章的永久优化失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// 限流重试次数耗尽
    #[error("限流重试耗尽 (共尝试 {attempts} 次): {source}")]
    RateLimitExhausted {
        attempts: usize,
        #[source]
        source: LlmError,
    },
    /// 非限流错误，不重试
    #[error("{source}")]
    Remote {
        #[source]
        source: LlmError,
    },
}

impl OptimizeError {
    /// 实际发起的请求次数
    pub fn attempts(&self) -> usize {
        match self {
            OptimizeError::RateLimitExhausted { attempts, .. } => *attempts,
            OptimizeError::Remote { .. } => 1,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
