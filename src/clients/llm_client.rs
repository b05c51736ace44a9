//! LLM API 客户端 - 基础设施层
//!
//! 持有 HTTP 客户端，只暴露"发一条消息、拿回文本"的能力
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 兼容 OpenAI API 的服务（默认 Mistral）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoff;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::LlmError;

/// 聊天补全能力
///
/// 一次调用 = 一条 user 消息组成的完整对话，返回生成的文本。
/// 测试中可替换为脚本化实现。
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// 模型名称（仅用于日志）
    fn model_name(&self) -> &str;

    /// 发送单条用户消息
    async fn complete(&self, user_message: &str) -> Result<String, LlmError>;
}

/// LLM 客户端
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    ///
    /// 每次 `complete` 只发一次 HTTP 请求，重试由 `TitleOptimizer` 负责。
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.api_base_url);

        // 关闭 async-openai 内置的 429/5xx 指数退避重试
        let no_retry = ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        Self {
            client: Client::with_config(openai_config).with_backoff(no_retry),
            model_name: config.model_name.clone(),
        }
    }

    fn build_failed(e: impl std::fmt::Display) -> LlmError {
        LlmError::RequestBuildFailed {
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl ChatBackend for LlmClient {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn complete(&self, user_message: &str) -> Result<String, LlmError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(Self::build_failed)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .build()
            .map_err(Self::build_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            LlmError::ApiCallFailed {
                model: self.model_name.clone(),
                message: e.to_string(),
            }
        })?;

        debug!("LLM API 调用成功");

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_configured_model() {
        let config = Config {
            api_key: "test-key".to_string(),
            ..Config::default()
        };
        let client = LlmClient::new(&config);
        assert_eq!(client.model_name(), "mistral-small-latest");

        let config = Config {
            model_name: "open-mistral-nemo".to_string(),
            ..config
        };
        assert_eq!(LlmClient::new(&config).model_name(), "open-mistral-nemo");
    }

    /// 真实 API 调用
    ///
    /// 运行方式：
    /// ```bash
    /// MISTRAL_API_KEY=... cargo test test_complete_live -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_complete_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::from_env().expect("需要设置 MISTRAL_API_KEY");
        let client = LlmClient::new(&config);

        let result = client.complete("Reply with the single word: pong").await;
        match result {
            Ok(response) => {
                println!("LLM 响应: {}", response);
                assert!(!response.is_empty());
            }
            Err(e) => panic!("LLM 调用失败: {}", e),
        }
    }
}
