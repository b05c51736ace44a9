//! 集成测试共用的脚本化后端和记录型报告器

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use title_optimizer::{
    App, ArticleRecord, ChatBackend, Config, LlmError, OptimizeError, OptimizedRecord, Reporter,
};

/// 某个标题的后端行为
#[derive(Debug, Clone)]
pub enum Behavior {
    /// 返回固定文本
    Reply(String),
    /// 每次都返回限流错误
    AlwaysRateLimited,
    /// 返回非限流错误
    Fail(String),
}

/// 按标题脚本化的后端，记录每次调用对应的原标题
#[derive(Default)]
pub struct ScriptedBackend {
    behaviors: HashMap<String, Behavior>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, title: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(title.to_string(), behavior);
        self
    }

    /// 所有调用（按顺序）的原标题
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, title: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.as_str() == title)
            .count()
    }
}

/// 从提示词中取出原标题
fn title_from_prompt(prompt: &str) -> String {
    prompt
        .split("original title: \"")
        .nth(1)
        .and_then(|rest| rest.split("\"\nand description").next())
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, user_message: &str) -> Result<String, LlmError> {
        let title = title_from_prompt(user_message);
        self.calls.lock().unwrap().push(title.clone());

        match self.behaviors.get(&title) {
            Some(Behavior::Reply(text)) => Ok(text.clone()),
            Some(Behavior::AlwaysRateLimited) => Err(LlmError::ApiCallFailed {
                model: "scripted".to_string(),
                message: "Status 429: Requests rate limit exceeded".to_string(),
            }),
            Some(Behavior::Fail(message)) => Err(LlmError::ApiCallFailed {
                model: "scripted".to_string(),
                message: message.clone(),
            }),
            None => Ok(format!("\"Engaging: {}\"", title)),
        }
    }
}

/// 记录事件的报告器
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl Reporter for RecordingReporter {
    fn cache_hit(&self, index: usize, record: &OptimizedRecord) {
        self.push(format!("cache_hit {} {}", index, record.original_title));
    }

    fn request_started(&self, title: &str, attempt: usize) {
        self.push(format!("request {} #{}", title, attempt));
    }

    fn retry_scheduled(&self, title: &str, attempt: usize, _max: usize, _error: &LlmError) {
        self.push(format!("retry {} #{}", title, attempt));
    }

    fn optimize_succeeded(&self, title: &str, optimized_title: &str) {
        self.push(format!("success {} -> {}", title, optimized_title));
    }

    fn optimize_failed(&self, title: &str, error: &OptimizeError) {
        self.push(format!("failed {} after {}", title, error.attempts()));
    }

    fn article_skipped(&self, index: usize, _error: &OptimizeError) {
        self.push(format!("skipped {}", index));
    }

    fn results_saved(&self, _path: &Path, count: usize) {
        self.push(format!("saved {}", count));
    }
}

pub fn article(title: &str) -> ArticleRecord {
    ArticleRecord {
        title: title.to_string(),
        description: format!("Description of {}", title),
        link: format!("https://news.example.com/{}", title.replace(' ', "-")),
        published: "Mon, 01 Jan 2024 10:00:00 GMT".to_string(),
    }
}

pub fn write_articles(path: &Path, articles: &[ArticleRecord]) {
    std::fs::write(path, serde_json::to_string_pretty(articles).unwrap()).unwrap();
}

/// 指向临时目录的配置
pub fn test_config(dir: &Path) -> Config {
    Config {
        api_key: "test-key".to_string(),
        input_path: dir.join("data.json"),
        output_path: dir.join("data").join("optimized_titles.json"),
        log_dir: dir.join("logs"),
        ..Config::default()
    }
}

pub fn app(
    config: Config,
    backend: ScriptedBackend,
) -> (App<ScriptedBackend>, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::default());
    let app = App::with_backend(config, backend, reporter.clone());
    (app, reporter)
}

pub fn output_path(dir: &Path) -> PathBuf {
    dir.join("data").join("optimized_titles.json")
}
