use crate::error::ConfigError;
use std::fmt;
use std::path::{Path, PathBuf};

const ENV_FILE: &str = ".env";

/// 凭证所在的环境变量
pub const API_KEY_VAR: &str = "MISTRAL_API_KEY";

/// 程序配置
#[derive(Clone)]
pub struct Config {
    // --- LLM 配置 ---
    pub api_key: String,
    pub api_base_url: String,
    pub model_name: String,
    // --- 数据文件 ---
    /// 输入文章列表
    pub input_path: PathBuf,
    /// 优化结果（同时作为下一次运行的缓存）
    pub output_path: PathBuf,
    /// 每次运行处理的文章数量
    pub article_limit: usize,
    // --- 日志 ---
    /// 日志目录，每次运行生成一个新文件
    pub log_dir: PathBuf,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: "https://api.mistral.ai/v1".to_string(),
            model_name: "mistral-small-latest".to_string(),
            input_path: PathBuf::from("data.json"),
            output_path: PathBuf::from("data").join("optimized_titles.json"),
            article_limit: 5,
            log_dir: PathBuf::from("logs"),
            verbose_logging: false,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("model_name", &self.model_name)
            .field("input_path", &self.input_path)
            .field("output_path", &self.output_path)
            .field("article_limit", &self.article_limit)
            .field("log_dir", &self.log_dir)
            .field("verbose_logging", &self.verbose_logging)
            .finish()
    }
}

impl Config {
    /// 从进程环境变量读取配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意查找函数构建配置，缺少 API 密钥时报错
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(API_KEY_VAR).ok_or_else(|| ConfigError::EnvVarNotFound {
            var_name: API_KEY_VAR.to_string(),
        })?;

        Ok(Self {
            api_key: api_key.trim().to_string(),
            api_base_url: non_empty("MISTRAL_API_BASE_URL").unwrap_or(default.api_base_url),
            model_name: non_empty("MISTRAL_MODEL").unwrap_or(default.model_name),
            log_dir: non_empty("LOG_DIR").map(PathBuf::from).unwrap_or(default.log_dir),
            verbose_logging: non_empty("VERBOSE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
            ..default
        })
    }

    /// 将 .env 文件载入进程环境，已存在的环境变量优先
    ///
    /// 会调用 `std::env::set_var`，只能在启动多线程运行时之前调用。
    pub fn load_env_file() {
        Self::load_env_file_from(Path::new(ENV_FILE));
    }

    pub fn load_env_file_from(path: &Path) {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return,
        };
        for (key, value) in parse_env_lines(&content) {
            if std::env::var(&key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }
}

/// 解析 KEY=VALUE 形式的行，忽略空行和注释
fn parse_env_lines(content: &str) -> Vec<(String, String)> {
    // Windows 编辑器可能写入 BOM
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content
        .lines()
        .map(|line| line.trim().trim_matches('\r'))
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect()
}
