use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 输入文件中的一篇文章
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub link: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub published: String,
}

/// 一篇文章的优化结果
///
/// 时间戳保存为字符串，缓存中的记录原样写回。
/// 手工编辑缓存时额外加入的键保存在 `extra` 中并一并写回；
/// 已知字段中的数字会按文本写回（`2024` → `"2024"`）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizedRecord {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub original_title: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub optimized_title: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub link: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub published: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub optimized_at: String,
    /// 其他未知字段
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OptimizedRecord {
    /// 由原文章和新标题构建记录，`original_title` 始终取自原文章
    pub fn from_article(
        article: &ArticleRecord,
        optimized_title: impl Into<String>,
        optimized_at: impl Into<String>,
    ) -> Self {
        Self {
            original_title: article.title.clone(),
            optimized_title: optimized_title.into(),
            description: article.description.clone(),
            link: article.link.clone(),
            published: article.published.clone(),
            optimized_at: optimized_at.into(),
            extra: Map::new(),
        }
    }
}

/// 一次运行的最终产物，也是下一次运行的缓存
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub optimization_timestamp: String,
    #[serde(default)]
    pub articles: Vec<OptimizedRecord>,
}

/// 当前本地时间，ISO-8601 格式（不带时区）
pub fn now_timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

// Helper function to deserialize a text field that may be null or a number
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}
