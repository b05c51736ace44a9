//! 优化缓存 - 业务能力层
//!
//! 上一次运行的结果文件即缓存，按原标题索引

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::models::{load_run_result, OptimizedRecord};

/// 原标题 → 上一次的优化结果
///
/// 以标题文本为键：两篇标题相同的文章共用同一条缓存。
#[derive(Debug, Default, Clone)]
pub struct OptimizationCache {
    entries: HashMap<String, OptimizedRecord>,
}

impl OptimizationCache {
    /// 从结果文件加载缓存
    ///
    /// 永不失败：文件不存在、没有 `articles` 字段或无法解析时都返回空缓存。
    pub async fn load(path: &Path) -> Self {
        match load_run_result(path).await {
            Ok(Some(previous)) => {
                let cache = Self::from_records(previous.articles);
                info!("♻️ 已加载 {} 条缓存的优化结果", cache.len());
                cache
            }
            Ok(None) => {
                debug!("缓存文件不存在: {}", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("⚠️ 缓存文件无法读取，按空缓存处理: {}", e);
                Self::default()
            }
        }
    }

    /// 由记录列表构建缓存，同一标题以最后一条为准
    pub fn from_records(records: impl IntoIterator<Item = OptimizedRecord>) -> Self {
        let entries = records
            .into_iter()
            .map(|record| (record.original_title.clone(), record))
            .collect();
        Self { entries }
    }

    pub fn get(&self, original_title: &str) -> Option<&OptimizedRecord> {
        self.entries.get(original_title)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn record(original: &str, optimized: &str) -> OptimizedRecord {
        OptimizedRecord {
            original_title: original.to_string(),
            optimized_title: optimized.to_string(),
            ..OptimizedRecord::default()
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_cache() {
        let dir = tempdir().unwrap();
        let cache = OptimizationCache::load(&dir.path().join("optimized_titles.json")).await;
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_file_without_articles_is_empty_cache() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("optimized_titles.json");
        fs::write(&path, r#"{"optimization_timestamp": "2024-01-01T00:00:00"}"#).unwrap();
        let cache = OptimizationCache::load(&path).await;
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_empty_cache() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("optimized_titles.json");
        fs::write(&path, "not json at all").unwrap();
        let cache = OptimizationCache::load(&path).await;
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_loads_records_by_title() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("optimized_titles.json");
        fs::write(
            &path,
            r#"{
                "optimization_timestamp": "2024-01-01T00:00:00",
                "articles": [
                    {"original_title": "A", "optimized_title": "Better A", "description": "",
                     "link": "", "published": "", "optimized_at": "2024-01-01T00:00:00"}
                ]
            }"#,
        )
        .unwrap();

        let cache = OptimizationCache::load(&path).await;
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("A").unwrap().optimized_title, "Better A");
        assert!(cache.get("B").is_none());
    }

    /// 已知限制：标题相同的两条记录只保留最后一条
    #[test]
    fn test_duplicate_titles_collapse_to_last_entry() {
        let cache = OptimizationCache::from_records(vec![
            record("Same title", "First version"),
            record("Same title", "Second version"),
        ]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("Same title").unwrap().optimized_title, "Second version");
    }
}
