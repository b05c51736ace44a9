//! 结果写入服务 - 业务能力层
//!
//! 只负责"把本次运行的结果整体写入文件"能力，不关心流程

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::DataError;
use crate::models::{now_timestamp, OptimizedRecord, RunResult};

/// 结果写入服务
///
/// 职责：
/// - 确保输出目录存在
/// - 以 `{optimization_timestamp, articles}` 格式整体覆盖写入
/// - 不做增量合并（合并只在内存中进行）
pub struct ResultWriter {
    output_path: PathBuf,
}

impl ResultWriter {
    /// 使用指定输出路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 写入本次运行结果
    ///
    /// # 参数
    /// - `articles`: 按文章顺序排列的优化结果
    ///
    /// # 返回
    /// 返回实际写入的 `RunResult`
    pub async fn write(&self, articles: &[OptimizedRecord]) -> Result<RunResult, DataError> {
        let result = RunResult {
            optimization_timestamp: now_timestamp(),
            articles: articles.to_vec(),
        };

        debug!(
            "写入结果: {} 条 -> {}",
            result.articles.len(),
            self.output_path.display()
        );

        if let Some(parent) = self.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| DataError::WriteFailed {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let json = serde_json::to_string_pretty(&result).map_err(DataError::SerializeFailed)?;

        fs::write(&self.output_path, json)
            .await
            .map_err(|source| DataError::WriteFailed {
                path: self.output_path.clone(),
                source,
            })?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::load_run_result;
    use tempfile::tempdir;

    fn record(original: &str, optimized: &str) -> OptimizedRecord {
        OptimizedRecord {
            original_title: original.to_string(),
            optimized_title: optimized.to_string(),
            description: "Beschreibung mit Umlauten: äöü".to_string(),
            link: "https://example.com".to_string(),
            published: "2024-01-01".to_string(),
            optimized_at: "2024-01-01T00:00:00.000000".to_string(),
            ..OptimizedRecord::default()
        }
    }

    #[tokio::test]
    async fn test_creates_directory_and_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("optimized_titles.json");
        let writer = ResultWriter::with_path(&path);

        let written = writer.write(&[record("A", "Better A")]).await.unwrap();
        assert!(path.exists());

        let loaded = load_run_result(&path).await.unwrap().unwrap();
        assert_eq!(loaded, written);
        assert_eq!(loaded.articles[0].optimized_title, "Better A");
        assert!(!loaded.optimization_timestamp.is_empty());
    }

    #[tokio::test]
    async fn test_pretty_utf8_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("optimized_titles.json");
        ResultWriter::with_path(&path)
            .write(&[record("A", "B")])
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("äöü"));
        assert!(content.contains("\n  \"articles\""));
    }

    #[tokio::test]
    async fn test_overwrites_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("optimized_titles.json");
        let writer = ResultWriter::with_path(&path);

        writer
            .write(&[record("A", "1"), record("B", "2")])
            .await
            .unwrap();
        writer.write(&[record("C", "3")]).await.unwrap();

        let loaded = load_run_result(&path).await.unwrap().unwrap();
        assert_eq!(loaded.articles.len(), 1);
        assert_eq!(loaded.articles[0].original_title, "C");
    }

    #[tokio::test]
    async fn test_empty_run_still_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("optimized_titles.json");
        let result = ResultWriter::with_path(&path).write(&[]).await.unwrap();
        assert!(result.articles.is_empty());
        assert!(path.exists());
    }
}
