use crate::error::DataError;
use crate::models::article::{ArticleRecord, RunResult};
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// 从 JSON 文件加载文章列表
///
/// 文件缺失或内容无效都会返回 `DataError`，由调用方终止运行。
pub async fn load_articles(path: &Path) -> Result<Vec<ArticleRecord>, DataError> {
    let articles: Vec<ArticleRecord> = read_json(path).await?;
    tracing::info!("成功加载 {} 篇文章: {}", articles.len(), path.display());
    Ok(articles)
}

/// 加载上一次运行的结果文件
///
/// 文件不存在时返回 `Ok(None)`。
pub async fn load_run_result(path: &Path) -> Result<Option<RunResult>, DataError> {
    match read_json(path).await {
        Ok(result) => Ok(Some(result)),
        Err(DataError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let content = fs::read_to_string(path).await.map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            DataError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            DataError::ReadFailed {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|source| DataError::ParseFailed {
        path: path.to_path_buf(),
        source,
    })
}
