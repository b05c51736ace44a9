use anyhow::{Context, Result};
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化日志：控制台 + 本次运行的日志文件
///
/// # 参数
/// - `log_dir`: 日志目录，每次运行生成一个带时间戳的新文件
/// - `verbose`: 未设置 `RUST_LOG` 时是否输出 debug 级别
///
/// # 返回
/// 返回本次运行的日志文件路径
pub fn init(log_dir: &Path, verbose: bool) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("无法创建日志目录: {}", log_dir.display()))?;

    let log_file_path = log_dir.join(log_file_name(&chrono::Local::now()));
    init_log_file(&log_file_path)?;

    let log_file = fs::OpenOptions::new()
        .append(true)
        .open(&log_file_path)
        .with_context(|| format!("无法打开日志文件: {}", log_file_path.display()))?;

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .try_init()
        .context("日志系统初始化失败")?;

    Ok(log_file_path)
}

/// 每次运行一个日志文件
fn log_file_name(now: &chrono::DateTime<chrono::Local>) -> String {
    format!("title_optimizer_{}.log", now.format("%Y%m%d_%H%M%S"))
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &Path) -> Result<()> {
    let log_header = format!(
        "{}\n标题优化日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path.display()))?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `model`: 模型名称
/// - `input`: 输入文件
/// - `article_limit`: 本次处理的文章数量上限
pub fn log_startup(model: &str, input: &Path, article_limit: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 标题优化工具启动");
    info!("🤖 模型: {}", model);
    info!("📄 输入文件: {} (前 {} 篇)", input.display(), article_limit);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(
    optimized: usize,
    cached: usize,
    failed: usize,
    total: usize,
    output: &Path,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 新优化: {}/{}", optimized, total);
    info!("♻️ 缓存复用: {}", cached);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", output.display());
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
