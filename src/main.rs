use anyhow::Result;
use title_optimizer::utils::logging;
use title_optimizer::{App, Config};

fn main() -> Result<()> {
    // 载入 .env（已存在的环境变量优先）
    // 修改进程环境，必须在创建运行时的工作线程之前完成
    Config::load_env_file();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run())
}

async fn run() -> Result<()> {
    // 加载配置，缺少 API 密钥时直接退出
    let config = Config::from_env()?;

    // 初始化日志
    let log_file = logging::init(&config.log_dir, config.verbose_logging)?;
    tracing::debug!("日志文件: {}", log_file.display());

    // 初始化并运行应用
    App::initialize(config).run().await?;

    Ok(())
}
