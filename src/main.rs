use anyhow::Result;
use folder2pdf::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logger::init(config.verbose_logging);

    // 参数即任务文件夹
    let folders: Vec<String> = std::env::args().skip(1).collect();

    let mut app = App::initialize(config).await?;
    app.add_folders(&folders);

    // 初始化并运行应用
    let result = app.run().await?;

    if result.all_failed() {
        std::process::exit(1);
    }

    Ok(())
}
