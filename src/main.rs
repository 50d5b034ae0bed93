use anyhow::{Context, Result};
use interview_question_export::orchestrator::validate_company;
use interview_question_export::{logger, App, Config};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init(Config::verbose_from_env());

    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    // 读取公司名称（命令行参数或交互输入）
    let company = validate_company(&read_company().await?)?;

    // 初始化并运行应用
    let summary = App::initialize(config).await?.run(&company).await?;

    match summary.output {
        Some(path) => info!("✅ 共 {} 道题目，已保存到 {}", summary.rows, path.display()),
        None => info!("📭 未找到任何面试题"),
    }

    Ok(())
}

async fn read_company() -> Result<String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return Ok(args.join(" "));
    }

    let mut stdout = tokio::io::stdout();
    stdout.write_all("公司名称: ".as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("读取公司名称失败")?;
    Ok(line)
}
