//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：按配置选择导航方式并获取标签页
//! 2. **输入校验**：公司名称为空时直接拒绝
//! 3. **抓取与导出**：委托 `ScrapeSession` 抓取，结果交给导出服务
//! 4. **状态上报**：每个阶段切换时更新状态行
//!
//! 唯一持有 Browser / 导航器的模块

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::browser;
use crate::config::{Config, NavigatorKind};
use crate::error::{AppResult, InputError};
use crate::infrastructure::JsExecutor;
use crate::models::PageSnapshot;
use crate::orchestrator::scrape_session::ScrapeSession;
use crate::services::{
    export_filename, export_rows, ChromeNavigator, HttpNavigator, LoadOutcome, Navigator,
    StatusReporter, TracingReporter,
};
use crate::utils::logging::{log_startup, print_final_stats};

/// 一次运行的汇总
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub rows: usize,
    pub pages_visited: u32,
    /// 没有题目时不生成文件
    pub output: Option<PathBuf>,
}

/// 校验并规范化公司名称
pub fn validate_company(company: &str) -> AppResult<String> {
    let company = company.trim();
    if company.is_empty() {
        return Err(InputError::EmptyCompany.into());
    }
    Ok(company.to_string())
}

/// 抓取并导出
///
/// 与具体导航方式无关，`App` 和测试共用
pub async fn scrape_and_export<N, R>(
    navigator: &N,
    reporter: &R,
    config: &Config,
    company: &str,
) -> AppResult<RunSummary>
where
    N: Navigator,
    R: StatusReporter + ?Sized,
{
    let company = match validate_company(company) {
        Ok(company) => company,
        Err(e) => {
            reporter.report("请输入公司名称。");
            return Err(e);
        }
    };

    log_startup(&company, config);
    reporter.report("正在启动抓取...");

    let outcome = match ScrapeSession::new(navigator, reporter, config)
        .run(&company)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("❌ 抓取失败: {}", e);
            reporter.report(&format!("错误: {}", e));
            return Err(e);
        }
    };

    if outcome.rows.is_empty() {
        reporter.report("未找到任何面试题。");
        print_final_stats(outcome.pages_visited, 0, None);
        return Ok(RunSummary {
            rows: 0,
            pages_visited: outcome.pages_visited,
            output: None,
        });
    }

    let filename = export_filename(&company);
    let path = Path::new(&config.output_dir).join(&filename);
    let written = match export_rows(&outcome.rows, &path) {
        Ok(path) => path,
        Err(e) => {
            error!("❌ 导出失败: {}", e);
            reporter.report(&format!("错误: {}", e));
            return Err(e);
        }
    };

    reporter.report(&format!(
        "完成！已导出 {} 行到 {}",
        outcome.rows.len(),
        filename
    ));
    print_final_stats(
        outcome.pages_visited,
        outcome.rows.len(),
        Some(&written.display().to_string()),
    );

    Ok(RunSummary {
        rows: outcome.rows.len(),
        pages_visited: outcome.pages_visited,
        output: Some(written),
    })
}

/// 当前使用的导航器
enum ActiveNavigator {
    Chrome(ChromeNavigator),
    Http(HttpNavigator),
}

impl Navigator for ActiveNavigator {
    async fn original_location(&self) -> AppResult<Option<String>> {
        match self {
            ActiveNavigator::Chrome(n) => n.original_location().await,
            ActiveNavigator::Http(n) => n.original_location().await,
        }
    }

    async fn goto(&self, url: &str) -> AppResult<()> {
        match self {
            ActiveNavigator::Chrome(n) => n.goto(url).await,
            ActiveNavigator::Http(n) => n.goto(url).await,
        }
    }

    async fn wait_until_loaded(&self, timeout: Duration) -> AppResult<LoadOutcome> {
        match self {
            ActiveNavigator::Chrome(n) => n.wait_until_loaded(timeout).await,
            ActiveNavigator::Http(n) => n.wait_until_loaded(timeout).await,
        }
    }

    async fn snapshot(&self) -> AppResult<PageSnapshot> {
        match self {
            ActiveNavigator::Chrome(n) => n.snapshot().await,
            ActiveNavigator::Http(n) => n.snapshot().await,
        }
    }

    async fn restore(&self, location: &str) -> AppResult<()> {
        match self {
            ActiveNavigator::Chrome(n) => n.restore(location).await,
            ActiveNavigator::Http(n) => n.restore(location).await,
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    navigator: ActiveNavigator,
    reporter: TracingReporter,
}

impl App {
    /// 初始化应用：按配置连接浏览器、启动无头浏览器或创建 HTTP 客户端
    pub async fn initialize(config: Config) -> Result<Self> {
        let navigator = match config.navigator {
            NavigatorKind::Browser => {
                let (browser, page) = browser::connect_to_browser_and_page(
                    config.browser_debug_port,
                    config.target_title.as_deref(),
                    config.page_load_timeout(),
                )
                .await
                .context("无法获取浏览器标签页")?;
                ActiveNavigator::Chrome(ChromeNavigator::new(
                    browser,
                    JsExecutor::new(page),
                    config.poll_interval(),
                ))
            }
            NavigatorKind::Headless => {
                let (browser, page) = browser::launch_headless_browser(
                    config.chrome_executable.as_deref(),
                    config.page_load_timeout(),
                )
                .await
                .context("无法启动无头浏览器")?;
                ActiveNavigator::Chrome(ChromeNavigator::new(
                    browser,
                    JsExecutor::new(page),
                    config.poll_interval(),
                ))
            }
            NavigatorKind::Http => {
                ActiveNavigator::Http(HttpNavigator::new().context("无法创建 HTTP 客户端")?)
            }
        };
        info!("✓ 导航器就绪: {:?}", config.navigator);

        Ok(Self {
            config,
            navigator,
            reporter: TracingReporter,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self, company: &str) -> Result<RunSummary> {
        let summary = scrape_and_export(&self.navigator, &self.reporter, &self.config, company)
            .await
            .with_context(|| format!("抓取 '{}' 的面试题失败", company.trim()))?;
        Ok(summary)
    }
}
