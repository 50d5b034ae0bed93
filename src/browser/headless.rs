use std::path::Path;
use std::time::Duration;

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::{AppResult, BrowserError};

/// 启动无头浏览器并打开一个空白标签页
///
/// # 参数
/// - `chrome_executable`: 浏览器可执行文件，为空时由 chromiumoxide 自动查找
/// - `request_timeout`: CDP 请求超时，同时限制单次导航等待加载的时间
pub async fn launch_headless_browser(
    chrome_executable: Option<&str>,
    request_timeout: Duration,
) -> AppResult<(Browser, Page)> {
    info!("🚀 启动无头浏览器...");

    let mut builder = BrowserConfig::builder()
        .new_headless_mode()
        .request_timeout(request_timeout)
        .args(vec![
            "--disable-gpu",
            "--no-sandbox",            // 禁用沙盒，防止权限问题导致的崩溃
            "--disable-dev-shm-usage", // 防止共享内存不足
        ]);
    if let Some(executable) = chrome_executable {
        debug!("浏览器路径: {}", executable);
        builder = builder.chrome_executable(Path::new(executable));
    }

    let config = builder.build().map_err(|e| {
        error!("配置无头浏览器失败: {}", e);
        BrowserError::LaunchFailed { message: e }
    })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        BrowserError::LaunchFailed {
            message: e.to_string(),
        }
    })?;
    debug!("无头浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建页面失败: {}", e);
        BrowserError::LaunchFailed {
            message: format!("创建页面失败: {}", e),
        }
    })?;

    info!("✅ 无头浏览器已就绪");
    Ok((browser, page))
}
