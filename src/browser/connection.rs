use std::time::Duration;

use chromiumoxide::handler::HandlerConfig;
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::{AppError, AppResult, BrowserError};

/// 连接到已打开的浏览器并获取要驱动的标签页
///
/// 指定 `target_title` 时取标题包含该文本的标签页，否则取第一个标签页。
/// 浏览器没有任何标签页时返回 `NoActiveTab`。
/// `request_timeout` 同时限制单次导航等待页面加载的时间。
pub async fn connect_to_browser_and_page(
    port: u16,
    target_title: Option<&str>,
    request_timeout: Duration,
) -> AppResult<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);
    debug!("目标标题: {:?}", target_title);

    let handler_config = HandlerConfig {
        request_timeout,
        ..HandlerConfig::default()
    };
    let (browser, mut handler) = Browser::connect_with_config(&browser_url, handler_config)
        .await
        .map_err(|e| {
            error!("连接浏览器失败: {}", e);
            AppError::browser_connection_failed(port, e)
        })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let pages = browser.pages().await?;
    debug!("获取到 {} 个页面", pages.len());

    if let Some(title) = target_title {
        debug!("正在查找标题包含 '{}' 的页面", title);
        for p in pages.iter() {
            if let Ok(Some(page_title)) = p.get_title().await {
                debug!("检查页面标题: {}", page_title);
                if page_title.contains(title) {
                    info!("✓ 找到目标页面: {}", page_title);
                    return Ok((browser, p.clone()));
                }
            }
        }
        debug!("未找到匹配的页面，使用第一个标签页");
    }

    match pages.into_iter().next() {
        Some(page) => {
            if let Ok(Some(url)) = page.url().await {
                info!("✓ 使用当前标签页: {}", url);
            }
            Ok((browser, page))
        }
        None => {
            error!("浏览器中没有打开的标签页");
            Err(BrowserError::NoActiveTab.into())
        }
    }
}
