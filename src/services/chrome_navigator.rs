//! CDP 标签页导航
//!
//! 通过 `Page.navigate` 发起导航，再轮询 `document.readyState` 判断加载完成。
//!
//! chromiumoxide 会一直挂起 `Page.navigate` 的响应直到页面加载生命周期结束，
//! 超过连接时设置的 `request_timeout` 后返回 `CdpError::Timeout`，
//! 这里将其转换为 `NavigationTimeout`，由流程层按空页处理。

use std::time::{Duration, Instant};

use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::error::CdpError;
use chromiumoxide::Browser;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::infrastructure::JsExecutor;
use crate::models::PageSnapshot;
use crate::services::navigator::{LoadOutcome, Navigator};

const SNAPSHOT_JS: &str = r#"({
    html: document.documentElement ? document.documentElement.outerHTML : "",
    url: location.href,
    title: document.title || ""
})"#;

/// 浏览器标签页导航器
///
/// 持有 Browser 以保证连接在抓取期间存活
pub struct ChromeNavigator {
    _browser: Browser,
    executor: JsExecutor,
    poll_interval: Duration,
}

impl ChromeNavigator {
    pub fn new(browser: Browser, executor: JsExecutor, poll_interval: Duration) -> Self {
        Self {
            _browser: browser,
            executor,
            poll_interval,
        }
    }
}

impl Navigator for ChromeNavigator {
    async fn original_location(&self) -> AppResult<Option<String>> {
        Ok(self.executor.page().url().await?)
    }

    async fn goto(&self, url: &str) -> AppResult<()> {
        debug!("导航到: {}", url);
        let response = self
            .executor
            .page()
            .execute(NavigateParams::new(url))
            .await
            .map_err(|e| navigation_error(url, e))?;

        if let Some(error_text) = response.result.error_text.clone() {
            return Err(AppError::navigation_failed(url, error_text));
        }
        Ok(())
    }

    async fn wait_until_loaded(&self, timeout: Duration) -> AppResult<LoadOutcome> {
        let start = Instant::now();
        loop {
            // 旧文档销毁期间执行脚本可能失败，视为尚未加载完成
            match self.executor.eval_as::<String>("document.readyState").await {
                Ok(state) if state == "complete" => return Ok(LoadOutcome::Loaded),
                Ok(state) => debug!("页面状态: {}", state),
                Err(e) => debug!("读取页面状态失败: {}", e),
            }

            if start.elapsed() >= timeout {
                warn!("⏱️ 等待页面加载超时 ({:?})", timeout);
                return Ok(LoadOutcome::TimedOut);
            }
            sleep(self.poll_interval).await;
        }
    }

    async fn snapshot(&self) -> AppResult<PageSnapshot> {
        self.executor.eval_as(SNAPSHOT_JS).await
    }

    async fn restore(&self, location: &str) -> AppResult<()> {
        self.goto(location).await
    }
}

fn navigation_error(url: &str, err: CdpError) -> AppError {
    match err {
        CdpError::Timeout => {
            warn!("⏱️ 导航超时: {}", url);
            AppError::navigation_timeout(url)
        }
        other => AppError::navigation_failed(url, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdp_timeout_becomes_navigation_timeout() {
        let err = navigation_error("https://example.com/?pageNo=2", CdpError::Timeout);
        assert!(err.is_timeout());
        assert!(err.to_string().contains("pageNo=2"));
    }

    #[test]
    fn test_other_cdp_errors_stay_fatal() {
        let err = navigation_error("https://example.com/", CdpError::NoResponse);
        assert!(!err.is_timeout());
    }
}
