//! 页面导航能力
//!
//! 只负责"把标签页带到某个地址并等它加载完"，不认识题目

use std::time::Duration;

use crate::error::AppResult;
use crate::models::PageSnapshot;

/// 等待页面加载的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    TimedOut,
}

/// 导航器
///
/// 两种实现：CDP 标签页（轮询 readyState）和 HTTP 直接抓取。
#[allow(async_fn_in_trait)]
pub trait Navigator {
    /// 开始抓取前的地址，抓取结束后需要恢复；没有需要恢复的地址时为 None
    async fn original_location(&self) -> AppResult<Option<String>>;

    /// 开始导航到指定地址
    async fn goto(&self, url: &str) -> AppResult<()>;

    /// 等待当前导航完成，超时不视为错误
    async fn wait_until_loaded(&self, timeout: Duration) -> AppResult<LoadOutcome>;

    /// 读取当前文档
    async fn snapshot(&self) -> AppResult<PageSnapshot>;

    /// 恢复到原始地址
    async fn restore(&self, location: &str) -> AppResult<()>;
}
