//! 单页处理流程 - 流程层
//!
//! 流程顺序：
//! 1. 导航到分页地址（导航超时则该页按空页处理）
//! 2. 等待加载完成（超时同样按空页处理）
//! 3. 等待客户端渲染
//! 4. 提取题目，为空时按递增间隔重试

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::PageResult;
use crate::services::{extractor, LoadOutcome, Navigator, StatusReporter};
use crate::utils::truncate_text;
use crate::workflow::page_ctx::PageCtx;

/// 单页处理结果
#[derive(Debug, Clone, Default)]
pub struct PageOutcome {
    pub result: PageResult,
    /// 实际提取次数（超时为 0）
    pub attempts: u32,
    pub timed_out: bool,
}

impl PageOutcome {
    fn timed_out() -> Self {
        Self {
            timed_out: true,
            ..Default::default()
        }
    }

    pub fn row_count(&self) -> usize {
        self.result.rows.len()
    }
}

/// 单页处理流程
///
/// - 不持有导航器，只在 run 时借用
/// - 不累积跨页数据
pub struct PageFlow {
    load_timeout: Duration,
    settle_delay: Duration,
    extract_attempts: u32,
    retry_delay: Duration,
}

impl PageFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            load_timeout: config.page_load_timeout(),
            settle_delay: config.settle_delay(),
            extract_attempts: config.extract_attempts.max(1),
            retry_delay: config.retry_delay(),
        }
    }

    pub async fn run<N, R>(&self, navigator: &N, reporter: &R, ctx: &PageCtx) -> AppResult<PageOutcome>
    where
        N: Navigator,
        R: StatusReporter + ?Sized,
    {
        reporter.report(&format!("正在打开第 {} 页...", ctx.page_no));
        info!("{} 🌐 {}", ctx, ctx.url);

        match navigator.goto(&ctx.url).await {
            Ok(()) => {}
            Err(e) if e.is_timeout() => {
                warn!("{} ⏱️ {}，按空页处理", ctx, e);
                return Ok(PageOutcome::timed_out());
            }
            Err(e) => return Err(e),
        }
        if navigator.wait_until_loaded(self.load_timeout).await? == LoadOutcome::TimedOut {
            warn!("{} ⏱️ 页面加载超时，按空页处理", ctx);
            return Ok(PageOutcome::timed_out());
        }

        if !self.settle_delay.is_zero() {
            sleep(self.settle_delay).await;
        }

        reporter.report(&format!("正在提取第 {} 页...", ctx.page_no));

        let mut attempt = 0;
        loop {
            attempt += 1;
            let snapshot = navigator.snapshot().await?;
            let result = extractor::extract(&snapshot);

            if !result.is_empty() || attempt >= self.extract_attempts {
                if result.is_empty() {
                    info!("{} 📭 {} 次尝试后仍无题目", ctx, attempt);
                } else {
                    info!("{} ✓ 提取到 {} 道题目 (第 {} 次尝试)", ctx, result.count, attempt);
                    debug!("{} 首题: {}", ctx, truncate_text(&result.rows[0].question, 60));
                }
                return Ok(PageOutcome {
                    result,
                    attempts: attempt,
                    timed_out: false,
                });
            }

            let delay = self.retry_delay * attempt;
            warn!(
                "{} 暂无题目 (尝试 {}/{}), 等待 {:?} 后重试...",
                ctx, attempt, self.extract_attempts, delay
            );
            if !delay.is_zero() {
                sleep(delay).await;
            }
        }
    }
}
