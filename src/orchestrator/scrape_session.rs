//! 抓取会话 - 编排层
//!
//! ## 职责
//!
//! 1. **记录原始地址**：抓取前记下标签页当前地址
//! 2. **翻页循环**：逐页调用 `PageFlow`，由 `PaginationState` 决定何时结束
//! 3. **恢复地址**：无论循环如何结束都恢复原始地址
//! 4. **跨页去重**：按首次出现顺序去重并分配序号

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{dedup_rows, number_rows, NumberedRow, QuestionRow};
use crate::orchestrator::pagination::{PaginationState, Step, StopReason};
use crate::services::{Navigator, StatusReporter};
use crate::workflow::{PageCtx, PageFlow};

/// 抓取结果
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    /// 去重并编号后的行
    pub rows: Vec<NumberedRow>,
    /// 去重前的行数
    pub raw_rows: usize,
    pub pages_visited: u32,
    /// 加载超时、按空页计入的页数
    pub timed_out_pages: u32,
    pub stop_reason: StopReason,
}

struct Collected {
    rows: Vec<QuestionRow>,
    pages_visited: u32,
    timed_out_pages: u32,
    stop_reason: StopReason,
}

/// 抓取会话
///
/// 独占本次抓取累积的行，导航器和上报器只借用
pub struct ScrapeSession<'a, N, R: ?Sized> {
    navigator: &'a N,
    reporter: &'a R,
    config: &'a Config,
    flow: PageFlow,
}

impl<'a, N, R> ScrapeSession<'a, N, R>
where
    N: Navigator,
    R: StatusReporter + ?Sized,
{
    pub fn new(navigator: &'a N, reporter: &'a R, config: &'a Config) -> Self {
        Self {
            navigator,
            reporter,
            config,
            flow: PageFlow::new(config),
        }
    }

    /// 抓取指定公司的全部分页
    pub async fn run(&self, company: &str) -> AppResult<ScrapeOutcome> {
        let original = self.navigator.original_location().await?;

        let collected = self.paginate(company).await;

        if let Some(location) = original.as_deref() {
            self.restore(location).await;
        }

        let collected = collected?;
        let raw_rows = collected.rows.len();
        let rows = number_rows(dedup_rows(collected.rows));
        info!(
            "🧮 去重完成: {} → {} 道题目 ({})",
            raw_rows,
            rows.len(),
            collected.stop_reason
        );

        Ok(ScrapeOutcome {
            rows,
            raw_rows,
            pages_visited: collected.pages_visited,
            timed_out_pages: collected.timed_out_pages,
            stop_reason: collected.stop_reason,
        })
    }

    async fn paginate(&self, company: &str) -> AppResult<Collected> {
        let mut state = PaginationState::from_config(self.config);
        let mut rows = Vec::new();
        let mut pages_visited = 0;
        let mut timed_out_pages = 0;

        loop {
            let ctx = PageCtx::new(
                &self.config.base_url,
                company,
                self.config.page_param(),
                state.page_no(),
            );

            let outcome = self.flow.run(self.navigator, self.reporter, &ctx).await?;
            pages_visited += 1;
            if outcome.timed_out {
                timed_out_pages += 1;
            } else if outcome.attempts > 1 {
                debug!("{} 共尝试提取 {} 次", ctx, outcome.attempts);
            }

            let count = outcome.row_count();
            rows.extend(outcome.result.rows);

            match state.record_page(count) {
                Step::Next(_) => {
                    if !self.config.inter_page_delay().is_zero() {
                        sleep(self.config.inter_page_delay()).await;
                    }
                }
                Step::Done(stop_reason) => {
                    info!("{} 🏁 结束翻页: {}", ctx, stop_reason);
                    if timed_out_pages > 0 {
                        warn!("⏱️ 共有 {} 页加载超时，已按空页计入", timed_out_pages);
                    }
                    return Ok(Collected {
                        rows,
                        pages_visited,
                        timed_out_pages,
                        stop_reason,
                    });
                }
            }
        }
    }

    /// 恢复原始地址，失败只记录不中断
    async fn restore(&self, location: &str) {
        info!("↩️ 恢复原始页面: {}", location);
        if let Err(e) = self.navigator.restore(location).await {
            error!("恢复原始页面失败: {}", e);
            warn!("⚠️ 标签页停留在最后访问的分页");
            self.reporter.report(&format!("警告: 无法恢复原始页面 ({})", e));
        }
    }
}
