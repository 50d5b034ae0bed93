//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 按配置选择导航方式，持有 Browser / HTTP 客户端
//! - 校验公司名称，抓取后交给导出服务
//! - 更新状态行，输出最终统计
//!
//! ### `scrape_session` - 抓取会话
//! - 记录并恢复原始地址
//! - 驱动翻页循环，累积各页结果
//! - 跨页去重并编号
//!
//! ### `pagination` - 翻页策略
//! - 连续空页计数与最大页数，纯状态机
//!
//! ## 层次关系
//!
//! ```text
//! app (一次运行)
//!     ↓
//! scrape_session (Vec<PageResult>)
//!     ↓
//! workflow::PageFlow (单页)
//!     ↓
//! services (能力层：navigator / extractor / exporter / reporter)
//!     ↓
//! infrastructure (基础设施：JsExecutor)
//! ```

pub mod app;
pub mod pagination;
pub mod scrape_session;

pub use app::{scrape_and_export, validate_company, App, RunSummary};
pub use pagination::{PaginationState, Step, StopReason};
pub use scrape_session::{ScrapeOutcome, ScrapeSession};
