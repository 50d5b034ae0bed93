//! # Interview Question Export
//!
//! 按公司名称逐页打开面试题库列表，提取题目并导出为 xlsx
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 连接已打开的浏览器或启动无头浏览器
//! - `infrastructure/` - `JsExecutor`，唯一的 page owner，提供 eval() 能力
//!
//! ### ② 业务能力层（Services）
//! - `Navigator` - 导航并等待加载（CDP 轮询 / HTTP 抓取）
//! - `extractor` - 从页面快照中提取题目（纯函数）
//! - `exporter` - 写 xlsx
//! - `StatusReporter` - 状态行
//!
//! ### ③ 流程层（Workflow）
//! - `PageCtx` - 公司名 + 页码 + 地址
//! - `PageFlow` - 单页流程（goto → wait → settle → extract/retry）
//!
//! ### ④ 编排层（Orchestration）
//! - `ScrapeSession` - 翻页、恢复原始地址、去重编号
//! - `App` - 初始化导航器、抓取、导出

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, NavigatorKind};
pub use error::{AppError, AppResult};
pub use models::{NumberedRow, PageResult, PageSnapshot, QuestionRow};
pub use orchestrator::{scrape_and_export, App, RunSummary, ScrapeSession};
pub use services::{extractor::extract, LoadOutcome, Navigator, StatusReporter};
pub use workflow::{PageCtx, PageFlow};
