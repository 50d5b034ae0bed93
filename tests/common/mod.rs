//! 测试公共工具：内存导航器与卡片 HTML

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use interview_question_export::error::{AppError, AppResult};
use interview_question_export::{Config, LoadOutcome, Navigator, PageSnapshot};

/// 某页某次读取时的表现
pub enum FakePage {
    Html(String),
    Timeout,
    /// 导航本身超时（浏览器等待加载生命周期超时）
    NavigationTimeout,
    Error,
}

#[derive(Default)]
struct FakeState {
    current_url: String,
    page_no: u32,
    snapshots_on_page: u32,
    visited: Vec<String>,
    restored: Vec<String>,
}

/// 内存导航器
///
/// `render(page_no, attempt)` 决定第 page_no 页第 attempt 次读取（从 1 开始）的内容
pub struct FakeNavigator {
    original: Option<String>,
    restore_fails: bool,
    render: Box<dyn Fn(u32, u32) -> FakePage>,
    state: Mutex<FakeState>,
}

impl FakeNavigator {
    pub fn new(render: impl Fn(u32, u32) -> FakePage + 'static) -> Self {
        Self {
            original: Some("https://example.com/original".to_string()),
            restore_fails: false,
            render: Box::new(render),
            state: Mutex::new(FakeState::default()),
        }
    }

    pub fn without_original(mut self) -> Self {
        self.original = None;
        self
    }

    /// 恢复原始地址时失败
    pub fn with_failing_restore(mut self) -> Self {
        self.restore_fails = true;
        self
    }

    /// 访问过的分页地址
    pub fn visited(&self) -> Vec<String> {
        self.state.lock().unwrap().visited.clone()
    }

    /// 恢复过的地址
    pub fn restored(&self) -> Vec<String> {
        self.state.lock().unwrap().restored.clone()
    }
}

fn page_no_of(url: &str) -> u32 {
    url.split(['?', '&'])
        .find_map(|pair| {
            pair.strip_prefix("pageNo=")
                .or_else(|| pair.strip_prefix("page="))
        })
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

impl Navigator for FakeNavigator {
    async fn original_location(&self) -> AppResult<Option<String>> {
        Ok(self.original.clone())
    }

    async fn goto(&self, url: &str) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        state.current_url = url.to_string();
        state.page_no = page_no_of(url);
        state.snapshots_on_page = 0;
        state.visited.push(url.to_string());
        let page_no = state.page_no;
        drop(state);
        match (self.render)(page_no, 1) {
            FakePage::NavigationTimeout => Err(AppError::navigation_timeout(url)),
            _ => Ok(()),
        }
    }

    async fn wait_until_loaded(&self, _timeout: Duration) -> AppResult<LoadOutcome> {
        let page_no = self.state.lock().unwrap().page_no;
        match (self.render)(page_no, 1) {
            FakePage::Timeout => Ok(LoadOutcome::TimedOut),
            _ => Ok(LoadOutcome::Loaded),
        }
    }

    async fn snapshot(&self) -> AppResult<PageSnapshot> {
        let (page_no, attempt, url) = {
            let mut state = self.state.lock().unwrap();
            state.snapshots_on_page += 1;
            (state.page_no, state.snapshots_on_page, state.current_url.clone())
        };
        match (self.render)(page_no, attempt) {
            FakePage::Html(html) => Ok(PageSnapshot::new(html, url, format!("Page {}", page_no))),
            FakePage::Timeout | FakePage::NavigationTimeout => Ok(PageSnapshot::default()),
            FakePage::Error => Err(AppError::navigation_failed(url, "脚本注入失败")),
        }
    }

    async fn restore(&self, location: &str) -> AppResult<()> {
        self.state.lock().unwrap().restored.push(location.to_string());
        if self.restore_fails {
            return Err(AppError::navigation_failed(location, "标签页已关闭"));
        }
        Ok(())
    }
}

/// 一张题目卡片
pub fn card(question: &str, position: &str, category: &str, date: &str) -> String {
    let slug = question
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!(
        r#"<div class="rounded-lg border p-4">
            <a href="/interview-questions/position/{pos_slug}">{position}</a>
            <a href="/interview-questions/category/{cat_slug}">{category}</a>
            <a href="/interview-questions/{slug}">{question}</a>
            <p class="text-xs">{date}</p>
        </div>"#,
        pos_slug = position.to_lowercase().replace(' ', "-"),
        cat_slug = category.to_lowercase().replace(' ', "-"),
    )
}

/// 包装成完整页面
pub fn page_html(cards: &[String]) -> String {
    format!(
        "<html><head><title>Interview Questions</title></head><body><main>{}</main></body></html>",
        cards.join("\n")
    )
}

/// 无题目的页面
pub fn empty_page() -> String {
    page_html(&[])
}

/// 测试用配置：去掉所有等待
pub fn fast_config() -> Config {
    Config {
        base_url: "https://interviewquestionbank.com/interview-questions".to_string(),
        settle_delay_ms: 0,
        retry_delay_ms: 0,
        inter_page_delay_ms: 0,
        page_load_timeout_ms: 100,
        ..Config::default()
    }
}
