//! HTTP 直接抓取
//!
//! 不驱动浏览器，直接请求分页地址。`goto` 只记录地址，
//! 真正的请求在 `wait_until_loaded` 中完成，请求超时即视为加载超时。

use std::sync::Mutex;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult, FetchError};
use crate::models::PageSnapshot;
use crate::services::navigator::{LoadOutcome, Navigator};

const USER_AGENT: &str = concat!("interview_question_export/", env!("CARGO_PKG_VERSION"));

#[derive(Default)]
struct FetchState {
    pending_url: Option<String>,
    snapshot: Option<PageSnapshot>,
}

/// HTTP 导航器
pub struct HttpNavigator {
    client: Client,
    state: Mutex<FetchState>,
}

impl HttpNavigator {
    pub fn new() -> AppResult<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            state: Mutex::new(FetchState::default()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FetchState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Navigator for HttpNavigator {
    async fn original_location(&self) -> AppResult<Option<String>> {
        Ok(None)
    }

    async fn goto(&self, url: &str) -> AppResult<()> {
        let mut state = self.lock();
        state.pending_url = Some(url.to_string());
        state.snapshot = None;
        Ok(())
    }

    async fn wait_until_loaded(&self, timeout: Duration) -> AppResult<LoadOutcome> {
        let Some(url) = self.lock().pending_url.take() else {
            return Ok(LoadOutcome::Loaded);
        };
        debug!("请求: {}", url);

        let response = match self.client.get(&url).timeout(timeout).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!("⏱️ 请求超时: {}", url);
                return Ok(LoadOutcome::TimedOut);
            }
            Err(e) => return Err(AppError::request_failed(url, e)),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url,
                status: status.as_u16(),
            }
            .into());
        }

        let final_url = response.url().to_string();
        let html = match response.text().await {
            Ok(html) => html,
            Err(e) if e.is_timeout() => {
                warn!("⏱️ 读取响应超时: {}", url);
                return Ok(LoadOutcome::TimedOut);
            }
            Err(e) => return Err(AppError::request_failed(url, e)),
        };

        let title = page_title(&html);
        self.lock().snapshot = Some(PageSnapshot::new(html, final_url, title));
        Ok(LoadOutcome::Loaded)
    }

    async fn snapshot(&self) -> AppResult<PageSnapshot> {
        Ok(self.lock().snapshot.clone().unwrap_or_default())
    }

    async fn restore(&self, _location: &str) -> AppResult<()> {
        Ok(())
    }
}

fn page_title(html: &str) -> String {
    let document = scraper::Html::parse_document(html);
    scraper::Selector::parse("title")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|el| crate::utils::clean_text(&el.text().collect::<String>()))
        })
        .unwrap_or_default()
}
