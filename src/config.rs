//! 程序配置
//!
//! 加载顺序：默认值 → TOML 配置文件（可选）→ 环境变量覆盖

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{AppError, AppResult, ConfigError};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "scraper.toml";

/// 页面驱动方式
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigatorKind {
    /// 连接已打开的浏览器（调试端口），驱动当前标签页
    Browser,
    /// 启动无头浏览器
    Headless,
    /// 直接 HTTP 请求页面
    Http,
}

impl NavigatorKind {
    /// 该方式下默认的分页参数名
    pub fn default_page_param(self) -> &'static str {
        match self {
            NavigatorKind::Browser | NavigatorKind::Headless => "pageNo",
            NavigatorKind::Http => "page",
        }
    }
}

impl FromStr for NavigatorKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "browser" => Ok(NavigatorKind::Browser),
            "headless" => Ok(NavigatorKind::Headless),
            "http" => Ok(NavigatorKind::Http),
            other => Err(AppError::invalid_config(
                "navigator",
                format!("未知的驱动方式 '{}'，可选 browser / headless / http", other),
            )),
        }
    }
}

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题库列表页基础地址
    pub base_url: String,
    /// 页面驱动方式
    pub navigator: NavigatorKind,
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 目标标签页标题（为空时取第一个标签页）
    pub target_title: Option<String>,
    /// 无头模式下的浏览器可执行文件
    pub chrome_executable: Option<String>,
    /// 分页参数名（为空时按驱动方式取默认值）
    pub page_param: Option<String>,
    /// 页面加载完成后的等待时间
    pub settle_delay_ms: u64,
    /// 空页面时的提取尝试次数
    pub extract_attempts: u32,
    /// 提取重试间隔（按尝试次数递增）
    pub retry_delay_ms: u64,
    /// 连续空页面达到该数量时结束
    pub empty_page_threshold: u32,
    /// 最大页数
    pub max_pages: u32,
    /// 翻页间隔
    pub inter_page_delay_ms: u64,
    /// 页面加载超时
    pub page_load_timeout_ms: u64,
    /// 加载状态轮询间隔
    pub poll_interval_ms: u64,
    /// 导出目录
    pub output_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://interviewquestionbank.com/interview-questions".to_string(),
            navigator: NavigatorKind::Browser,
            browser_debug_port: 9222,
            target_title: None,
            chrome_executable: None,
            page_param: None,
            settle_delay_ms: 1200,
            extract_attempts: 5,
            retry_delay_ms: 500,
            empty_page_threshold: 1,
            max_pages: 200,
            inter_page_delay_ms: 500,
            page_load_timeout_ms: 30_000,
            poll_interval_ms: 250,
            output_dir: ".".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：默认值 → 配置文件 → 环境变量
    pub fn load() -> AppResult<Self> {
        let explicit = std::env::var("CONFIG_FILE").ok();
        let config = Self::load_base(explicit.as_deref())?.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 读取配置文件
    ///
    /// 显式指定的文件必须存在；未指定时默认文件缺失则使用默认值
    pub fn load_base(explicit_path: Option<&str>) -> AppResult<Self> {
        match explicit_path {
            Some(path) => {
                info!("📄 读取配置文件: {}", path);
                Self::from_toml_file(path)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                info!("📄 读取配置文件: {}", DEFAULT_CONFIG_FILE);
                Self::from_toml_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// 从 TOML 文件读取，缺失字段使用默认值
    pub fn from_toml_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| {
            AppError::Config(ConfigError::TomlParseFailed {
                path: path.to_string(),
                source,
            })
        })
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 用环境变量覆盖当前配置
    pub fn with_env_overrides(self) -> Self {
        let navigator = match std::env::var("NAVIGATOR") {
            Ok(v) => v.parse().unwrap_or_else(|e| {
                warn!("⚠️ 忽略环境变量 NAVIGATOR: {}", e);
                self.navigator
            }),
            Err(_) => self.navigator,
        };

        Self {
            base_url: std::env::var("BASE_URL").unwrap_or(self.base_url),
            navigator,
            browser_debug_port: env_parse("BROWSER_DEBUG_PORT").unwrap_or(self.browser_debug_port),
            target_title: std::env::var("TARGET_TITLE").ok().or(self.target_title),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().or(self.chrome_executable),
            page_param: std::env::var("PAGE_PARAM").ok().or(self.page_param),
            settle_delay_ms: env_parse("SETTLE_DELAY_MS").unwrap_or(self.settle_delay_ms),
            extract_attempts: env_parse("EXTRACT_ATTEMPTS").unwrap_or(self.extract_attempts),
            retry_delay_ms: env_parse("RETRY_DELAY_MS").unwrap_or(self.retry_delay_ms),
            empty_page_threshold: env_parse("EMPTY_PAGE_THRESHOLD").unwrap_or(self.empty_page_threshold),
            max_pages: env_parse("MAX_PAGES").unwrap_or(self.max_pages),
            inter_page_delay_ms: env_parse("INTER_PAGE_DELAY_MS").unwrap_or(self.inter_page_delay_ms),
            page_load_timeout_ms: env_parse("PAGE_LOAD_TIMEOUT_MS").unwrap_or(self.page_load_timeout_ms),
            poll_interval_ms: env_parse("POLL_INTERVAL_MS").unwrap_or(self.poll_interval_ms),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(self.output_dir),
        }
    }

    /// 是否显示详细日志，在加载配置之前读取以便尽早初始化日志
    pub fn verbose_from_env() -> bool {
        std::env::var("VERBOSE_LOGGING")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(false)
    }

    /// 校验分页策略参数
    pub fn validate(&self) -> AppResult<()> {
        if self.max_pages == 0 {
            return Err(AppError::invalid_config("max_pages", "必须大于 0"));
        }
        if self.extract_attempts == 0 {
            return Err(AppError::invalid_config("extract_attempts", "必须大于 0"));
        }
        if self.empty_page_threshold == 0 {
            return Err(AppError::invalid_config("empty_page_threshold", "必须大于 0"));
        }
        if self.poll_interval_ms == 0 {
            return Err(AppError::invalid_config("poll_interval_ms", "必须大于 0"));
        }
        Ok(())
    }

    /// 实际使用的分页参数名
    pub fn page_param(&self) -> &str {
        self.page_param
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| self.navigator.default_page_param())
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn inter_page_delay(&self) -> Duration {
        Duration::from_millis(self.inter_page_delay_ms)
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_millis(self.page_load_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("⚠️ 环境变量 {} 的值 '{}' 无法解析，使用默认值", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let config = Config::default();
        assert_eq!(config.max_pages, 200);
        assert_eq!(config.empty_page_threshold, 1);
        assert_eq!(config.page_param(), "pageNo");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_partial_override() {
        let config = Config::from_toml_str(
            r#"
            navigator = "http"
            empty_page_threshold = 2
            extract_attempts = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.navigator, NavigatorKind::Http);
        assert_eq!(config.empty_page_threshold, 2);
        assert_eq!(config.extract_attempts, 1);
        // 未配置的字段保持默认值
        assert_eq!(config.max_pages, 200);
        assert_eq!(config.page_param(), "page");
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");

        let err = Config::load_base(missing.to_str()).unwrap_err();

        assert!(matches!(err, AppError::Config(ConfigError::ReadFailed { .. })));
    }

    #[test]
    fn test_explicit_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scraper.toml");
        std::fs::write(&path, "max_pages = 3\n").unwrap();

        let config = Config::load_base(path.to_str()).unwrap();

        assert_eq!(config.max_pages, 3);
    }

    #[test]
    fn test_explicit_page_param_wins() {
        let config = Config {
            navigator: NavigatorKind::Http,
            page_param: Some("pageNo".to_string()),
            ..Config::default()
        };
        assert_eq!(config.page_param(), "pageNo");
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = Config {
            max_pages: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            empty_page_threshold: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_navigator_kind_from_str() {
        assert_eq!("HTTP".parse::<NavigatorKind>().unwrap(), NavigatorKind::Http);
        assert_eq!(" headless ".parse::<NavigatorKind>().unwrap(), NavigatorKind::Headless);
        assert!("firefox".parse::<NavigatorKind>().is_err());
    }
}
