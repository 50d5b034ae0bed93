use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// HTTP 抓取错误
    #[error("抓取错误: {0}")]
    Fetch(#[from] FetchError),
    /// 导出文件错误
    #[error("导出错误: {0}")]
    Export(#[from] ExportError),
    /// 用户输入错误
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 启动浏览器失败
    #[error("启动无头浏览器失败: {message}")]
    LaunchFailed { message: String },
    /// 没有可用的标签页
    #[error("没有可用的活动标签页")]
    NoActiveTab,
    /// 导航失败
    #[error("导航到 {url} 失败: {message}")]
    NavigationFailed { url: String, message: String },
    /// 导航在请求超时内未完成
    #[error("导航到 {url} 超时")]
    NavigationTimeout { url: String },
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptExecutionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// HTTP 抓取错误
#[derive(Debug, Error)]
pub enum FetchError {
    /// 请求失败
    #[error("请求失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务端返回错误状态码
    #[error("HTTP 错误状态 {status} ({url})")]
    HttpStatus { url: String, status: u16 },
}

/// 导出文件错误
#[derive(Debug, Error)]
pub enum ExportError {
    /// 写入工作簿失败
    #[error("写入工作簿失败: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    /// 文件系统错误
    #[error("文件操作失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 用户输入错误
#[derive(Debug, Error)]
pub enum InputError {
    #[error("公司名称不能为空")]
    EmptyCompany,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置值不合法
    #[error("配置项 {key} 不合法: {reason}")]
    InvalidValue { key: String, reason: String },
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::ScriptExecutionFailed {
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Browser(BrowserError::ScriptExecutionFailed {
            source: Box::new(err),
        })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();
        AppError::Fetch(FetchError::RequestFailed { url, source: err })
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        AppError::Export(ExportError::Xlsx(err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建浏览器连接错误
    pub fn browser_connection_failed(
        port: u16,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::ConnectionFailed {
            port,
            source: Box::new(source),
        })
    }

    /// 创建导航错误
    pub fn navigation_failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Browser(BrowserError::NavigationFailed {
            url: url.into(),
            message: message.into(),
        })
    }

    /// 创建导航超时错误
    pub fn navigation_timeout(url: impl Into<String>) -> Self {
        AppError::Browser(BrowserError::NavigationTimeout { url: url.into() })
    }

    /// 创建请求失败错误
    pub fn request_failed(url: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Fetch(FetchError::RequestFailed {
            url: url.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn export_io(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Export(ExportError::Io {
            path: path.into(),
            source,
        })
    }

    /// 创建配置值错误
    pub fn invalid_config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Config(ConfigError::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        })
    }
}

impl AppError {
    /// 是否为页面加载超时，超时的分页按空页处理而不中断抓取
    pub fn is_timeout(&self) -> bool {
        match self {
            AppError::Browser(BrowserError::NavigationTimeout { .. }) => true,
            AppError::Fetch(FetchError::RequestFailed { source, .. }) => source.is_timeout(),
            _ => false,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
