use serde::{Deserialize, Serialize};

use super::row::QuestionRow;

/// 页面文档快照
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// 完整 HTML
    pub html: String,
    /// 最终地址
    #[serde(default)]
    pub url: String,
    /// 页面标题
    #[serde(default)]
    pub title: String,
}

impl PageSnapshot {
    pub fn new(html: impl Into<String>, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            url: url.into(),
            title: title.into(),
        }
    }
}

/// 单页提取结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageResult {
    pub rows: Vec<QuestionRow>,
    pub count: usize,
    /// 以下字段仅用于诊断
    pub url: String,
    pub title: String,
}

impl PageResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
