//! 单页处理上下文
//!
//! 封装"我正在抓哪家公司的第几页"这一信息

use std::fmt::Display;

/// 拼接分页地址：`<base>?company=<编码后的公司名>&<page_param>=<页码>`
pub fn build_page_url(base_url: &str, company: &str, page_param: &str, page_no: u32) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}company={}&{}={}",
        base_url,
        separator,
        urlencoding::encode(company.trim()),
        page_param,
        page_no
    )
}

/// 单页处理上下文
#[derive(Debug, Clone)]
pub struct PageCtx {
    /// 公司名称
    pub company: String,
    /// 页码（从1开始）
    pub page_no: u32,
    /// 该页地址
    pub url: String,
}

impl PageCtx {
    pub fn new(base_url: &str, company: &str, page_param: &str, page_no: u32) -> Self {
        Self {
            company: company.trim().to_string(),
            page_no,
            url: build_page_url(base_url, company, page_param, page_no),
        }
    }
}

impl Display for PageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} 第 {} 页]", self.company, self.page_no)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://interviewquestionbank.com/interview-questions";

    #[test]
    fn test_build_page_url_encodes_company() {
        assert_eq!(
            build_page_url(BASE, "  Acme Corp ", "pageNo", 3),
            "https://interviewquestionbank.com/interview-questions?company=Acme%20Corp&pageNo=3"
        );
        assert_eq!(
            build_page_url(BASE, "AT&T", "page", 1),
            "https://interviewquestionbank.com/interview-questions?company=AT%26T&page=1"
        );
    }

    #[test]
    fn test_build_page_url_keeps_existing_query() {
        assert_eq!(
            build_page_url("http://localhost/q?lang=en", "Acme", "pageNo", 2),
            "http://localhost/q?lang=en&company=Acme&pageNo=2"
        );
    }

    #[test]
    fn test_page_ctx_display() {
        let ctx = PageCtx::new(BASE, " Acme ", "pageNo", 7);
        assert_eq!(ctx.to_string(), "[Acme 第 7 页]");
        assert!(ctx.url.ends_with("company=Acme&pageNo=7"));
    }
}
