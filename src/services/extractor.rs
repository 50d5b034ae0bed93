//! 题目提取 - 纯函数
//!
//! 输入页面快照，输出该页的题目行。不访问网络，不持有状态，
//! 可以直接用静态 HTML 测试。

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::{dedup_rows, PageResult, PageSnapshot, QuestionRow};
use crate::utils::clean_text;

/// 题目链接文本的最小长度（不含），用于排除导航和装饰性链接
pub const MIN_QUESTION_TEXT_LEN: usize = 8;

/// 不属于题目详情页的保留路径段
const RESERVED_SEGMENTS: [&str; 3] = ["position", "category", "company"];

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("静态选择器必须合法")
}

static CANDIDATE_LINKS: LazyLock<Selector> =
    LazyLock::new(|| selector("a[href*='/interview-questions/']"));
static ROUNDED_CARD: LazyLock<Selector> = LazyLock::new(|| selector("div[class*='rounded-lg']"));
static POSITION_LINK: LazyLock<Selector> =
    LazyLock::new(|| selector("a[href*='/interview-questions/position/']"));
static CATEGORY_LINK: LazyLock<Selector> =
    LazyLock::new(|| selector("a[href*='/interview-questions/category/']"));
static DATE_STYLED: LazyLock<Selector> = LazyLock::new(|| selector("p.text-xs"));
static DATE_CANDIDATES: LazyLock<Selector> = LazyLock::new(|| selector("p, span, div"));

static QUESTION_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/interview-questions/([^/]+)$").expect("静态正则必须合法")
});
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-z]{3,9})\.?\s+(\d{1,2}),\s+(\d{4})\b").expect("静态正则必须合法")
});

static MONTHS: phf::Set<&'static str> = phf::phf_set! {
    "jan", "january",
    "feb", "february",
    "mar", "march",
    "apr", "april",
    "may",
    "jun", "june",
    "jul", "july",
    "aug", "august",
    "sep", "sept", "september",
    "oct", "october",
    "nov", "november",
    "dec", "december",
};

/// 从页面快照中提取题目
pub fn extract(snapshot: &PageSnapshot) -> PageResult {
    let document = Html::parse_document(&snapshot.html);

    let mut rows = Vec::new();
    for link in document.select(&CANDIDATE_LINKS) {
        let href = link.value().attr("href").unwrap_or_default();
        if !is_question_href(href) {
            continue;
        }

        let question = element_text(link);
        if question.chars().count() <= MIN_QUESTION_TEXT_LEN {
            continue;
        }

        let Some(card) = find_card(link) else {
            continue;
        };

        rows.push(QuestionRow {
            position: first_text(card, &POSITION_LINK),
            category: first_text(card, &CATEGORY_LINK),
            question,
            date: extract_date(card),
        });
    }

    let found = rows.len();
    let rows = dedup_rows(rows);
    debug!(
        "页面 '{}' 提取到 {} 个题目（去重前 {}）",
        snapshot.title,
        rows.len(),
        found
    );

    PageResult {
        count: rows.len(),
        rows,
        url: snapshot.url.clone(),
        title: snapshot.title.clone(),
    }
}

/// 判断链接是否指向题目详情页：`/interview-questions/<slug>`，且 slug 不是保留段
pub fn is_question_href(href: &str) -> bool {
    let Some(path) = href_path(href) else {
        return false;
    };
    QUESTION_PATH
        .captures(&path)
        .map(|caps| !RESERVED_SEGMENTS.contains(&caps[1].to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// 取出链接的路径部分，绝对地址只保留 path
fn href_path(href: &str) -> Option<String> {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        return reqwest::Url::parse(href).ok().map(|url| url.path().to_string());
    }
    if let Some(rest) = href.strip_prefix("//") {
        return reqwest::Url::parse(&format!("https://{}", rest))
            .ok()
            .map(|url| url.path().to_string());
    }
    href.split(['?', '#']).next().map(str::to_string)
}

/// 题目卡片：最近的圆角容器，其次 article、li，最后退回父元素
fn find_card(link: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let ancestors: Vec<ElementRef<'_>> = link.ancestors().filter_map(ElementRef::wrap).collect();

    ancestors
        .iter()
        .find(|el| ROUNDED_CARD.matches(el))
        .or_else(|| ancestors.iter().find(|el| el.value().name() == "article"))
        .or_else(|| ancestors.iter().find(|el| el.value().name() == "li"))
        .or_else(|| ancestors.first())
        .copied()
}

fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<String>())
}

fn first_text(card: ElementRef<'_>, selector: &Selector) -> String {
    card.select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// 日期：优先取日期样式元素，否则取第一个包含"月 日, 年"格式的文本
fn extract_date(card: ElementRef<'_>) -> String {
    let styled = first_text(card, &DATE_STYLED);
    if !styled.is_empty() {
        return styled;
    }

    card.select(&DATE_CANDIDATES)
        .find_map(|el| find_date(&element_text(el)))
        .unwrap_or_default()
}

/// 在文本中查找形如 `Jan 5, 2024` 的日期
pub fn find_date(text: &str) -> Option<String> {
    DATE_PATTERN
        .captures_iter(text)
        .find(|caps| MONTHS.contains(caps[1].to_ascii_lowercase().as_str()))
        .map(|caps| caps[0].to_string())
}
