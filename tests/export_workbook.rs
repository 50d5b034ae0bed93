mod common;

use calamine::{open_workbook, Data, Reader, Xlsx};
use common::{card, empty_page, fast_config, page_html, FakeNavigator, FakePage};
use interview_question_export::services::RecordingReporter;
use interview_question_export::{scrape_and_export, Config};

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Empty => String::new(),
        other => format!("{:?}", other),
    }
}

fn navigator_with_two_pages() -> FakeNavigator {
    FakeNavigator::new(|page_no, _| match page_no {
        1 => FakePage::Html(page_html(&[
            card("Design a URL shortener", "Backend", "System Design", "Jan 5, 2024"),
            card("Tell me about yourself", "Backend", "Behavioral", ""),
        ])),
        2 => FakePage::Html(page_html(&[
            card("Design a URL shortener", "Backend", "System Design", "Feb 1, 2024"),
            card("Implement an LRU cache", "Backend", "Coding", "Feb 2, 2024"),
        ])),
        _ => FakePage::Html(empty_page()),
    })
}

#[tokio::test]
async fn test_export_writes_questions_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        output_dir: dir.path().display().to_string(),
        extract_attempts: 1,
        ..fast_config()
    };
    let navigator = navigator_with_two_pages();
    let reporter = RecordingReporter::new();

    let summary = scrape_and_export(&navigator, &reporter, &config, "  Acme  Corp ")
        .await
        .unwrap();

    assert_eq!(summary.rows, 3);
    assert_eq!(summary.pages_visited, 3);
    let output = summary.output.unwrap();
    assert_eq!(
        output.file_name().unwrap().to_str().unwrap(),
        "Acme_Corp_Interview_Questions.xlsx"
    );
    assert_eq!(
        reporter.last().as_deref(),
        Some("完成！已导出 3 行到 Acme_Corp_Interview_Questions.xlsx")
    );
    // 分页地址中的公司名已去除首尾空白并编码
    assert!(navigator.visited()[0].contains("company=Acme%20%20Corp&pageNo=1"));

    let mut workbook: Xlsx<_> = open_workbook(&output).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Questions".to_string()]);

    let range = workbook.worksheet_range("Questions").unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    assert_eq!(
        rows,
        vec![
            vec!["Sl No", "Position", "Category", "Question", "Date"],
            vec!["1", "Backend", "System Design", "Design a URL shortener", "Jan 5, 2024"],
            vec!["2", "Backend", "Behavioral", "Tell me about yourself", ""],
            vec!["3", "Backend", "Coding", "Implement an LRU cache", "Feb 2, 2024"],
        ]
    );
}

#[tokio::test]
async fn test_no_questions_writes_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        output_dir: dir.path().display().to_string(),
        ..fast_config()
    };
    let navigator = FakeNavigator::new(|_, _| FakePage::Html(empty_page()));
    let reporter = RecordingReporter::new();

    let summary = scrape_and_export(&navigator, &reporter, &config, "Nobody Inc")
        .await
        .unwrap();

    assert_eq!(summary.rows, 0);
    assert!(summary.output.is_none());
    assert_eq!(reporter.last().as_deref(), Some("未找到任何面试题。"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_empty_company_rejected_before_navigation() {
    let config = fast_config();
    let navigator = navigator_with_two_pages();
    let reporter = RecordingReporter::new();

    let result = scrape_and_export(&navigator, &reporter, &config, "   ").await;

    assert!(result.is_err());
    assert!(navigator.visited().is_empty());
    assert_eq!(reporter.messages(), vec!["请输入公司名称。"]);
}

#[tokio::test]
async fn test_scrape_error_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        output_dir: dir.path().display().to_string(),
        ..fast_config()
    };
    let navigator = FakeNavigator::new(|_, _| FakePage::Error);
    let reporter = RecordingReporter::new();

    let result = scrape_and_export(&navigator, &reporter, &config, "Acme").await;

    assert!(result.is_err());
    assert!(reporter.last().unwrap().starts_with("错误: "));
    assert_eq!(navigator.restored(), vec!["https://example.com/original"]);
}
