use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// 导出表头，顺序固定
pub const EXPORT_HEADERS: [&str; 5] = ["Sl No", "Position", "Category", "Question", "Date"];

/// 去重键分隔符（ASCII 单元分隔符，不会出现在页面文本中）
const KEY_DELIMITER: char = '\u{1f}';

/// 单道面试题
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRow {
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Question")]
    pub question: String,
    #[serde(rename = "Date")]
    pub date: String,
}

impl QuestionRow {
    pub fn new(
        position: impl Into<String>,
        category: impl Into<String>,
        question: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            position: position.into(),
            category: category.into(),
            question: question.into(),
            date: date.into(),
        }
    }
}

/// 去重后带序号的行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedRow {
    #[serde(rename = "Sl No")]
    pub sl_no: usize,
    #[serde(flatten)]
    pub row: QuestionRow,
}

/// 去重键：题目、岗位、分类拼接后转小写
pub fn dedup_key(row: &QuestionRow) -> String {
    format!(
        "{}{}{}{}{}",
        row.question, KEY_DELIMITER, row.position, KEY_DELIMITER, row.category
    )
    .to_lowercase()
}

/// 按去重键去重，保留首次出现的顺序
pub fn dedup_rows(rows: Vec<QuestionRow>) -> Vec<QuestionRow> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|row| seen.insert(dedup_key(row)))
        .collect()
}

/// 按当前顺序分配从 1 开始的序号
pub fn number_rows(rows: Vec<QuestionRow>) -> Vec<NumberedRow> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| NumberedRow {
            sl_no: index + 1,
            row,
        })
        .collect()
}
