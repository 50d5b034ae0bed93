//! 导出服务 - 业务能力层
//!
//! 只负责"把行写成 xlsx"能力，不关心抓取流程

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{NumberedRow, EXPORT_HEADERS};

/// 工作表名称
pub const SHEET_NAME: &str = "Questions";

/// 文件名后缀
pub const FILENAME_SUFFIX: &str = "_Interview_Questions.xlsx";

/// 公司名为空时使用的占位名
const FALLBACK_COMPANY: &str = "Company";

/// 由公司名生成导出文件名：空白替换为下划线，空名使用占位名
pub fn export_filename(company: &str) -> String {
    let joined = company.split_whitespace().collect::<Vec<_>>().join("_");
    let stem = if joined.is_empty() {
        FALLBACK_COMPANY
    } else {
        joined.as_str()
    };
    format!("{}{}", stem, FILENAME_SUFFIX)
}

/// 将行写入 xlsx 文件
///
/// 列顺序固定为 `Sl No, Position, Category, Question, Date`。
///
/// # 返回
/// 返回写入的文件路径
pub fn export_rows(rows: &[NumberedRow], path: &Path) -> AppResult<PathBuf> {
    debug!("写入 {} 行到 {}", rows.len(), path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::export_io(parent.display().to_string(), e))?;
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, numbered) in rows.iter().enumerate() {
        let r = (index + 1) as u32;
        let row = &numbered.row;
        worksheet.write_number(r, 0, numbered.sl_no as f64)?;
        worksheet.write_string(r, 1, &row.position)?;
        worksheet.write_string(r, 2, &row.category)?;
        worksheet.write_string(r, 3, &row.question)?;
        worksheet.write_string(r, 4, &row.date)?;
    }

    worksheet.set_column_width(0, 8)?;
    worksheet.set_column_width(1, 24)?;
    worksheet.set_column_width(2, 24)?;
    worksheet.set_column_width(3, 80)?;
    worksheet.set_column_width(4, 16)?;

    workbook.save(path)?;
    info!("💾 已导出 {} 道题目: {}", rows.len(), path.display());

    Ok(path.to_path_buf())
}
