/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

use crate::config::Config;

/// 记录程序启动信息
///
/// # 参数
/// - `company`: 公司名称
/// - `config`: 配置
pub fn log_startup(company: &str, config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 面试题导出");
    info!("🏢 公司: {}", company);
    info!("🧭 驱动方式: {:?}", config.navigator);
    info!(
        "📊 空页阈值: {} | 提取尝试: {} | 最大页数: {}",
        config.empty_page_threshold, config.extract_attempts, config.max_pages
    );
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `pages_visited`: 访问页数
/// - `total_rows`: 去重后的题目数
/// - `output`: 导出文件路径（无结果时为空）
pub fn print_final_stats(pages_visited: u32, total_rows: usize, output: Option<&str>) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 访问页数: {}", pages_visited);
    info!("✅ 题目总数: {}", total_rows);
    info!("{}", "=".repeat(60));
    if let Some(path) = output {
        info!("\n文件已保存至: {}", path);
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("设计一个缓存系统", 4), "设计一个...");
    }
}
