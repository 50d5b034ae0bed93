/// 文本规范化：合并连续空白并去除首尾空白
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Design\n\t a   cache  "), "Design a cache");
        assert_eq!(clean_text("\u{a0}Backend\u{a0}"), "Backend");
        assert_eq!(clean_text("   "), "");
    }
}
