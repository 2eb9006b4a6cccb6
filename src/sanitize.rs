use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_COMMENT_CHARS: usize = 1000;

static SCRIPT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<script[^>]*>.*?</script>").expect("valid regex"));

pub fn sanitize_comment(input: &str) -> String {
    let stripped = SCRIPT_TAG.replace_all(input.trim(), "");
    stripped.chars().take(MAX_COMMENT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::{sanitize_comment, MAX_COMMENT_CHARS};

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(sanitize_comment("  hello  "), "hello");
    }

    #[test]
    fn strips_script_tags_case_insensitively() {
        let input = "before <SCRIPT src=\"x\">alert(1)</script> after";
        assert_eq!(sanitize_comment(input), "before  after");
    }

    #[test]
    fn keeps_other_markup() {
        assert_eq!(sanitize_comment("<b>bold</b>"), "<b>bold</b>");
    }

    #[test]
    fn truncates_to_limit_on_char_boundaries() {
        let input = "é".repeat(MAX_COMMENT_CHARS + 50);
        let out = sanitize_comment(&input);
        assert_eq!(out.chars().count(), MAX_COMMENT_CHARS);
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        assert_eq!(sanitize_comment("   \n  "), "");
    }
}
