//! Static detection sets for injection-style payloads.
//!
//! Two categories are maintained: SQL-injection shapes and script-injection
//! shapes. Matching is a pure predicate over the raw input; the `regex`
//! engine guarantees linear-time scans, so hostile input cannot trigger
//! catastrophic backtracking. Order within a set does not affect the
//! outcome — a value is unsafe as soon as any matcher in either category
//! matches.

use std::sync::OnceLock;

use regex::Regex;

/// Detection category a matcher belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternCategory {
    /// SQL keyword, termination-token, and boolean-injection shapes.
    SqlInjection,
    /// Script blocks, scriptable schemes, and event-handler attributes.
    ScriptInjection,
}

static SQL_INJECTION: OnceLock<Vec<Regex>> = OnceLock::new();
static SCRIPT_INJECTION: OnceLock<Vec<Regex>> = OnceLock::new();

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern)
                .unwrap_or_else(|error| panic!("detection pattern failed to compile: {error}"))
        })
        .collect()
}

fn sql_injection_patterns() -> &'static [Regex] {
    SQL_INJECTION.get_or_init(|| {
        compile(&[
            // Whole-word SQL keywords, regardless of surrounding context.
            r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|DROP|CREATE|ALTER|EXEC|EXECUTE|UNION|DECLARE|CAST|CONVERT)\b",
            // Comment and statement-termination tokens.
            r#"(--|/\*|\*/|;|'|"|`)"#,
            // Boolean-injection shape: OR/AND followed by two comparisons.
            r"(?i)\b(OR|AND)\b.*?=.*?=",
            // Privileged procedure and catalogue prefixes.
            r"(?i)(xp_|sp_|sys\.)",
        ])
    })
}

fn script_injection_patterns() -> &'static [Regex] {
    SCRIPT_INJECTION.get_or_init(|| {
        compile(&[
            // Complete script blocks, lazily matched across newlines.
            r"(?is)<script\b.*?</script>",
            r"(?i)javascript:",
            // Inline event-handler attributes such as onclick= or onload=.
            r"(?i)on\w+\s*=",
            r"(?i)<iframe",
            r"(?i)<embed",
            r"(?i)<object",
        ])
    })
}

/// Report whether `text` matches any matcher in the given category.
pub fn is_unsafe(category: PatternCategory, text: &str) -> bool {
    let patterns = match category {
        PatternCategory::SqlInjection => sql_injection_patterns(),
        PatternCategory::ScriptInjection => script_injection_patterns(),
    };
    patterns.iter().any(|pattern| pattern.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::bare_keyword("SELECT * FROM users")]
    #[case::keyword_in_sentence("I need to select a product")]
    #[case::lowercase_keyword("drop the table")]
    #[case::line_comment("admin--")]
    #[case::block_comment("/* hidden */")]
    #[case::statement_separator("a;b")]
    #[case::single_quote("O'Brien")]
    #[case::double_quote(r#"say "hi""#)]
    #[case::backtick("`cmd`")]
    #[case::boolean_shape("x OR 1=1 AND 2=2")]
    #[case::extended_procedure("xp_cmdshell")]
    #[case::stored_procedure("sp_help")]
    #[case::system_catalogue("sys.objects")]
    fn sql_injection_shapes_match(#[case] text: &str) {
        assert!(is_unsafe(PatternCategory::SqlInjection, text));
    }

    #[rstest]
    #[case::plain_sentence("buy milk and eggs")]
    #[case::keyword_substring("a fine selection of cheeses")]
    #[case::single_equals("x OR y = z")]
    #[case::hyphenated("well-known")]
    fn benign_text_passes_sql_category(#[case] text: &str) {
        assert!(!is_unsafe(PatternCategory::SqlInjection, text));
    }

    #[rstest]
    #[case::script_block("<script>alert(1)</script>")]
    #[case::script_block_with_attributes(r#"<script type="text/javascript">x()</script>"#)]
    #[case::script_block_mixed_case("<SCRIPT>alert(1)</SCRIPT>")]
    #[case::multiline_script_block("<script>\nalert(1)\n</script>")]
    #[case::javascript_scheme("javascript:alert(1)")]
    #[case::event_handler("<img onerror=alert(1)>")]
    #[case::event_handler_with_space("<div onclick = go()>")]
    #[case::iframe_tag("<iframe src=x>")]
    #[case::embed_tag("<embed src=x>")]
    #[case::object_tag("<object data=x>")]
    fn script_injection_shapes_match(#[case] text: &str) {
        assert!(is_unsafe(PatternCategory::ScriptInjection, text));
    }

    #[rstest]
    #[case::plain_sentence("write the report")]
    #[case::angle_brackets_without_tags("1 < 2 and 3 > 2")]
    #[case::word_starting_with_on("ongoing work")]
    fn benign_text_passes_script_category(#[case] text: &str) {
        assert!(!is_unsafe(PatternCategory::ScriptInjection, text));
    }

    #[rstest]
    fn categories_are_independent() {
        // A script payload without quotes or keywords trips only one set.
        let text = "<iframe src=x>";
        assert!(is_unsafe(PatternCategory::ScriptInjection, text));
        assert!(!is_unsafe(PatternCategory::SqlInjection, text));
    }
}
