//! Regex-based HTML to plain text reduction.
//!
//! This is not an HTML parser. Comments or CDATA sections containing angle
//! brackets and malformed markup are not handled specially, and character
//! entities are left as-is.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SCRIPT_REGEX: Regex = Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap();
    static ref STYLE_REGEX: Regex = Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap();
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Strip scripts, styles and tags from HTML and collapse whitespace.
///
/// Order matters: script and style blocks go first so their contents never
/// leak into the text once the surrounding tags are removed.
pub fn html_to_text(html: &str) -> String {
    let text = SCRIPT_REGEX.replace_all(html, "");
    let text = STYLE_REGEX.replace_all(&text, "");
    let text = TAG_REGEX.replace_all(&text, "");
    let text = WHITESPACE_REGEX.replace_all(&text, " ");

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_script_and_tags() {
        let html = "<script>alert(1)</script><p>Hello&nbsp;World</p>";
        assert_eq!(html_to_text(html), "Hello&nbsp;World");
    }

    #[test]
    fn test_script_case_insensitive_and_multiline() {
        let html = "<SCRIPT type=\"text/javascript\">\nvar x = '<p>no</p>';\n</Script><p>yes</p>";
        assert_eq!(html_to_text(html), "yes");
    }

    #[test]
    fn test_script_is_non_greedy() {
        let html = "<script>a()</script>keep<script>b()</script>";
        assert_eq!(html_to_text(html), "keep");
    }

    #[test]
    fn test_strips_style_blocks() {
        let html = "<html><head><style media=\"screen\">\nbody { color: red; }\n</style></head><body>Text</body></html>";
        assert_eq!(html_to_text(html), "Text");
    }

    #[test]
    fn test_collapses_whitespace() {
        let html = "  <h1>Title</h1>\n\n\t<p>First   line</p>\n<p>Second</p>  ";
        assert_eq!(html_to_text(html), "Title First line Second");
    }

    #[test]
    fn test_entities_not_decoded() {
        assert_eq!(html_to_text("<b>a &amp; b</b>"), "a &amp; b");
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(html_to_text("just text"), "just text");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(html_to_text(""), "");
        assert_eq!(html_to_text("<div>   </div>"), "");
    }
}
