// src/extract/markdown.rs
// =============================================================================
// This module pulls shell snippets out of Markdown text.
//
// We do NOT use a full Markdown parser here. Only two things matter:
// - where a ``` fence opens and closes
// - whether the opening fence is tagged bash, shell or sh
// A single regex handles both, and `find_iter` walks the text left to right
// without overlapping matches.
//
// Rust concepts:
// - Lazy statics: compile the regex once, reuse it for every page
// - Iterators: filter_map to trim bodies and skip empty ones
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;

// (?i) makes the language tag case-insensitive (Bash, SH, Shell...)
// (?s) lets `.` cross newlines so a body can span many lines
// The tag must be followed directly by a newline, and the body ends at the
// very next ``` wherever it sits on the line.
static SHELL_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)```(?:bash|shell|sh)\n(.*?)```").expect("valid fence regex"));

// Extracts every fenced bash/shell/sh block from Markdown text
//
// Parameters:
//   markdown: the page source (borrowed as &str)
//
// Returns: the trimmed bodies in the order they appear.
//   A page without matching fences gives an empty Vec.
//
// Example:
//   "```bash\necho hi\n```" -> vec!["echo hi"]
pub fn extract_shell_blocks(markdown: &str) -> Vec<String> {
    SHELL_FENCE
        .captures_iter(markdown)
        .filter_map(|caps| {
            let body = caps.get(1)?.as_str().trim();
            if body.is_empty() {
                None
            } else {
                Some(body.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_block() {
        let blocks = extract_shell_blocks("```bash\necho hi\n```");
        assert_eq!(blocks, vec!["echo hi"]);
    }

    #[test]
    fn test_extract_keeps_document_order() {
        let markdown = r#"
# Install

```sh
./configure
make
```

Then run:

```shell
make install
```
"#;
        let blocks = extract_shell_blocks(markdown);
        assert_eq!(blocks, vec!["./configure\nmake", "make install"]);
    }

    #[test]
    fn test_language_tag_is_case_insensitive() {
        let markdown = "```Bash\na\n```\n```SH\nb\n```\n```shell\nc\n```";
        assert_eq!(extract_shell_blocks(markdown), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_skips_other_and_untagged_fences() {
        let markdown = "```python\nprint(1)\n```\n```\nls\n```\n```shx\nnope\n```";
        assert!(extract_shell_blocks(markdown).is_empty());
    }

    #[test]
    fn test_no_fences_gives_empty_vec() {
        assert!(extract_shell_blocks("Just some text.").is_empty());
        assert!(extract_shell_blocks("").is_empty());
    }

    #[test]
    fn test_empty_body_is_dropped() {
        let markdown = "```bash\n   \n```\n```bash\necho kept\n```";
        assert_eq!(extract_shell_blocks(markdown), vec!["echo kept"]);
    }

    #[test]
    fn test_closing_fence_need_not_be_on_own_line() {
        let markdown = "```bash\necho inline```\ntrailing text";
        assert_eq!(extract_shell_blocks(markdown), vec!["echo inline"]);
    }

    #[test]
    fn test_tag_must_be_followed_by_newline() {
        assert!(extract_shell_blocks("```bash echo hi```").is_empty());
    }
}
