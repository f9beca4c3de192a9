// src/extract/filter.rs
// =============================================================================
// This module removes unwanted lines from extracted shell snippets.
//
// How it works:
// 1. Split each block into lines
// 2. Strip the leading whitespace of a line (only for the comparison)
// 3. Drop the line if it starts with any exclude prefix
// 4. Glue the remaining lines back together, untouched
// 5. Drop the whole block if nothing but whitespace is left
//
// Prefixes are plain strings, not patterns: ".*" only matches a line that
// literally starts with ".*". Comparison is case-sensitive.
//
// Rust concepts:
// - Ownership: the blocks Vec is taken by value and handed back unchanged
//   when there is nothing to filter, so no copy is made
// - Iterator chains: split -> filter -> collect -> join
// =============================================================================

// Filters each block line by line
//
// Parameters:
//   blocks: code blocks as produced by extract_shell_blocks
//   exclude_prefixes: literal prefixes, e.g. ["sudo", "rm "]
//
// Returns: the blocks that still have content, in their original order
//
// Example:
//   blocks = ["echo hi\nrm -rf /"], prefixes = ["rm"]
//   result = ["echo hi"]
pub fn filter_blocks(blocks: Vec<String>, exclude_prefixes: &[String]) -> Vec<String> {
    // No prefixes: the input comes back exactly as it went in
    if exclude_prefixes.is_empty() {
        return blocks;
    }

    blocks
        .into_iter()
        .map(|block| {
            // Empty lines and a trailing "\r" stay exactly where they were
            block
                .split('\n')
                .filter(|line| !is_excluded(line, exclude_prefixes))
                .collect::<Vec<_>>()
                .join("\n")
        })
        // A block whose every line was removed disappears entirely
        .filter(|block| !block.trim().is_empty())
        .collect()
}

// Checks one line against every prefix
//
// Only the comparison ignores indentation; the kept line is not modified.
fn is_excluded(line: &str, exclude_prefixes: &[String]) -> bool {
    let line = line.trim_start();
    exclude_prefixes
        .iter()
        .any(|prefix| line.starts_with(prefix.as_str()))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why take Vec<String> by value?
//    - We build new strings for filtered blocks anyway
//    - In the no-prefix case we can return the very same Vec, for free
//
// 2. What does collect::<Vec<_>>() do here?
//    - The "turbofish" tells collect which collection to build
//    - `_` lets the compiler work out the element type (&str)
//    - join("\n") then turns the Vec<&str> back into one String
//
// 3. Why `prefix.as_str()`?
//    - starts_with accepts a &str pattern; &String would need an extra deref
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn blocks(values: &[&str]) -> Vec<String> {
        prefixes(values)
    }

    #[test]
    fn test_empty_prefixes_is_identity() {
        let input = blocks(&["echo hi\nrm -rf /", "   "]);
        assert_eq!(filter_blocks(input.clone(), &[]), input);
    }

    #[test]
    fn test_removes_matching_line() {
        let result = filter_blocks(blocks(&["echo hi\nrm -rf /"]), &prefixes(&["rm"]));
        assert_eq!(result, vec!["echo hi"]);
    }

    #[test]
    fn test_drops_fully_filtered_block() {
        let result = filter_blocks(blocks(&["rm -rf /"]), &prefixes(&["rm"]));
        assert!(result.is_empty());
    }

    #[test]
    fn test_matches_after_leading_whitespace() {
        let result = filter_blocks(
            blocks(&["if true; then\n    sudo reboot\n    echo ok\nfi"]),
            &prefixes(&["sudo"]),
        );
        assert_eq!(result, vec!["if true; then\n    echo ok\nfi"]);
    }

    #[test]
    fn test_keeps_order_and_other_blocks() {
        let result = filter_blocks(
            blocks(&["a\n# note\nb\nc", "# only a comment", "d"]),
            &prefixes(&["#"]),
        );
        assert_eq!(result, vec!["a\nb\nc", "d"]);
    }

    #[test]
    fn test_prefix_is_case_sensitive_and_literal() {
        let result = filter_blocks(blocks(&["RM file\nrm file\nls .*"]), &prefixes(&["rm", ".*"]));
        assert_eq!(result, vec!["RM file\nls .*"]);
    }

    #[test]
    fn test_any_of_several_prefixes() {
        let result = filter_blocks(
            blocks(&["apt update\nbrew install jq\nnpm i"]),
            &prefixes(&["apt", "brew"]),
        );
        assert_eq!(result, vec!["npm i"]);
    }
}
