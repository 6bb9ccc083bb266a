//! Task descriptions
//!
//! A description is declared once and picked up by whichever task is
//! defined next. The text may start with a bracketed list of argument
//! names, e.g. `[target, profile] Build the project`.

use tracing::trace;

/// Maximum number of characters kept in a one-line comment
pub const COMMENT_LIMIT: usize = 50;

/// Parsed description metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    /// Text as it was declared
    pub raw: String,

    /// Declared argument names, in order
    pub arg_names: Vec<String>,

    /// First non-blank line, truncated to `COMMENT_LIMIT` characters
    pub comment: Option<String>,

    /// De-indented body, present only for multi-line descriptions
    pub full_comment: Option<String>,
}

impl Description {
    /// Parse a description text
    pub fn parse(text: &str) -> Self {
        let (arg_names, body, inline) = split_arg_names(text);

        let comment = body
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(truncate_comment);

        Description {
            raw: text.to_string(),
            arg_names,
            comment,
            full_comment: extended_comment(body, inline),
        }
    }
}

/// Single-slot holder for the description of the next defined task
#[derive(Debug, Default)]
pub struct DescriptionStore {
    pending: Option<String>,
}

impl DescriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a description for the next task definition, replacing any
    /// description that was never consumed
    pub fn declare(&mut self, text: impl Into<String>) {
        self.pending = Some(text.into());
    }

    /// Consume the pending description, leaving the store empty
    pub fn take(&mut self) -> Option<Description> {
        let description = Description::parse(&self.pending.take()?);
        trace!(
            description = %description.raw,
            args = description.arg_names.len(),
            "consuming pending description"
        );
        Some(description)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// Split a leading `[a, b]` list off the text
///
/// The flag is set when text follows the closing bracket on the same line.
fn split_arg_names(text: &str) -> (Vec<String>, &str, bool) {
    let trimmed = text.trim_start();

    if let Some(inner) = trimmed.strip_prefix('[') {
        if let Some(end) = inner.find(']') {
            let names = inner[..end]
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();
            let rest = &inner[end + 1..];
            let inline = !rest.lines().next().unwrap_or("").trim().is_empty();
            return (names, rest, inline);
        }
    }

    (Vec::new(), text, false)
}

fn truncate_comment(line: &str) -> String {
    if line.chars().count() > COMMENT_LIMIT {
        let mut comment: String = line.chars().take(COMMENT_LIMIT).collect();
        comment.push_str("...");
        comment
    } else {
        line.to_string()
    }
}

/// Strip surrounding blank lines and common indentation
///
/// An `inline` first line sits after the argument list, so its own
/// indentation says nothing about the lines below it.
fn extended_comment(body: &str, inline: bool) -> Option<String> {
    let lines: Vec<&str> = body.lines().collect();
    let start = lines.iter().position(|line| !line.trim().is_empty())?;
    let end = lines.iter().rposition(|line| !line.trim().is_empty())?;
    let lines = &lines[start..=end];

    if lines.len() < 2 {
        return None;
    }

    let skip = usize::from(inline);
    let indent = lines
        .iter()
        .skip(skip)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    let dedented: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i < skip {
                line.trim()
            } else if line.trim().is_empty() {
                ""
            } else {
                strip_indent(line, indent)
            }
        })
        .collect();

    Some(dedented.join("\n"))
}

fn strip_indent(line: &str, width: usize) -> &str {
    match line.char_indices().nth(width) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_description() {
        let desc = Description::parse("T");
        assert!(desc.arg_names.is_empty());
        assert_eq!(desc.comment.as_deref(), Some("T"));
        assert_eq!(desc.full_comment, None);
    }

    #[test]
    fn test_arg_names_are_split_and_trimmed() {
        let desc = Description::parse("[a, b] Title");
        assert_eq!(desc.arg_names, vec!["a", "b"]);
        assert_eq!(desc.comment.as_deref(), Some("Title"));
    }

    #[test]
    fn test_arg_names_without_comment() {
        let desc = Description::parse("[a,b]");
        assert_eq!(desc.arg_names, vec!["a", "b"]);
        assert_eq!(desc.comment, None);
        assert_eq!(desc.full_comment, None);
    }

    #[test]
    fn test_comment_at_limit_is_unchanged() {
        let text = "12345678901234567890123456789012345678901234567890";
        let desc = Description::parse(text);
        assert_eq!(desc.comment.as_deref(), Some(text));
    }

    #[test]
    fn test_comment_above_limit_is_truncated() {
        let desc = Description::parse("123456789012345678901234567890123456789012345678901");
        let comment = desc.comment.unwrap();
        assert_eq!(
            comment,
            "12345678901234567890123456789012345678901234567890..."
        );
        assert_eq!(comment.chars().count(), 53);
    }

    #[test]
    fn test_truncation_counts_characters() {
        let text = "é".repeat(51);
        let desc = Description::parse(&text);
        assert_eq!(desc.comment.unwrap(), format!("{}...", "é".repeat(50)));
    }

    #[test]
    fn test_extended_description() {
        let text = "
            [name, rev]
            This is a comment.

            And this is the extended comment.
            name -- Name of task to execute.
            rev  -- Software revision to use.
        ";
        let desc = Description::parse(text);
        assert_eq!(desc.arg_names, vec!["name", "rev"]);
        assert_eq!(desc.comment.as_deref(), Some("This is a comment."));

        let full = desc.full_comment.unwrap();
        let lines: Vec<&str> = full.lines().collect();
        assert_eq!(lines[0], "This is a comment.");
        assert_eq!(lines[1], "");
        assert!(lines.contains(&"name -- Name of task to execute."));
        assert!(lines.contains(&"rev  -- Software revision to use."));
    }

    #[test]
    fn test_extended_description_after_inline_args() {
        let desc = Description::parse("[a] Title\n  more\n    detail");
        assert_eq!(desc.arg_names, vec!["a"]);
        assert_eq!(desc.comment.as_deref(), Some("Title"));
        assert_eq!(desc.full_comment.as_deref(), Some("Title\nmore\n  detail"));
    }

    #[test]
    fn test_unclosed_bracket_is_part_of_comment() {
        let desc = Description::parse("[oops no close");
        assert!(desc.arg_names.is_empty());
        assert_eq!(desc.comment.as_deref(), Some("[oops no close"));
    }

    #[test]
    fn test_store_is_consumed_once() {
        let mut store = DescriptionStore::new();
        assert!(store.take().is_none());

        store.declare("first");
        store.declare("second");
        assert!(store.is_pending());

        let desc = store.take().unwrap();
        assert_eq!(desc.raw, "second");
        assert!(!store.is_pending());
        assert!(store.take().is_none());
    }

    #[test]
    fn test_store_clear() {
        let mut store = DescriptionStore::new();
        store.declare("pending");
        store.clear();
        assert!(store.take().is_none());
    }
}
