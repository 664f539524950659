//! Shell command parsing
//!
//! `q <question>` asks; everything else is a built-in.

/// Shell commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask a question; empty text means `q` was typed alone
    Question { text: String },
    Help,
    History { limit: Option<usize> },
    Status,
    Clear,
    Exit,
    /// Blank line
    Empty,
    Unknown { input: String },
}

/// Default number of entries shown by `history`
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Parse one input line into a command
pub fn parse(input: &str) -> Command {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }

    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (trimmed, ""),
    };

    match name.to_lowercase().as_str() {
        "q" => Command::Question {
            text: strip_quotes(rest).trim().to_string(),
        },
        "help" | "h" | "?" => Command::Help,
        "history" => Command::History {
            limit: rest.split_whitespace().next().and_then(|s| s.parse().ok()),
        },
        "status" => Command::Status,
        "clear" | "cls" => Command::Clear,
        "exit" | "quit" => Command::Exit,
        _ => Command::Unknown {
            input: trimmed.to_string(),
        },
    }
}

/// Remove one pair of matching surrounding quotes
fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Built-ins shown by `help`
pub fn help_entries() -> Vec<(&'static str, &'static str)> {
    vec![
        ("q <question>", "Ask a question about the reference document"),
        ("q \"<question>\"", "Same, with the question in quotes"),
        ("history [n]", "Show the last n inputs (default: 10)"),
        ("status", "Show how many chunks are stored"),
        ("clear, cls", "Clear the screen"),
        ("help, h", "Show this help message"),
        ("exit, quit", "Leave the shell (or press Ctrl-D)"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str) -> Command {
        Command::Question {
            text: text.to_string(),
        }
    }

    #[test]
    fn test_parse_question() {
        assert_eq!(parse("q what is pgvector?"), question("what is pgvector?"));
        assert_eq!(parse("  Q   spaced out  "), question("spaced out"));
    }

    #[test]
    fn test_parse_quoted_question() {
        assert_eq!(parse(r#"q "What is HNSW?""#), question("What is HNSW?"));
        assert_eq!(parse("q 'single quoted'"), question("single quoted"));
        assert_eq!(parse(r#"q "  padded  ""#), question("padded"));
    }

    #[test]
    fn test_unbalanced_quotes_kept() {
        assert_eq!(parse(r#"q "half open"#), question("\"half open"));
        assert_eq!(parse(r#"q "mixed'"#), question("\"mixed'"));
    }

    #[test]
    fn test_bare_q_is_empty_question() {
        assert_eq!(parse("q"), question(""));
        assert_eq!(parse("q   "), question(""));
        assert_eq!(parse(r#"q """#), question(""));
    }

    #[test]
    fn test_question_keyword_needs_separator() {
        assert_eq!(
            parse("query something"),
            Command::Unknown {
                input: "query something".to_string()
            }
        );
    }

    #[test]
    fn test_parse_builtins() {
        assert_eq!(parse("help"), Command::Help);
        assert_eq!(parse("status"), Command::Status);
        assert_eq!(parse("cls"), Command::Clear);
        assert_eq!(parse("exit"), Command::Exit);
        assert_eq!(parse("QUIT"), Command::Exit);
        assert_eq!(parse(""), Command::Empty);
    }

    #[test]
    fn test_parse_history() {
        assert_eq!(parse("history"), Command::History { limit: None });
        assert_eq!(parse("history 3"), Command::History { limit: Some(3) });
        assert_eq!(parse("history lots"), Command::History { limit: None });
    }

    #[test]
    fn test_help_lists_every_builtin() {
        let names: Vec<_> = help_entries().into_iter().map(|(cmd, _)| cmd).collect();
        for expected in ["history", "status", "clear", "exit"] {
            assert!(names.iter().any(|n| n.starts_with(expected)));
        }
    }
}
