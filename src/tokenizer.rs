//! Explicit scanner for the command invocation grammar.
//!
//! An invocation is `name(arg1,arg2,...)`: a name of one or more ASCII
//! letters, a parenthesized comma-separated token list, and nothing
//! else on the line. Tokens may contain any character except `,` and
//! `)` and are trimmed of surrounding whitespace; `name()` carries zero
//! tokens. Names are case-sensitive; digits, underscores and
//! punctuation cannot appear in a name.

use thiserror::Error;

/// A parsed command invocation, borrowing from the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// The command name.
    pub name: &'a str,
    /// Trimmed argument tokens, in order.
    pub args: Vec<&'a str>,
    /// The raw input line.
    pub raw: &'a str,
}

/// Why a line is not an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected a command name at position {position}")]
    ExpectedName { position: usize },
    #[error("expected '(' at position {position}")]
    ExpectedOpenParen { position: usize },
    #[error("missing closing ')'")]
    UnterminatedCall,
    #[error("unexpected trailing input at position {position}")]
    TrailingInput { position: usize },
}

/// Scan a whole input line as a command invocation.
///
/// The entire line must be consumed; leading whitespace or anything
/// after the closing parenthesis makes the line a non-invocation.
///
/// ```
/// use devconsole::parse_invocation;
///
/// let invocation = parse_invocation("teleport(3;4, fast)").unwrap();
/// assert_eq!(invocation.name, "teleport");
/// assert_eq!(invocation.args, vec!["3;4", "fast"]);
///
/// assert!(parse_invocation("teleport").is_err());
/// ```
pub fn parse_invocation(input: &str) -> Result<Invocation<'_>, ParseError> {
    let bytes = input.as_bytes();

    let mut pos = 0;
    while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
        pos += 1;
    }
    if pos == 0 {
        return Err(ParseError::ExpectedName { position: 0 });
    }
    let name = &input[..pos];

    if bytes.get(pos) != Some(&b'(') {
        return Err(ParseError::ExpectedOpenParen { position: pos });
    }
    pos += 1;

    // Tokens cannot contain ')', so the first one closes the list.
    let body_start = pos;
    while pos < bytes.len() && bytes[pos] != b')' {
        pos += 1;
    }
    if pos >= bytes.len() {
        return Err(ParseError::UnterminatedCall);
    }
    let body = &input[body_start..pos];
    pos += 1;

    if pos != input.len() {
        return Err(ParseError::TrailingInput { position: pos });
    }

    let args = if body.is_empty() {
        Vec::new()
    } else {
        body.split(',').map(str::trim).collect()
    };

    Ok(Invocation {
        name,
        args,
        raw: input,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let invocation = parse_invocation("spawn(goblin,3)").unwrap();
        assert_eq!(invocation.name, "spawn");
        assert_eq!(invocation.args, vec!["goblin", "3"]);
        assert_eq!(invocation.raw, "spawn(goblin,3)");
    }

    #[test]
    fn test_parse_zero_args() {
        let invocation = parse_invocation("quit()").unwrap();
        assert_eq!(invocation.name, "quit");
        assert!(invocation.args.is_empty());
    }

    #[test]
    fn test_tokens_are_trimmed() {
        let invocation = parse_invocation("add( 1 ,  2 )").unwrap();
        assert_eq!(invocation.args, vec!["1", "2"]);
    }

    #[test]
    fn test_empty_tokens_are_preserved() {
        let invocation = parse_invocation("cmd(a,,b)").unwrap();
        assert_eq!(invocation.args, vec!["a", "", "b"]);

        let invocation = parse_invocation("cmd(a,)").unwrap();
        assert_eq!(invocation.args, vec!["a", ""]);
    }

    #[test]
    fn test_tokens_may_contain_odd_characters() {
        let invocation = parse_invocation("vec(1;2, x=3 (ish)").unwrap();
        assert_eq!(invocation.args, vec!["1;2", "x=3 (ish"]);
        // The first ')' closes the list, so a second one trails.
        assert!(parse_invocation("vec(1;2) extra").is_err());
    }

    #[test]
    fn test_name_must_be_letters_only() {
        assert_eq!(
            parse_invocation("cmd2(a)"),
            Err(ParseError::ExpectedOpenParen { position: 3 })
        );
        assert_eq!(
            parse_invocation("my_cmd(a)"),
            Err(ParseError::ExpectedOpenParen { position: 2 })
        );
        assert_eq!(
            parse_invocation("(a)"),
            Err(ParseError::ExpectedName { position: 0 })
        );
        assert_eq!(
            parse_invocation("1cmd(a)"),
            Err(ParseError::ExpectedName { position: 0 })
        );
    }

    #[test]
    fn test_whole_line_must_match() {
        assert!(matches!(
            parse_invocation(" spawn(a)"),
            Err(ParseError::ExpectedName { .. })
        ));
        assert!(matches!(
            parse_invocation("spawn(a) "),
            Err(ParseError::TrailingInput { .. })
        ));
        assert!(matches!(
            parse_invocation("spawn(a))"),
            Err(ParseError::TrailingInput { .. })
        ));
    }

    #[test]
    fn test_unterminated_call() {
        assert_eq!(parse_invocation("spawn(a"), Err(ParseError::UnterminatedCall));
        assert_eq!(
            parse_invocation("spawn"),
            Err(ParseError::ExpectedOpenParen { position: 5 })
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            parse_invocation(""),
            Err(ParseError::ExpectedName { position: 0 })
        );
    }

    #[test]
    fn test_multibyte_tokens() {
        let invocation = parse_invocation("say(héllo wörld)").unwrap();
        assert_eq!(invocation.args, vec!["héllo wörld"]);
    }
}
