//! Token-level scanning helpers shared by the grammar.
//!
//! The tokenizer does not know about strings or comments, so the grammar
//! tracks quote and comment state itself while walking tokens.

use crate::lexer::{Token, TokenKind};

/// Open string, char and backtick spans on the current line.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Quotes {
    double: bool,
    single: bool,
    backtick: bool,
}

impl Quotes {
    /// Updates the state for one token.
    pub(crate) fn feed(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::DoubleQuote if !self.single && !self.backtick => {
                self.double = !self.double;
            }
            TokenKind::SingleQuote if !self.double && !self.backtick => {
                self.single = !self.single;
            }
            TokenKind::Backtick if !self.double && !self.single => {
                self.backtick = !self.backtick;
            }
            _ => {}
        }
    }

    /// Returns true while inside any quoted span.
    pub(crate) fn active(self) -> bool {
        self.double || self.single || self.backtick
    }
}

/// Returns true if `tokens[idx]` starts a `//` comment: two slashes, side by
/// side on one line.
pub(crate) fn is_comment_opener(tokens: &[Token], idx: usize) -> bool {
    let (Some(first), Some(second)) = (tokens.get(idx), tokens.get(idx + 1)) else {
        return false;
    };
    first.kind == TokenKind::Slash
        && second.kind == TokenKind::Slash
        && second.position.line == first.position.line
        && second.position.column == first.position.column + 1
}

/// Length of `line` without its trailing `//` comment.
pub(crate) fn code_len(line: &[Token]) -> usize {
    let mut quotes = Quotes::default();
    for (idx, token) in line.iter().enumerate() {
        if !quotes.active() && is_comment_opener(line, idx) {
            return idx;
        }
        quotes.feed(token.kind);
    }
    line.len()
}

/// Length of the statement at the start of `line`.
///
/// Stops after the first `;` outside quotes, before a `//` comment, and,
/// when `stop_at_brace` is set, before the first `{` outside quotes.
pub(crate) fn statement_len(line: &[Token], stop_at_brace: bool) -> usize {
    let mut quotes = Quotes::default();
    for (idx, token) in line.iter().enumerate() {
        if !quotes.active() {
            if is_comment_opener(line, idx) {
                return idx;
            }
            match token.kind {
                TokenKind::Semicolon => return idx + 1,
                TokenKind::LBrace if stop_at_brace => return idx,
                _ => {}
            }
        }
        quotes.feed(token.kind);
    }
    line.len()
}

/// Index of the `}` closing the `{` at `tokens[0]`.
///
/// Braces inside quotes do not count, and a `//` outside quotes hides the
/// rest of its line. Quote state resets at every line break since string
/// literals never span lines.
pub(crate) fn matching_brace(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0usize;
    let mut quotes = Quotes::default();
    let mut line = tokens.first()?.position.line;
    let mut comment_line = None;

    for (idx, token) in tokens.iter().enumerate() {
        if token.position.line != line {
            line = token.position.line;
            quotes = Quotes::default();
        }
        if comment_line == Some(line) {
            continue;
        }
        if !quotes.active() && is_comment_opener(tokens, idx) {
            comment_line = Some(line);
            continue;
        }
        quotes.feed(token.kind);
        if quotes.active() {
            continue;
        }
        match token.kind {
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Rebuilds the text covered by `tokens`.
///
/// Column gaps between tokens on one line are filled with spaces, the only
/// separator the lexer drops. Lines are joined with `\n`.
pub(crate) fn reconstruct(tokens: &[Token]) -> String {
    let mut text = String::new();
    let mut prev: Option<&Token> = None;
    for token in tokens {
        if let Some(prev) = prev {
            if prev.position.line == token.position.line {
                let gap = token.position.column.saturating_sub(prev.end().column);
                text.extend(std::iter::repeat(' ').take(gap as usize));
            } else {
                text.push('\n');
            }
        }
        text.push_str(&token.text);
        prev = Some(token);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn reconstruct_restores_spacing() {
        let tokens = tokenize("string  s = \"a  b\";");
        assert_eq!(reconstruct(&tokens), "string  s = \"a  b\";");
    }

    #[test]
    fn reconstruct_joins_lines() {
        let tokens = tokenize("  a b\n    c");
        assert_eq!(reconstruct(&tokens), "a b\nc");
    }

    #[test]
    fn comment_opener_needs_adjacent_slashes() {
        let tokens = tokenize("a // b / / c");
        assert!(is_comment_opener(&tokens, 1));
        assert!(!is_comment_opener(&tokens, 4));
    }

    #[test]
    fn code_len_keeps_slashes_inside_quotes() {
        let tokens = tokenize("#include \"a//b.h\" // note");
        assert_eq!(code_len(&tokens), 9);
    }

    #[test]
    fn statement_len_stops_after_semicolon_outside_quotes() {
        let tokens = tokenize("string s = \"a;b\"; int y;");
        assert_eq!(statement_len(&tokens, false), 9);
    }

    #[test]
    fn statement_len_stops_before_comment_and_brace() {
        let tokens = tokenize("int function f() { // body");
        assert_eq!(statement_len(&tokens, true), 5);
        assert_eq!(statement_len(&tokens, false), 6);
    }

    #[test]
    fn matching_brace_skips_quoted_braces() {
        let tokens = tokenize("{ x = \"{\"; }\ntail");
        let close = matching_brace(&tokens).expect("closing brace");
        assert_eq!(tokens[close].text, "}");
        assert_eq!(tokens[close].position.line, 0);
    }

    #[test]
    fn matching_brace_ignores_commented_braces() {
        let tokens = tokenize("{\n  // }\n  { }\n}");
        let close = matching_brace(&tokens).expect("closing brace");
        assert_eq!(tokens[close].position.line, 3);
    }

    #[test]
    fn matching_brace_reports_unclosed_body() {
        let tokens = tokenize("{ {\n}");
        assert_eq!(matching_brace(&tokens), None);
    }
}
