//! Tokenizer for Borm source text.
//!
//! Splits text on a fixed set of single-character delimiters. Every token is
//! tagged with its zero-based (line, column) position and its byte range.

mod tokens;

pub use tokens::TokenKind;

use logos::Logos;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::syntax::{Position, Span};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The token text, exactly as it appears in the source.
    pub text: SmolStr,
    /// Position of the first character.
    pub position: Position,
    /// The byte range of the token in the source text.
    pub range: TextRange,
}

impl Token {
    /// Returns the position just past the last character of the token.
    #[must_use]
    pub fn end(&self) -> Position {
        Position::new(self.position.line, self.position.column + self.width())
    }

    /// Returns the line/column span of the token.
    #[must_use]
    pub fn span(&self) -> Span {
        Span::new(self.position, self.end())
    }

    /// Width of the token in characters.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.text.chars().count() as u32
    }

    /// Returns true if the token has the given text.
    #[must_use]
    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }
}

/// Lexer over Borm source text.
///
/// Yields every token, trivia included. Use [`tokenize`] for the token
/// sequence the tree builder consumes.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    line: u32,
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            line: 0,
            column: 0,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        // Word covers every non-delimiter character, so logos never fails here.
        let kind = self.inner.next()?.unwrap_or(TokenKind::Word);
        let mut span = self.inner.span();
        let mut text = self.inner.slice();
        // A word running into CRLF leaves its `\r` to the line terminator.
        if kind == TokenKind::Word
            && text.ends_with('\r')
            && self.inner.remainder().starts_with('\n')
        {
            span.end -= 1;
            text = &text[..text.len() - 1];
        }

        let position = Position::new(self.line, self.column);
        if kind == TokenKind::Newline {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += text.chars().count() as u32;
        }

        Some(Token {
            kind,
            text: SmolStr::new(text),
            position,
            range: TextRange::new(
                TextSize::from(span.start as u32),
                TextSize::from(span.end as u32),
            ),
        })
    }
}

/// Tokenizes the source, dropping whitespace and line terminators.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source)
        .filter(|token| !token.kind.is_trivia())
        .collect()
}
