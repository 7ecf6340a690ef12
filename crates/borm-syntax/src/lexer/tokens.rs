//! Token definitions for Borm source text.
//!
//! The tokenizer only knows about a fixed set of single-character delimiters
//! and the runs of text between them. Keywords, comments and string literals
//! are recognised later by the tree builder.

use logos::Logos;

/// All token kinds produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Spaces. Space is the only separator within a line.
    #[regex(r" +")]
    Whitespace,

    /// Line terminator, with the `\r` of a CRLF pair.
    #[regex(r"\r?\n")]
    Newline,

    // =========================================================================
    // DELIMITERS
    // =========================================================================
    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `<`
    #[token("<")]
    LAngle,

    /// `>`
    #[token(">")]
    RAngle,

    /// `.`
    #[token(".")]
    Dot,

    /// `,`
    #[token(",")]
    Comma,

    /// `"`
    #[token("\"")]
    DoubleQuote,

    /// `'`
    #[token("'")]
    SingleQuote,

    /// `` ` ``
    #[token("`")]
    Backtick,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `:`
    #[token(":")]
    Colon,

    /// `/`
    #[token("/")]
    Slash,

    // =========================================================================
    // CONTENT
    // =========================================================================
    /// A maximal run of non-delimiter characters. Tabs are content.
    #[regex(r#"[^(){}<>.,"'`;:/ \n]+"#)]
    Word,
}

impl TokenKind {
    /// Returns `true` for tokens the tokenizer consumes as separators.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline)
    }

    /// Returns `true` for the three quote characters.
    #[must_use]
    pub fn is_quote(self) -> bool {
        matches!(self, Self::DoubleQuote | Self::SingleQuote | Self::Backtick)
    }
}
