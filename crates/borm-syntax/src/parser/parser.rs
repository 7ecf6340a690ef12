//! Parser state: a token cursor plus the node arena being built.

use drop_bomb::DropBomb;
use text_size::TextRange;

use crate::lexer::Token;
use crate::parser::grammar;
use crate::parser::scan::reconstruct;
use crate::syntax::{NodeId, Position, Span, SyntaxKind, SyntaxNode, SyntaxTree};

/// Builds the syntax tree for a document from its tokens.
///
/// Never fails: malformed constructs become bad nodes, and an empty token
/// sequence yields an empty File root.
#[must_use]
pub fn build_tree(document_id: &str, tokens: &[Token]) -> SyntaxTree {
    let mut parser = Parser::new(tokens);
    if tokens.is_empty() {
        parser.alloc(
            SyntaxKind::File,
            document_id.to_string(),
            Span::default(),
            TextRange::default(),
        );
        return SyntaxTree::from_nodes(parser.nodes);
    }

    let file = parser.start(SyntaxKind::File, document_id);
    grammar::items(&mut parser);
    file.complete(&mut parser);
    SyntaxTree::from_nodes(parser.nodes)
}

/// The parser state.
pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    limit: usize,
    nodes: Vec<SyntaxNode>,
    open: Vec<NodeId>,
}

/// An open node. Must be completed before the parser moves on.
pub(crate) struct Marker {
    id: NodeId,
    start: usize,
    bomb: DropBomb,
}

impl Marker {
    pub(crate) fn id(&self) -> NodeId {
        self.id
    }

    /// Marks the node bad with `message`.
    pub(crate) fn error(&self, parser: &mut Parser<'_>, message: impl Into<String>) {
        parser.error(self.id, message);
    }

    /// Closes the node over every token consumed since it was started.
    pub(crate) fn complete(mut self, parser: &mut Parser<'_>) -> NodeId {
        self.bomb.defuse();
        let closed = parser.open.pop();
        debug_assert_eq!(closed, Some(self.id), "markers must complete in order");

        let consumed = &parser.tokens[self.start..parser.pos];
        if let (Some(first), Some(last)) = (consumed.first(), consumed.last()) {
            let node = &mut parser.nodes[self.id.index()];
            node.span = Span::new(first.position, last.end());
            node.text_range = TextRange::new(first.range.start(), last.range.end());
        }
        self.id
    }
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            limit: tokens.len(),
            nodes: Vec::new(),
            open: Vec::new(),
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.limit
    }

    pub(crate) fn current(&self) -> Option<&'t Token> {
        self.nth(0)
    }

    pub(crate) fn nth(&self, n: usize) -> Option<&'t Token> {
        self.remaining().get(n)
    }

    /// Tokens from the cursor up to the current limit.
    pub(crate) fn remaining(&self) -> &'t [Token] {
        let tokens = self.tokens;
        &tokens[self.pos.min(self.limit)..self.limit]
    }

    /// Tokens from the cursor to the end of the current line.
    pub(crate) fn line(&self) -> &'t [Token] {
        let rest = self.remaining();
        let Some(first) = rest.first() else {
            return rest;
        };
        let len = rest
            .iter()
            .position(|token| token.position.line != first.position.line)
            .unwrap_or(rest.len());
        &rest[..len]
    }

    pub(crate) fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.limit);
    }

    /// Runs `f` with the cursor limited to the next `len` tokens.
    pub(crate) fn with_limit(&mut self, len: usize, f: impl FnOnce(&mut Self)) {
        let saved = self.limit;
        self.limit = (self.pos + len).min(saved);
        f(self);
        self.limit = saved;
    }

    /// Opens a node at the cursor, as a child of the innermost open node.
    pub(crate) fn start(&mut self, kind: SyntaxKind, value: impl Into<String>) -> Marker {
        let (span, range) = self
            .current()
            .map(|token| (Span::new(token.position, token.position), token.range))
            .unwrap_or_default();
        let id = self.alloc(kind, value.into(), span, range);
        self.open.push(id);
        Marker {
            id,
            start: self.pos,
            bomb: DropBomb::new("Marker must be completed"),
        }
    }

    /// Adds a leaf over the next `n` tokens and moves past them.
    pub(crate) fn bump_leaf(
        &mut self,
        kind: SyntaxKind,
        n: usize,
        value: impl Into<String>,
    ) -> NodeId {
        let rest = self.remaining();
        let tokens = &rest[..n.min(rest.len())];
        let id = self.leaf(kind, tokens, value);
        self.advance(tokens.len());
        id
    }

    /// Adds a leaf over the next `n` tokens, valued with their reconstructed
    /// text, and moves past them.
    pub(crate) fn bump_text_leaf(&mut self, kind: SyntaxKind, n: usize) -> NodeId {
        let rest = self.remaining();
        let tokens = &rest[..n.min(rest.len())];
        self.bump_leaf(kind, tokens.len(), reconstruct(tokens))
    }

    /// Adds a leaf spanning `tokens` without moving the cursor.
    pub(crate) fn leaf(
        &mut self,
        kind: SyntaxKind,
        tokens: &[Token],
        value: impl Into<String>,
    ) -> NodeId {
        let (span, range) = match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => (
                Span::new(first.position, last.end()),
                TextRange::new(first.range.start(), last.range.end()),
            ),
            _ => self.empty_span(),
        };
        self.alloc(kind, value.into(), span, range)
    }

    /// Adds a leaf covering part of a line, without moving the cursor.
    pub(crate) fn partial_leaf(
        &mut self,
        kind: SyntaxKind,
        span: Span,
        range: TextRange,
        value: impl Into<String>,
    ) -> NodeId {
        self.alloc(kind, value.into(), span, range)
    }

    /// Marks `id` bad with `message`.
    pub(crate) fn error(&mut self, id: NodeId, message: impl Into<String>) {
        let node = &mut self.nodes[id.index()];
        node.is_bad = true;
        node.diagnostics.push(message.into());
    }

    pub(crate) fn set_value(&mut self, id: NodeId, value: impl Into<String>) {
        self.nodes[id.index()].value = value.into();
    }

    /// Kind of the innermost open node.
    pub(crate) fn parent_kind(&self) -> Option<SyntaxKind> {
        self.open.last().map(|&id| self.nodes[id.index()].kind)
    }

    /// Returns true once the innermost open node has a child outside the
    /// header region.
    pub(crate) fn passed_header(&self) -> bool {
        let Some(&parent) = self.open.last() else {
            return false;
        };
        self.nodes[parent.index()].children.iter().any(|&child| {
            !matches!(
                self.nodes[child.index()].kind,
                SyntaxKind::Comment | SyntaxKind::Include | SyntaxKind::Namespace
            )
        })
    }

    fn empty_span(&self) -> (Span, TextRange) {
        let position = self
            .current()
            .map_or(Position::default(), |token| token.position);
        let offset = self
            .current()
            .map(|token| token.range.start())
            .unwrap_or_default();
        (Span::new(position, position), TextRange::empty(offset))
    }

    fn alloc(
        &mut self,
        kind: SyntaxKind,
        value: String,
        span: Span,
        text_range: TextRange,
    ) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        let parent = self.open.last().copied();
        self.nodes.push(SyntaxNode {
            kind,
            value,
            span,
            text_range,
            parent,
            children: Vec::new(),
            is_bad: false,
            diagnostics: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }
}
