//! Syntax tree types for Borm.
//!
//! The tree is stored as an arena: nodes live in a `Vec` and refer to each
//! other through [`NodeId`]s. Children are owned top-down by the arena; the
//! parent link is a plain index and never owns anything.

use std::fmt;

use text_size::TextRange;

/// A zero-based line/column position. Columns count characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Zero-based line.
    pub line: u32,
    /// Zero-based column.
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A start/end pair of positions, half-open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// First position covered.
    pub start: Position,
    /// Position just past the last character covered.
    pub end: Position,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns true if the span starts and ends on `line`.
    #[must_use]
    pub fn is_on_line(&self, line: u32) -> bool {
        self.start.line == line && self.end.line == line
    }

    /// Returns true if `line` lies between the start and end lines.
    #[must_use]
    pub fn covers_line(&self, line: u32) -> bool {
        self.start.line <= line && line <= self.end.line
    }

    /// Returns true if `position` lies within the span, end inclusive.
    ///
    /// The end is inclusive so a cursor placed right after a token still
    /// resolves to it.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    /// Returns true if `other` lies entirely within this span.
    #[must_use]
    pub fn contains_span(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// The kind of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SyntaxKind {
    /// Root of a document; its value is the document identifier.
    File,
    /// `#include <header>` or `#include "path"`.
    Include,
    /// `using namespace name;`, nested in the include above it when there is one.
    Namespace,
    /// A function definition with a body.
    Function,
    /// A function prototype or a variable declaration.
    Declaration,
    /// The declared name of a variable.
    Variable,
    /// A `//` comment up to the end of the line.
    Comment,
    /// A reserved word such as `function`, `#include`, `using`.
    Keyword,
    /// A function or namespace name.
    Name,
    /// The initializer of a variable declaration.
    Value,
    /// The target of an include.
    Reference,
    /// A type, or a function's parameter list.
    Type,
    /// Punctuation, or any token the builder has no rule for.
    Text,
    /// A brace-delimited function body.
    Block,
}

impl SyntaxKind {
    /// Returns the display name of the kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Include => "Include",
            Self::Namespace => "Namespace",
            Self::Function => "Function",
            Self::Declaration => "Declaration",
            Self::Variable => "Variable",
            Self::Comment => "Comment",
            Self::Keyword => "Keyword",
            Self::Name => "Name",
            Self::Value => "Value",
            Self::Reference => "Reference",
            Self::Type => "Type",
            Self::Text => "Text",
            Self::Block => "Block",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Index of a node in a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the arena index of the node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub(crate) kind: SyntaxKind,
    pub(crate) value: String,
    pub(crate) span: Span,
    pub(crate) text_range: TextRange,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) is_bad: bool,
    pub(crate) diagnostics: Vec<String>,
}

impl SyntaxNode {
    /// The kind of the node.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// The reconstructed textual content of the node.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The line/column span of the node.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// The byte range of the source the node covers.
    #[must_use]
    pub fn text_range(&self) -> TextRange {
        self.text_range
    }

    /// The parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in source order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns true if the node violates a syntactic rule.
    #[must_use]
    pub fn is_bad(&self) -> bool {
        self.is_bad
    }

    /// Messages explaining why the node is bad.
    #[must_use]
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }
}

/// A built syntax tree for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    pub(crate) fn from_nodes(nodes: Vec<SyntaxNode>) -> Self {
        debug_assert!(!nodes.is_empty(), "a tree always has a root");
        Self { nodes }
    }

    /// The File root.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to another tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    /// Number of nodes in the tree, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the root has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node(self.root()).children.is_empty()
    }

    /// Iterates the ids of all nodes in depth-first pre-order.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// Iterates the ancestors of `id`, starting with its parent.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).parent, |&parent| self.node(parent).parent)
    }

    /// Re-slices the exact source text covered by `id`.
    ///
    /// Node values are reconstructed from tokens; this returns the original
    /// characters instead. Returns `None` if `source` is not the text the
    /// tree was built from.
    #[must_use]
    pub fn source_text<'a>(&self, id: NodeId, source: &'a str) -> Option<&'a str> {
        let range = self.node(id).text_range;
        source.get(usize::from(range.start())..usize::from(range.end()))
    }
}

/// Pre-order traversal over a [`SyntaxTree`].
pub struct Preorder<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.node(id).children.iter().rev().copied());
        Some(id)
    }
}
