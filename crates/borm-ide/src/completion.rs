//! Code completion for Borm.
//!
//! Completion is context free: every request gets the language keywords and
//! the whole function catalog. Functions from namespaces the document
//! imports with `using namespace` are ranked first.

use borm_syntax::{SyntaxKind, SyntaxTree, PRIMITIVE_TYPES};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::catalog::{Catalog, CatalogFunction};

/// The kind of a completion item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    /// A keyword.
    Keyword,
    /// A primitive type.
    Type,
    /// A catalog function.
    Function,
    /// A directive template, such as `#include`.
    Snippet,
}

/// A completion item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    /// The label shown in the completion list.
    pub label: SmolStr,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Additional detail (e.g., the function signature).
    pub detail: Option<SmolStr>,
    /// Documentation.
    pub documentation: Option<String>,
    /// Text to insert (if different from label).
    pub insert_text: Option<SmolStr>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Creates a new completion item.
    pub fn new(label: impl Into<SmolStr>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            insert_text: None,
            sort_priority: 100,
        }
    }

    /// Sets the detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<SmolStr>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the documentation.
    #[must_use]
    pub fn with_documentation(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Sets the insert text.
    #[must_use]
    pub fn with_insert_text(mut self, text: impl Into<SmolStr>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    /// Sets the sort priority.
    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }
}

const IMPORTED_PRIORITY: u32 = 10;
const KEYWORD_PRIORITY: u32 = 50;
const FUNCTION_PRIORITY: u32 = 90;

/// Computes completion items for a document.
pub fn complete(tree: &SyntaxTree, catalog: &Catalog) -> Vec<CompletionItem> {
    let imported = imported_namespaces(tree);
    let mut items = keyword_items();
    items.extend(catalog.iter().map(|function| {
        let priority = if imported.contains(function.namespace.as_str()) {
            IMPORTED_PRIORITY
        } else {
            FUNCTION_PRIORITY
        };
        function_item(function).with_priority(priority)
    }));
    items.sort_by_key(|item| item.sort_priority);
    items
}

fn keyword_items() -> Vec<CompletionItem> {
    let mut items: Vec<_> = PRIMITIVE_TYPES
        .iter()
        .chain(&["void"])
        .map(|ty| CompletionItem::new(*ty, CompletionKind::Type))
        .collect();
    items.push(CompletionItem::new("function", CompletionKind::Keyword));
    items.push(
        CompletionItem::new("#include", CompletionKind::Snippet)
            .with_detail("#include <header.h>")
            .with_insert_text("#include <>"),
    );
    items.push(
        CompletionItem::new("using namespace", CompletionKind::Snippet)
            .with_detail("using namespace name;")
            .with_insert_text("using namespace ;"),
    );
    items
        .into_iter()
        .map(|item| item.with_priority(KEYWORD_PRIORITY))
        .collect()
}

fn function_item(function: &CatalogFunction) -> CompletionItem {
    let item = CompletionItem::new(function.name.clone(), CompletionKind::Function)
        .with_detail(function.definition());
    if function.description.is_empty() {
        item
    } else {
        item.with_documentation(function.description.clone())
    }
}

fn imported_namespaces(tree: &SyntaxTree) -> FxHashSet<&str> {
    tree.preorder()
        .map(|id| tree.node(id))
        .filter(|node| node.kind() == SyntaxKind::Namespace && !node.value().is_empty())
        .map(|node| node.value())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use borm_syntax::parse;

    const CATALOG: &str = "\
io,std::io,int,deviceOpen,string name,Opens a device.
,,void,deviceClose,int handle,
math,std::math,double,sqrt,double x,Square root.
";

    fn labels(source: &str) -> Vec<SmolStr> {
        let catalog = Catalog::from_csv(CATALOG).unwrap();
        complete(&parse("a.borm", source), &catalog)
            .into_iter()
            .map(|item| item.label)
            .collect()
    }

    #[test]
    fn offers_keywords_then_functions() {
        let labels = labels("");
        assert_eq!(
            labels,
            vec![
                "int",
                "double",
                "float",
                "char",
                "bool",
                "string",
                "void",
                "function",
                "#include",
                "using namespace",
                "deviceOpen",
                "deviceClose",
                "sqrt",
            ]
        );
    }

    #[test]
    fn imported_namespace_sorts_first() {
        let labels = labels("#include <math.h>\nusing namespace std::math;\n");
        assert_eq!(labels[0], "sqrt");
        assert_eq!(labels.last().map(SmolStr::as_str), Some("deviceClose"));
    }

    #[test]
    fn function_items_carry_signature_and_description() {
        let catalog = Catalog::from_csv(CATALOG).unwrap();
        let items = complete(&parse("a.borm", ""), &catalog);
        let open = items.iter().find(|item| item.label == "deviceOpen").unwrap();
        assert_eq!(open.kind, CompletionKind::Function);
        assert_eq!(open.detail.as_deref(), Some("int deviceOpen(string name)"));
        assert_eq!(open.documentation.as_deref(), Some("Opens a device."));

        let close = items.iter().find(|item| item.label == "deviceClose").unwrap();
        assert_eq!(close.documentation, None);
    }
}
