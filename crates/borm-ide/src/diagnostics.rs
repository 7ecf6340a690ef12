//! Diagnostics collection for Borm.
//!
//! Every bad node of a tree becomes one diagnostic, in pre-order.

use std::fmt;
use std::str::FromStr;

use borm_syntax::{collect_bad, Span, SyntaxTree};
use thiserror::Error;

/// Diagnostic severity. The discriminants match the protocol's values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// An error.
    #[default]
    Error = 1,
    /// A warning.
    Warning = 2,
    /// An informational message.
    Information = 3,
    /// A hint.
    Hint = 4,
}

/// Returned when a severity name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity `{0}`; expected error, warning, information or hint")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "information" | "info" => Ok(Self::Information),
            "hint" => Ok(Self::Hint),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Information => "information",
            Self::Hint => "hint",
        })
    }
}

/// How syntax diagnostics are reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticSettings {
    /// Value of the `source` field.
    pub source: String,
    /// Severity given to every syntax diagnostic.
    pub severity: Severity,
}

impl Default for DiagnosticSettings {
    fn default() -> Self {
        Self {
            source: "borm-lsp".to_string(),
            severity: Severity::Error,
        }
    }
}

/// A diagnostic attached to a span of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Span of the bad node.
    pub span: Span,
    /// Severity of the problem.
    pub severity: Severity,
    /// Producer of the diagnostic.
    pub source: String,
    /// The node's messages, one per line.
    pub message: String,
}

/// Collects one diagnostic per bad node of `tree`.
pub fn collect_diagnostics(tree: &SyntaxTree, settings: &DiagnosticSettings) -> Vec<Diagnostic> {
    collect_bad(tree)
        .into_iter()
        .map(|id| {
            let node = tree.node(id);
            Diagnostic {
                span: node.span(),
                severity: settings.severity,
                source: settings.source.clone(),
                message: node.diagnostics().join("\n"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use borm_syntax::{parse, Position};

    #[test]
    fn one_diagnostic_per_bad_node() {
        let tree = parse("a.borm", "int function;\n#include <a.h>");
        let diagnostics = collect_diagnostics(&tree, &DiagnosticSettings::default());
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message, "A function must have a name");
        assert_eq!(diagnostics[0].source, "borm-lsp");
        assert_eq!(
            diagnostics[1].span,
            Span::new(Position::new(1, 0), Position::new(1, 14))
        );
        assert!(diagnostics.iter().all(|d| d.severity == Severity::Error));
    }

    #[test]
    fn messages_of_one_node_are_joined() {
        let tree = parse("a.borm", "int function");
        let diagnostics = collect_diagnostics(&tree, &DiagnosticSettings::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "A function must have a name\nFunction declarations must be closed with a semi colon."
        );
    }

    #[test]
    fn settings_control_severity_and_source() {
        let settings = DiagnosticSettings {
            source: "borm".to_string(),
            severity: Severity::Warning,
        };
        let tree = parse("a.borm", "float");
        let diagnostics = collect_diagnostics(&tree, &settings);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(diagnostics[0].source, "borm");
    }

    #[test]
    fn severity_names_parse() {
        assert_eq!("Warning".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("info".parse::<Severity>(), Ok(Severity::Information));
        assert!("fatal".parse::<Severity>().is_err());
        assert_eq!(Severity::Hint as i32, 4);
    }
}
