//! The library function catalog.
//!
//! The catalog is a comma-separated file with one function per record:
//!
//! ```text
//! group, namespace, return type, name, parameters, description
//! ```
//!
//! Fields may be double-quoted (`""` inside quotes is a literal quote). An
//! empty group or namespace inherits the value of the previous record, so a
//! group only needs to be named on its first line.

use std::fs;
use std::mem;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use thiserror::Error;

const FIELDS: usize = 6;

/// A library function offered by completion and hover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFunction {
    /// Group the function belongs to.
    pub group: SmolStr,
    /// Namespace that provides the function.
    pub namespace: SmolStr,
    /// Return type.
    pub return_type: SmolStr,
    /// Function name.
    pub name: SmolStr,
    /// Parameter list, without parentheses.
    pub params: String,
    /// Free-text description.
    pub description: String,
}

impl CatalogFunction {
    /// Returns the signature, e.g. `int open(string path)`.
    #[must_use]
    pub fn definition(&self) -> String {
        format!("{} {}({})", self.return_type, self.name, self.params)
    }
}

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The file could not be read.
    #[error("failed to read function catalog {}: {source}", .path.display())]
    Io {
        /// Path of the catalog file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// A record does not have exactly six fields.
    #[error("line {line}: expected 6 fields, found {found}")]
    FieldCount {
        /// One-based line the record starts on.
        line: usize,
        /// Number of fields found.
        found: usize,
    },
    /// A quoted field runs to the end of the file.
    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote {
        /// One-based line the record starts on.
        line: usize,
    },
}

/// An immutable list of library functions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    functions: Vec<CatalogFunction>,
    by_name: FxHashMap<SmolStr, usize>,
}

impl Catalog {
    /// Reads and parses the catalog at `path`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv(&contents)
    }

    /// Parses catalog records from `contents`.
    pub fn from_csv(contents: &str) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        let mut group = SmolStr::default();
        let mut namespace = SmolStr::default();

        for record in records(contents)? {
            if record.fields.len() != FIELDS {
                return Err(CatalogError::FieldCount {
                    line: record.line,
                    found: record.fields.len(),
                });
            }
            let mut fields = record.fields.into_iter();
            let mut next = || fields.next().unwrap_or_default();

            let record_group = next();
            if !record_group.is_empty() {
                group = SmolStr::new(record_group);
            }
            let record_namespace = next();
            if !record_namespace.is_empty() {
                namespace = SmolStr::new(record_namespace);
            }
            catalog.push(CatalogFunction {
                group: group.clone(),
                namespace: namespace.clone(),
                return_type: SmolStr::new(next()),
                name: SmolStr::new(next()),
                params: next(),
                description: next(),
            });
        }
        Ok(catalog)
    }

    fn push(&mut self, function: CatalogFunction) {
        // The first record wins when a name repeats.
        self.by_name
            .entry(function.name.clone())
            .or_insert(self.functions.len());
        self.functions.push(function);
    }

    /// Finds a function by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&CatalogFunction> {
        self.by_name.get(name).map(|&idx| &self.functions[idx])
    }

    /// Functions of the given group, in file order.
    pub fn by_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a CatalogFunction> {
        self.functions.iter().filter(move |function| function.group == group)
    }

    /// Functions provided by the given namespace, in file order.
    pub fn by_namespace<'a>(
        &'a self,
        namespace: &'a str,
    ) -> impl Iterator<Item = &'a CatalogFunction> {
        self.functions
            .iter()
            .filter(move |function| function.namespace == namespace)
    }

    /// All functions, in file order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogFunction> {
        self.functions.iter()
    }

    /// Number of functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns true if the catalog has no functions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

struct Record {
    line: usize,
    fields: Vec<String>,
}

/// Splits `contents` into records. Quoted fields may span lines; blank lines
/// are skipped.
fn records(contents: &str) -> Result<Vec<Record>, CatalogError> {
    let mut records = Vec::new();
    let mut chars = contents.chars().peekable();
    let mut line = 1;

    while chars.peek().is_some() {
        let start = line;
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut quoted = false;
        let mut was_quoted = false;

        loop {
            match chars.next() {
                None if quoted => return Err(CatalogError::UnterminatedQuote { line: start }),
                None => {
                    fields.push(finish(&mut field, was_quoted));
                    break;
                }
                Some('"') if quoted => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        quoted = false;
                    }
                }
                Some('"') if field.trim().is_empty() && !was_quoted => {
                    field.clear();
                    quoted = true;
                    was_quoted = true;
                }
                Some(',') if !quoted => {
                    fields.push(finish(&mut field, was_quoted));
                    was_quoted = false;
                }
                Some('\r') if !quoted && chars.peek() == Some(&'\n') => {}
                Some('\n') if !quoted => {
                    line += 1;
                    fields.push(finish(&mut field, was_quoted));
                    break;
                }
                Some(c) => {
                    if c == '\n' {
                        line += 1;
                    }
                    field.push(c);
                }
            }
        }

        let blank = fields.len() == 1 && fields[0].is_empty();
        if !blank {
            records.push(Record {
                line: start,
                fields,
            });
        }
    }
    Ok(records)
}

fn finish(field: &mut String, was_quoted: bool) -> String {
    let field = mem::take(field);
    if was_quoted {
        // Keep quoted content verbatim, dropping only what trails the quote.
        field.trim_end().to_string()
    } else {
        field.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
io, std::io, int, open, string path, Opens a device.
, , void, close, int handle, Closes a device.
math, std::math, double, sqrt, double x, \"Square root, of x.\"
";

    #[test]
    fn parses_records_with_carried_group_and_namespace() {
        let catalog = Catalog::from_csv(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);

        let close = catalog.find("close").unwrap();
        assert_eq!(close.group, "io");
        assert_eq!(close.namespace, "std::io");
        assert_eq!(close.definition(), "void close(int handle)");

        let sqrt = catalog.find("sqrt").unwrap();
        assert_eq!(sqrt.description, "Square root, of x.");
    }

    #[test]
    fn groups_and_namespaces_filter_in_file_order() {
        let catalog = Catalog::from_csv(SAMPLE).unwrap();
        let io: Vec<_> = catalog.by_group("io").map(|f| f.name.as_str()).collect();
        assert_eq!(io, vec!["open", "close"]);
        let math: Vec<_> = catalog
            .by_namespace("std::math")
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(math, vec!["sqrt"]);
    }

    #[test]
    fn skips_blank_lines_and_handles_crlf() {
        let catalog = Catalog::from_csv("\r\na,b,int,f,,x\r\n\r\n,,int,g,,y\r\n").unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("g").unwrap().group, "a");
        assert_eq!(catalog.find("f").unwrap().description, "x");
    }

    #[test]
    fn quoted_fields_keep_commas_quotes_and_newlines() {
        let catalog =
            Catalog::from_csv("g,n,string,fmt,\"string a, int b\",\"Say \"\"hi\"\"\nthen stop\"\n")
                .unwrap();
        let fmt = catalog.find("fmt").unwrap();
        assert_eq!(fmt.params, "string a, int b");
        assert_eq!(fmt.description, "Say \"hi\"\nthen stop");
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = Catalog::from_csv("g,n,int,f,x,y\ng,n,int\n").unwrap_err();
        assert!(matches!(err, CatalogError::FieldCount { line: 2, found: 3 }));
        assert_eq!(err.to_string(), "line 2: expected 6 fields, found 3");
    }

    #[test]
    fn rejects_unterminated_quote() {
        let err = Catalog::from_csv("g,n,int,f,x,\"open\n").unwrap_err();
        assert!(matches!(err, CatalogError::UnterminatedQuote { line: 1 }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Catalog::load(Path::new("/nonexistent/bormfuncs.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn first_record_wins_on_duplicate_names() {
        let catalog = Catalog::from_csv("a,n,int,f,,first\nb,n,int,f,,second\n").unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("f").unwrap().description, "first");
    }
}
