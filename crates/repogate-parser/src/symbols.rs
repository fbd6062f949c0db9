// ABOUTME: Builds the symbol index, skipping files that fail to read or parse.

use crate::language::LanguageRegistry;
use crate::visitor::SymbolVisitor;
use crate::walk::list_all_files;
use repogate_core::{FileOutcome, SymbolEntry};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Index function and class definitions across every recognised source file.
pub fn index_symbols(root: &Path) -> Vec<SymbolEntry> {
    let registry = LanguageRegistry::new();
    let mut symbols = Vec::new();
    let mut skipped = 0usize;

    for path in list_all_files(root) {
        if registry.detect_language(&path).is_none() {
            continue;
        }
        match parse_file(&registry, root, &path) {
            FileOutcome::Parsed(found) => symbols.extend(found),
            FileOutcome::Skipped(skip) => {
                debug!(path = %skip.path, reason = %skip.reason, "skipping file");
                skipped += 1;
            }
        }
    }

    info!(symbols = symbols.len(), skipped, "symbol index built");
    symbols
}

/// Parse one checkout-relative file and collect its definitions.
pub fn parse_file(
    registry: &LanguageRegistry,
    root: &Path,
    path: &str,
) -> FileOutcome<Vec<SymbolEntry>> {
    let Some(language) = registry.detect_language(path) else {
        return FileOutcome::skipped(path, "unsupported language");
    };
    let source = match fs::read_to_string(root.join(path)) {
        Ok(source) => source,
        Err(e) => return FileOutcome::skipped(path, e),
    };
    let Some(mut parser) = registry.create_parser(&language) else {
        return FileOutcome::skipped(path, "parser unavailable");
    };
    let Some(tree) = parser.parse(&source, None) else {
        return FileOutcome::skipped(path, "no syntax tree produced");
    };
    if tree.root_node().has_error() {
        return FileOutcome::skipped(path, "syntax errors");
    }

    let mut visitor = SymbolVisitor::new(language, path.to_string(), &source);
    visitor.visit(tree.root_node());
    FileOutcome::Parsed(visitor.symbols)
}
