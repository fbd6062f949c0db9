//! Read-side scans over a checkout: file listing, text search and
//! tree-sitter symbol indexing.

pub mod language;
pub mod search;
pub mod symbols;
pub mod visitor;
pub mod walk;

pub use language::{Language, LanguageRegistry};
pub use search::search;
pub use symbols::{index_symbols, parse_file};
pub use visitor::SymbolVisitor;
pub use walk::{file_tree_index, list_all_files, ROOT_KEY};
