// ABOUTME: Walks a parsed syntax tree in pre-order collecting definitions.
// ABOUTME: Classifies grammar node kinds as functions or classes per language.

use crate::language::Language;
use repogate_core::{SymbolEntry, SymbolKind};
use tree_sitter::{Node, TreeCursor};

/// Collects function and class definitions from one parsed file in
/// pre-order, so an enclosing class is emitted before its methods.
pub struct SymbolVisitor<'a> {
    pub language: Language,
    pub file_path: String,
    source: &'a str,
    pub symbols: Vec<SymbolEntry>,
}

impl<'a> SymbolVisitor<'a> {
    pub fn new(language: Language, file_path: String, source: &'a str) -> Self {
        Self {
            language,
            file_path,
            source,
            symbols: Vec::new(),
        }
    }

    pub fn visit(&mut self, node: Node) {
        let mut cursor = node.walk();
        self.visit_node(&mut cursor);
    }

    fn visit_node(&mut self, cursor: &mut TreeCursor) {
        let node = cursor.node();

        if let Some(symbol) = self.create_symbol(&node) {
            self.symbols.push(symbol);
        }

        if cursor.goto_first_child() {
            loop {
                self.visit_node(cursor);
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
            cursor.goto_parent();
        }
    }

    fn create_symbol(&self, node: &Node) -> Option<SymbolEntry> {
        let kind = classify(self.language, node.kind())?;
        let name = node
            .child_by_field_name("name")?
            .utf8_text(self.source.as_bytes())
            .ok()?;

        Some(SymbolEntry {
            path: self.file_path.clone(),
            kind,
            name: name.to_string(),
            line: node.start_position().row + 1,
        })
    }
}

/// Maps a grammar node kind to the symbol kind it defines, if any.
pub fn classify(language: Language, kind: &str) -> Option<SymbolKind> {
    use Language::*;
    use SymbolKind::{Class, Function};

    match (language, kind) {
        (Python, "function_definition") => Some(Function),
        (Python, "class_definition") => Some(Class),

        (Rust, "function_item" | "function_signature_item") => Some(Function),
        (Rust, "struct_item" | "enum_item" | "trait_item") => Some(Class),

        (
            JavaScript | TypeScript | Tsx,
            "function_declaration" | "generator_function_declaration" | "method_definition",
        ) => Some(Function),
        (JavaScript | TypeScript | Tsx, "class_declaration") => Some(Class),
        (TypeScript | Tsx, "abstract_class_declaration" | "interface_declaration") => Some(Class),

        (Go, "function_declaration" | "method_declaration") => Some(Function),
        (Go, "type_spec") => Some(Class),

        (Java, "method_declaration" | "constructor_declaration") => Some(Function),
        (Java, "class_declaration" | "interface_declaration" | "enum_declaration") => Some(Class),

        (Ruby, "method" | "singleton_method") => Some(Function),
        (Ruby, "class" | "module") => Some(Class),

        (CSharp, "method_declaration" | "constructor_declaration") => Some(Function),
        (CSharp, "class_declaration" | "interface_declaration" | "struct_declaration") => {
            Some(Class)
        }

        _ => None,
    }
}
