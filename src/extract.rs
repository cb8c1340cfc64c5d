use std::path::Path;
use tree_sitter::{Node, Parser};

use crate::error::{Result, ScanError};

/// One class or interface declaration with the annotation names written
/// immediately on it.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: String,
    pub annotations: Vec<String>,
}

/// Structural view of a single source file, consumed once by classification.
#[derive(Debug, Clone)]
pub struct ParsedUnit {
    pub package: Option<String>,
    pub types: Vec<TypeDecl>,
}

/// Parses one file's text far enough to read the package declaration and the
/// annotations attached to every class/interface declaration, at any nesting
/// depth.
///
/// Annotation names are the literal tokens as written (`Entity`,
/// `javax.persistence.Entity`), never resolved against imports. Annotations
/// on fields, methods or parameters are not collected. Enum, record and
/// annotation-type declarations are not visited.
///
/// Any syntax error in the file is a `ParseFailure`; no partial tree is
/// recovered.
pub fn parse_source(path: &Path, source: &str) -> Result<ParsedUnit> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| ScanError::ParseFailure {
            path: path.to_path_buf(),
            message: format!("Failed to load Java grammar: {e}"),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ScanError::ParseFailure {
            path: path.to_path_buf(),
            message: "Parser produced no syntax tree".to_string(),
        })?;
    let root = tree.root_node();

    if root.has_error() {
        return Err(ScanError::ParseFailure {
            path: path.to_path_buf(),
            message: match first_error_line(&root) {
                Some(line) => format!("Source is not valid Java (near line {line})"),
                None => "Source is not valid Java".to_string(),
            },
        });
    }

    let bytes = source.as_bytes();
    let mut package = None;
    let mut types = Vec::new();

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.kind() == "package_declaration" {
            package = extract_package(&child, bytes);
        }
    }
    collect_type_decls(&root, bytes, &mut types);

    Ok(ParsedUnit { package, types })
}

fn extract_package(node: &Node, source: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "scoped_identifier" || child.kind() == "identifier" {
            let text = node_text(&child, source);
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

fn collect_type_decls(node: &Node, source: &[u8], out: &mut Vec<TypeDecl>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if matches!(child.kind(), "class_declaration" | "interface_declaration") {
            out.push(TypeDecl {
                name: declared_name(&child, source),
                annotations: extract_annotations(&child, source),
            });
        }
        collect_type_decls(&child, source, out);
    }
}

fn declared_name(node: &Node, source: &[u8]) -> String {
    node.child_by_field_name("name")
        .map(|n| node_text(&n, source).to_string())
        .unwrap_or_default()
}

fn extract_annotations(node: &Node, source: &[u8]) -> Vec<String> {
    let mut annotations = Vec::new();

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "modifiers" {
            continue;
        }
        let mut inner = child.walk();
        for modifier in child.children(&mut inner) {
            if matches!(modifier.kind(), "annotation" | "marker_annotation")
                && let Some(name) = modifier.child_by_field_name("name")
            {
                annotations.push(node_text(&name, source).to_string());
            }
        }
    }

    annotations
}

fn first_error_line(node: &Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(line) = first_error_line(&child) {
            return Some(line);
        }
    }
    None
}

fn node_text<'a>(node: &Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}
