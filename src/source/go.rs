//! Go source reader/writer
//!
//! Parsing is done with `tree-sitter-go`; only the byte ranges of tags and
//! field types are kept from the syntax tree.
//!
//! Finds top-level `type` declarations whose type is a struct literal, both
//! single (`type User struct { ... }`) and grouped (`type ( ... )`), including
//! generic structs and aliases. Declarations inside function bodies are not
//! considered, and the fields of anonymous structs nested in a field type
//! belong to that field rather than being listed separately.

use std::borrow::Cow;
use std::ops::Range;

use tracing::debug;
use tree_sitter::Node;

use super::error::SourceError;
use super::{FieldDescriptor, StructDecl, StructSource, TagSlot};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// A parsed Go source file
#[derive(Debug, Clone)]
pub struct GoFile {
    text: String,
    structs: Vec<StructDecl>,
}

impl GoFile {
    /// Parse Go source text.
    ///
    /// # Errors
    /// Returns `SourceError` if the text is not syntactically valid Go or does
    /// not start with a `package` clause.
    ///
    /// # Examples
    /// ```
    /// use gotag::source::GoFile;
    ///
    /// let file = GoFile::parse("package model\n\ntype User struct {\n\tName string `json:\"name\"`\n}\n").unwrap();
    /// let user = &file.structs()[0];
    /// assert_eq!(user.name, "User");
    /// assert_eq!(user.fields[0].tag(), Some("json:\"name\""));
    /// ```
    pub fn parse(text: impl Into<String>) -> Result<Self, SourceError> {
        let text = text.into();
        let structs = parse_structs(&text)?;
        Ok(Self { text, structs })
    }

    /// Struct declarations in source order
    #[must_use]
    pub fn structs(&self) -> &[StructDecl] {
        &self.structs
    }

    /// The text the file was parsed from
    #[must_use]
    pub fn original_text(&self) -> &str {
        &self.text
    }
}

impl StructSource for GoFile {
    fn structs_mut(&mut self) -> &mut [StructDecl] {
        &mut self.structs
    }

    fn render(&self) -> Result<String, SourceError> {
        let mut edits: Vec<(Range<usize>, String)> = Vec::new();

        for field in self.structs.iter().flat_map(|s| s.fields.iter()) {
            if !field.is_modified() {
                continue;
            }
            match (field.slot(), field.tag()) {
                (TagSlot::Present { literal, .. }, Some(tag)) => {
                    edits.push((literal.clone(), quote_tag(tag)));
                }
                (TagSlot::Present { literal, trim_from }, None) => {
                    edits.push((*trim_from..literal.end, String::new()));
                }
                (TagSlot::Absent { insert_at }, Some(tag)) => {
                    edits.push((*insert_at..*insert_at, format!(" {}", quote_tag(tag))));
                }
                (TagSlot::Absent { .. }, None) => {}
                (TagSlot::Detached, _) => {
                    return Err(SourceError::DetachedField {
                        field: field.name().to_string(),
                    });
                }
            }
        }

        edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));

        let mut rendered = self.text.clone();
        for (range, replacement) in edits {
            rendered.replace_range(range, &replacement);
        }
        Ok(rendered)
    }
}

/// Write tag text as a Go string literal, preferring a raw string
fn quote_tag(tag: &str) -> String {
    if !tag.contains('`') && !tag.contains('\r') {
        return format!("`{tag}`");
    }

    let mut quoted = String::with_capacity(tag.len() + 2);
    quoted.push('"');
    for c in tag.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Decode the body of an interpreted string literal
fn unquote(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let decoded = match chars.next()? {
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0b}',
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            'x' => char::from_u32(take_digits(&mut chars, 2, 16)?)?,
            'u' => char::from_u32(take_digits(&mut chars, 4, 16)?)?,
            'U' => char::from_u32(take_digits(&mut chars, 8, 16)?)?,
            d @ '0'..='7' => {
                let rest = take_digits(&mut chars, 2, 8)?;
                char::from_u32(d.to_digit(8)? * 64 + rest)?
            }
            _ => return None,
        };
        out.push(decoded);
    }

    Some(out)
}

fn take_digits(chars: &mut std::str::Chars<'_>, count: usize, radix: u32) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        value = value * radix + chars.next()?.to_digit(radix)?;
    }
    Some(value)
}

/// Blank out a leading byte order mark so the grammar accepts the file while
/// every byte offset still matches the original text
fn without_byte_order_mark(text: &str) -> Cow<'_, str> {
    match text.strip_prefix(BYTE_ORDER_MARK) {
        Some(rest) => Cow::Owned(format!(
            "{}{rest}",
            " ".repeat(BYTE_ORDER_MARK.len_utf8())
        )),
        None => Cow::Borrowed(text),
    }
}

fn parse_structs(text: &str) -> Result<Vec<StructDecl>, SourceError> {
    let source = without_byte_order_mark(text);

    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| SourceError::Parser(e.to_string()))?;
    let tree = parser
        .parse(source.as_bytes(), None)
        .ok_or_else(|| SourceError::Parser("parsing was cancelled".to_string()))?;

    let root = tree.root_node();
    if let Some(node) = first_syntax_error(root) {
        let position = node.start_position();
        return Err(SourceError::Syntax {
            line: position.row + 1,
            column: position.column + 1,
        });
    }

    let mut structs = Vec::new();
    let mut package_seen = false;
    let mut cursor = root.walk();
    for node in root.named_children(&mut cursor) {
        match node.kind() {
            "comment" => {}
            "package_clause" => package_seen = true,
            _ if !package_seen => return Err(SourceError::MissingPackageClause),
            "type_declaration" => type_declaration(node, &source, &mut structs)?,
            _ => {}
        }
    }

    if !package_seen {
        return Err(SourceError::MissingPackageClause);
    }
    Ok(structs)
}

/// Outermost error or missing node, in source order
fn first_syntax_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_syntax_error);
    found
}

/// Collect struct types from `type T struct{}`, `type T = struct{}` and
/// grouped `type ( ... )` declarations
fn type_declaration(
    node: Node<'_>,
    source: &str,
    structs: &mut Vec<StructDecl>,
) -> Result<(), SourceError> {
    let mut cursor = node.walk();
    for spec in node.named_children(&mut cursor) {
        if !matches!(spec.kind(), "type_spec" | "type_alias") {
            continue;
        }
        let (Some(name), Some(ty)) = (
            spec.child_by_field_name("name"),
            spec.child_by_field_name("type"),
        ) else {
            continue;
        };
        if ty.kind() != "struct_type" {
            continue;
        }

        let name = text_of(name, source);
        let fields = struct_fields(ty, source)?;
        debug!(name, fields = fields.len(), "found struct declaration");
        structs.push(StructDecl::new(name, fields));
    }
    Ok(())
}

fn struct_fields(struct_type: Node<'_>, source: &str) -> Result<Vec<FieldDescriptor>, SourceError> {
    let mut cursor = struct_type.walk();
    let list = struct_type
        .named_children(&mut cursor)
        .find(|child| child.kind() == "field_declaration_list");
    let Some(list) = list else {
        return Ok(Vec::new());
    };

    let mut fields = Vec::new();
    let mut list_cursor = list.walk();
    for declaration in list.named_children(&mut list_cursor) {
        if declaration.kind() == "field_declaration" {
            fields.push(field(declaration, source)?);
        }
    }
    Ok(fields)
}

/// Embedded fields (`Base`, `*Base`, `pkg.Base`, `Base[T]`) carry no `name`
/// and get an empty identifier
fn field(declaration: Node<'_>, source: &str) -> Result<FieldDescriptor, SourceError> {
    let name = declaration
        .child_by_field_name("name")
        .map(|node| text_of(node, source).to_string())
        .unwrap_or_default();

    let Some(tag_node) = declaration.child_by_field_name("tag") else {
        let insert_at = declaration
            .child_by_field_name("type")
            .map_or(declaration.end_byte(), |ty| ty.end_byte());
        return Ok(FieldDescriptor::located(
            name,
            None,
            TagSlot::Absent { insert_at },
        ));
    };

    let literal = tag_node.byte_range();
    let body = &source[literal.start + 1..literal.end - 1];
    let tag = if tag_node.kind() == "raw_string_literal" {
        body.replace('\r', "")
    } else {
        unquote(body).ok_or(SourceError::InvalidTagLiteral {
            line: tag_node.start_position().row + 1,
        })?
    };
    let trim_from = source[..literal.start].trim_end_matches([' ', '\t']).len();

    Ok(FieldDescriptor::located(
        name,
        Some(tag),
        TagSlot::Present { literal, trim_from },
    ))
}

fn text_of<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}
