//! Structural view of source files
//!
//! The tag engine only needs a narrow view of a source file: the struct
//! declarations it contains, the ordered fields of each struct, and each
//! field's raw tag. [`StructSource`] captures that view; [`GoFile`] implements
//! it for Go source text.
//!
//! Rendering a document only rewrites the tags that actually changed. All
//! other bytes of the file, comments and formatting included, are kept as
//! they were.

mod error;
mod go;

pub use error::SourceError;
pub use go::GoFile;

use std::ops::Range;

/// Where a field's tag lives in the original text
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TagSlot {
    /// Field built in memory, not tied to any text
    Detached,
    /// Tag literal occupies `literal`; removing it also removes the
    /// whitespace from `trim_from`
    Present { literal: Range<usize>, trim_from: usize },
    /// No tag yet; a new one is inserted at `insert_at`
    Absent { insert_at: usize },
}

/// One field of a struct declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    tag: Option<String>,
    original: Option<String>,
    slot: TagSlot,
}

impl FieldDescriptor {
    /// Create a field that is not backed by source text
    ///
    /// # Examples
    /// ```
    /// use gotag::source::FieldDescriptor;
    ///
    /// let mut field = FieldDescriptor::new("Name", Some(r#"json:"name""#.to_string()));
    /// assert!(!field.is_modified());
    /// field.set_tag(None);
    /// assert!(field.is_modified());
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, tag: Option<String>) -> Self {
        Self::located(name.into(), tag, TagSlot::Detached)
    }

    pub(crate) fn located(name: String, tag: Option<String>, slot: TagSlot) -> Self {
        Self {
            name,
            original: tag.clone(),
            tag,
            slot,
        }
    }

    /// Field identifier; empty for embedded fields
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current raw tag text, without the surrounding quotes
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Replace the tag. `None` removes the tag annotation entirely.
    pub fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
    }

    /// Whether the tag differs from the one that was read
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.tag != self.original
    }

    pub(crate) const fn slot(&self) -> &TagSlot {
        &self.slot
    }
}

/// A named struct type and its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl StructDecl {
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// A parsed document whose struct field tags can be edited
pub trait StructSource {
    /// Struct declarations in source order
    fn structs_mut(&mut self) -> &mut [StructDecl];

    /// Serialize the document, including every tag change
    ///
    /// # Errors
    /// Returns `SourceError` if the document cannot be written back as valid
    /// source text.
    fn render(&self) -> Result<String, SourceError>;
}
