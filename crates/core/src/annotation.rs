//! Annotation data model
//!
//! Positions are stored as fractions of the page size, so annotations stay
//! anchored to the same spot across zoom-scale changes. Pixel positions are
//! recomputed against the current surface dimensions at draw time.

use serde::{Deserialize, Serialize};

/// Removal hit-test tolerance, in native surface pixels.
///
/// An annotation counts as "near" a pointer position when both coordinate
/// deltas are under this value (a tolerance box, not a radius).
pub const REMOVE_TOLERANCE_PX: f32 = 10.0;

/// A user-placed text note anchored to a normalized position on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Page the annotation belongs to, 1-based
    pub page: u32,

    /// Horizontal position as a fraction of page width, in [0, 1]
    pub relative_x: f32,

    /// Vertical position as a fraction of page height, in [0, 1]
    pub relative_y: f32,

    /// Free text, word-wrapped at draw time
    pub text: String,
}

impl Annotation {
    /// Create a new annotation.
    pub fn new(page: u32, relative_x: f32, relative_y: f32, text: impl Into<String>) -> Self {
        Self {
            page,
            relative_x,
            relative_y,
            text: text.into(),
        }
    }

    /// Absolute pixel position on a surface of the given size.
    pub fn absolute_position(&self, width: u32, height: u32) -> (f32, f32) {
        (
            self.relative_x * width as f32,
            self.relative_y * height as f32,
        )
    }

    /// Whether the annotation sits within the removal tolerance box of
    /// (x, y), both in native pixels of a surface of the given size.
    pub fn is_near(&self, x: f32, y: f32, width: u32, height: u32) -> bool {
        let (ax, ay) = self.absolute_position(width, height);
        (ax - x).abs() < REMOVE_TOLERANCE_PX && (ay - y).abs() < REMOVE_TOLERANCE_PX
    }
}

/// Insertion-ordered annotation list.
///
/// No uniqueness constraint: two annotations may share a position. Removal
/// scans in insertion order and the first match wins. Serializes as a plain
/// JSON array so stored lists round-trip in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationList {
    items: Vec<Annotation>,
}

impl AnnotationList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing ordered sequence.
    pub fn from_items(items: Vec<Annotation>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Annotation] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an annotation, preserving insertion order.
    pub fn push(&mut self, annotation: Annotation) {
        self.items.push(annotation);
    }

    /// Annotations belonging to `page`, in insertion order.
    pub fn for_page(&self, page: u32) -> impl Iterator<Item = &Annotation> {
        self.items.iter().filter(move |a| a.page == page)
    }

    /// Remove the first annotation on `page` within the tolerance box of
    /// (x, y) in native pixels. Returns the removed entry, if any.
    pub fn remove_near(
        &mut self,
        x: f32,
        y: f32,
        page: u32,
        width: u32,
        height: u32,
    ) -> Option<Annotation> {
        let index = self
            .items
            .iter()
            .position(|a| a.page == page && a.is_near(x, y, width, height))?;
        Some(self.items.remove(index))
    }
}
