//! Pointer-space editing operations
//!
//! Pointer input arrives in display coordinates (the on-screen rect the
//! surface is shown in), which differ from the surface's native pixel space
//! whenever the surface is displayed scaled. Both editing operations convert
//! through native space first, rounding to the nearest pixel.

use crate::annotation::{Annotation, AnnotationList};

/// Mapping between the surface's native pixel space and its displayed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMap {
    pub native_width: u32,
    pub native_height: u32,
    pub display_width: f32,
    pub display_height: f32,
}

impl PointerMap {
    pub fn new(
        native_width: u32,
        native_height: u32,
        display_width: f32,
        display_height: f32,
    ) -> Self {
        Self {
            native_width,
            native_height,
            display_width,
            display_height,
        }
    }

    /// Convert display coordinates to native pixels, rounded.
    pub fn to_native(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x * self.native_width as f32 / self.display_width).round(),
            (y * self.native_height as f32 / self.display_height).round(),
        )
    }

    /// Convert display coordinates to normalized [0, 1] page fractions.
    pub fn to_relative(&self, x: f32, y: f32) -> (f32, f32) {
        let (nx, ny) = self.to_native(x, y);
        (
            (nx / self.native_width as f32).clamp(0.0, 1.0),
            (ny / self.native_height as f32).clamp(0.0, 1.0),
        )
    }
}

/// Create an annotation at a pointer position and append it to the list.
///
/// The page invariant (1 <= page <= page_count) holds because callers pass
/// the current page, which the view state keeps in range.
pub fn place_at(
    list: &mut AnnotationList,
    map: &PointerMap,
    x: f32,
    y: f32,
    text: &str,
    page: u32,
) -> Annotation {
    let (relative_x, relative_y) = map.to_relative(x, y);
    let annotation = Annotation::new(page, relative_x, relative_y, text);
    list.push(annotation.clone());
    annotation
}

/// Remove the first annotation on `page` within the removal tolerance of the
/// pointer. Returns the removed entry, or `None` when nothing was close
/// enough (a no-op for the caller).
pub fn remove_near(
    list: &mut AnnotationList,
    map: &PointerMap,
    x: f32,
    y: f32,
    page: u32,
) -> Option<Annotation> {
    let (nx, ny) = map.to_native(x, y);
    list.remove_near(nx, ny, page, map.native_width, map.native_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_maps_display_to_native_with_rounding() {
        let map = PointerMap::new(1000, 1000, 500.0, 500.0);
        assert_eq!(map.to_native(100.0, 100.0), (200.0, 200.0));

        // 333.4 display px * 2 = 666.8 native, rounds to 667.
        assert_eq!(map.to_native(333.4, 0.0).0, 667.0);
    }

    #[test]
    fn relative_coordinates_stay_in_unit_range() {
        let map = PointerMap::new(800, 600, 800.0, 600.0);
        let (rx, ry) = map.to_relative(900.0, -10.0);
        assert_eq!(rx, 1.0);
        assert_eq!(ry, 0.0);
    }

    #[test]
    fn place_at_stores_normalized_position() {
        // 1000x1000 native shown at 500x500: click (100, 100) on page 2.
        let map = PointerMap::new(1000, 1000, 500.0, 500.0);
        let mut list = AnnotationList::new();

        let placed = place_at(&mut list, &map, 100.0, 100.0, "Hello", 2);

        assert_eq!(placed, Annotation::new(2, 0.2, 0.2, "Hello"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn place_then_remove_at_same_pointer_position() {
        let map = PointerMap::new(1000, 1000, 500.0, 500.0);
        let mut list = AnnotationList::new();
        place_at(&mut list, &map, 100.0, 100.0, "Hello", 2);

        // Exact same pointer position removes exactly one entry.
        let removed = remove_near(&mut list, &map, 100.0, 100.0, 2);
        assert_eq!(removed.unwrap().text, "Hello");
        assert!(list.is_empty());
    }

    #[test]
    fn remove_is_noop_beyond_tolerance() {
        let map = PointerMap::new(1000, 1000, 1000.0, 1000.0);
        let mut list = AnnotationList::new();
        place_at(&mut list, &map, 200.0, 200.0, "Hello", 1);

        // 10 native px away in x: outside the strict tolerance box.
        assert!(remove_near(&mut list, &map, 210.0, 200.0, 1).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_on_wrong_page_is_noop() {
        let map = PointerMap::new(1000, 1000, 1000.0, 1000.0);
        let mut list = AnnotationList::new();
        place_at(&mut list, &map, 200.0, 200.0, "Hello", 1);

        assert!(remove_near(&mut list, &map, 200.0, 200.0, 2).is_none());
        assert_eq!(list.len(), 1);
    }
}
