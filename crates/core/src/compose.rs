//! Page composition
//!
//! The page renderer: size the surface to the page's native dimensions times
//! the zoom scale, draw the page content, then overlay every annotation
//! belonging to that page at its absolute pixel position, word-wrapped to
//! the fixed maximum line width. Identical inputs produce identical pixels.

use crate::annotation::AnnotationList;
use crate::surface::Surface;
use crate::text::{wrap_text, TextRasterizer, MAX_LINE_WIDTH_PX};
use pagemark_render::{PdfDocument, RenderError};

/// Errors composing a page into the surface.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    /// Requested page outside [1, page_count]
    #[error("page {0} is out of range")]
    PageOutOfRange(u32),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// PDFium returned a frame of unexpected size
    #[error("rendered frame does not match surface dimensions")]
    FrameMismatch,
}

/// Render `page` (1-based) at `zoom` into `surface` and overlay its
/// annotations.
///
/// Annotations referencing other pages (including pages beyond the current
/// document's count) are left untouched and simply not drawn. When `raster`
/// is `None`, the page is drawn without the annotation overlay.
pub fn compose_page(
    doc: &PdfDocument,
    page: u32,
    zoom: f32,
    annotations: &AnnotationList,
    raster: Option<&dyn TextRasterizer>,
    surface: &mut Surface,
) -> Result<(), ComposeError> {
    if page == 0 || page > doc.page_count() as u32 {
        return Err(ComposeError::PageOutOfRange(page));
    }
    let index = (page - 1) as u16;

    let dims = doc.page_size(index)?;
    let width = (dims.width * zoom).round().max(1.0) as u32;
    let height = (dims.height * zoom).round().max(1.0) as u32;

    surface.resize(width, height);
    let frame = doc.render_page_rgba(index, width, height)?;
    if !surface.copy_from(&frame) {
        return Err(ComposeError::FrameMismatch);
    }

    if let Some(raster) = raster {
        overlay_annotations(surface, annotations, page, raster);
    }
    Ok(())
}

/// Draw every annotation belonging to `page` onto the surface.
///
/// Positions are `relative * surface dims`; text wraps greedily at
/// [`MAX_LINE_WIDTH_PX`]. Pure pixel mutation, no document access.
pub fn overlay_annotations(
    surface: &mut Surface,
    annotations: &AnnotationList,
    page: u32,
    raster: &dyn TextRasterizer,
) {
    let width = surface.width();
    let height = surface.height();
    let line_height = raster.line_height();

    for annotation in annotations.for_page(page) {
        let (x, y) = annotation.absolute_position(width, height);
        for (i, line) in wrap_text(&annotation.text, MAX_LINE_WIDTH_PX, raster)
            .iter()
            .enumerate()
        {
            raster.draw_line(surface, x, y + i as f32 * line_height, line);
        }
    }
}
