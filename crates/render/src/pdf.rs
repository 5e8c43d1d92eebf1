//! PDF document abstraction layer
//!
//! Wraps PDFium behind a small handle: load a document from bytes or a file,
//! query page count and native page dimensions, render a page into RGBA
//! pixel data at a target size.

use pdfium_render::prelude::*;
use std::path::Path;

/// Errors that can occur while opening or rendering a document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Failed to bind the PDFium library
    #[error("PDFium initialization error: {0}")]
    Initialization(String),

    /// The bytes did not parse as a PDF document
    #[error("PDF load error: {0}")]
    Load(String),

    /// Page index outside the document
    #[error("invalid page index: {0}")]
    InvalidPageIndex(u16),

    /// PDFium failed to rasterize the page
    #[error("PDF render error: {0}")]
    Render(String),
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Native page dimensions in points (1/72 inch)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDimensions {
    pub width: f32,
    pub height: f32,
}

/// PDF document handle
///
/// Owns a loaded PDFium document. Created when a file is loaded or restored
/// from storage, discarded when a new document replaces it.
pub struct PdfDocument {
    /// The loaded PDF document (owns the Pdfium instance internally)
    document: pdfium_render::prelude::PdfDocument<'static>,
}

impl PdfDocument {
    /// Bind the PDFium library.
    ///
    /// Search order:
    /// 1. Executable's directory (for bundled installs)
    /// 2. Current working directory
    /// 3. System library paths
    fn init_pdfium() -> RenderResult<Pdfium> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));

        if let Some(ref dir) = exe_dir {
            if let Ok(bindings) =
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            {
                return Ok(Pdfium::new(bindings));
            }
        }

        Ok(Pdfium::new(
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library())
                .map_err(|e| RenderError::Initialization(e.to_string()))?,
        ))
    }

    /// Load a document from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let pdfium = Box::leak(Box::new(Self::init_pdfium()?));

        let document = pdfium
            .load_pdf_from_file(path.as_ref(), None)
            .map_err(|e| RenderError::Load(e.to_string()))?;

        Ok(Self { document })
    }

    /// Load a document from raw bytes, e.g. bytes restored from storage.
    pub fn from_bytes(data: Vec<u8>) -> RenderResult<Self> {
        let pdfium = Box::leak(Box::new(Self::init_pdfium()?));

        // Leak the data to get a 'static reference for the document's lifetime
        let data_static: &'static [u8] = Box::leak(data.into_boxed_slice());

        let document = pdfium
            .load_pdf_from_byte_slice(data_static, None)
            .map_err(|e| RenderError::Load(e.to_string()))?;

        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u16 {
        self.document.pages().len()
    }

    fn get_page(&self, index: u16) -> RenderResult<PdfPage<'_>> {
        self.document
            .pages()
            .get(index)
            .map_err(|_| RenderError::InvalidPageIndex(index))
    }

    /// Native dimensions of a page (0-based index), in points.
    pub fn page_size(&self, index: u16) -> RenderResult<PageDimensions> {
        let page = self.get_page(index)?;
        Ok(PageDimensions {
            width: page.width().value,
            height: page.height().value,
        })
    }

    /// Render a page (0-based index) to RGBA pixel data, 4 bytes per pixel.
    pub fn render_page_rgba(&self, index: u16, width: u32, height: u32) -> RenderResult<Vec<u8>> {
        let page = self.get_page(index)?;

        let config = PdfRenderConfig::new()
            .set_target_width(width as i32)
            .set_target_height(height as i32);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| RenderError::Render(e.to_string()))?;

        Ok(bitmap.as_rgba_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_error_display() {
        let err = RenderError::InvalidPageIndex(5);
        assert_eq!(err.to_string(), "invalid page index: 5");

        let err = RenderError::Load("file not found".to_string());
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn page_dimensions_are_copy() {
        let dims = PageDimensions {
            width: 612.0,
            height: 792.0,
        };
        let copy = dims;
        assert_eq!(copy, dims);
    }

    #[test]
    fn pdfium_library_name_is_platform_specific() {
        let lib_path = Pdfium::pdfium_platform_library_name_at_path("./");
        let lib_name = lib_path.to_string_lossy();
        assert!(lib_name.to_lowercase().contains("pdfium"));
    }
}
