//! Pagemark render library
//!
//! PDF open/render pipeline backed by PDFium. The rest of the workspace
//! treats the document as an opaque handle: open bytes, ask for the page
//! count and page dimensions, render a page to RGBA pixels.

pub mod pdf;

pub use pdf::{PageDimensions, PdfDocument, RenderError, RenderResult};
