//! Pagemark core library
//!
//! Viewer data model and logic: annotations with normalized page positions,
//! pointer-space editing, clamped view state, the RGBA surface, text
//! wrapping/rasterization, the page compositor and the session gate.

pub mod annotation;
pub mod compose;
pub mod editor;
pub mod session;
pub mod surface;
pub mod text;
pub mod view;

pub use annotation::{Annotation, AnnotationList, REMOVE_TOLERANCE_PX};
pub use compose::{compose_page, overlay_annotations, ComposeError};
pub use editor::{place_at, remove_near, PointerMap};
pub use session::{admin_only, AuthStore, RouteDecision, UserInfo, ADMIN_ROLE};
pub use surface::Surface;
pub use text::{
    wrap_text, FixedAdvance, FontError, FontRenderer, TextMeasure, TextRasterizer,
    FONT_SIZE_PX, MAX_LINE_WIDTH_PX,
};
pub use view::{ViewState, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
