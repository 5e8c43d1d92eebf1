//! Pagemark scheduler library
//!
//! Coalescing render scheduler for a single drawing surface.
//!
//! Every trigger that wants the page redrawn (page change, zoom change,
//! annotation edit, document load) funnels through one scheduler. The
//! scheduler holds at most one pending request and allows at most one render
//! in flight; a request arriving while a render is running replaces the
//! pending slot, so the surface always converges to the most recently
//! requested state and bursts collapse into a single redraw.
//!
//! # Example
//!
//! ```
//! use pagemark_scheduler::{RenderRequest, RenderScheduler};
//!
//! let mut scheduler = RenderScheduler::new();
//! scheduler.request(RenderRequest { page: 1, zoom: 1.2 });
//! scheduler.request(RenderRequest { page: 2, zoom: 1.2 });
//!
//! // Bursts coalesce: only the latest request is handed out.
//! let request = scheduler.try_begin().unwrap();
//! assert_eq!(request.page, 2);
//!
//! // ... render ...
//! let retry = scheduler.finish();
//! assert!(!retry);
//! ```

mod scheduler;

pub use scheduler::{RenderRequest, RenderScheduler, SchedulerStats};
