//! Render scheduler implementation
//!
//! Single-threaded by design: all rendering happens on the UI thread, so the
//! scheduler is a plain struct driven by `&mut self` rather than a
//! lock-guarded queue.

/// A request to redraw the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    /// Page to draw, 1-based
    pub page: u32,

    /// Zoom scale to draw at
    pub zoom: f32,
}

/// Scheduler counters, useful for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Requests submitted
    pub requested: u64,

    /// Requests replaced by a newer one before starting
    pub coalesced: u64,

    /// Renders handed out via `try_begin`
    pub started: u64,

    /// Renders reported done via `finish`
    pub completed: u64,
}

/// Coalescing scheduler for a single drawing surface.
///
/// Invariants:
/// - at most one render in flight,
/// - at most one request pending; a newer request replaces an older
///   pending one (latest wins),
/// - a request arriving during an in-flight render is retried after
///   `finish`, never dropped.
#[derive(Debug, Default)]
pub struct RenderScheduler {
    pending: Option<RenderRequest>,
    in_flight: bool,
    stats: SchedulerStats,
}

impl RenderScheduler {
    /// Create an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a render request, replacing any pending one.
    pub fn request(&mut self, request: RenderRequest) {
        self.stats.requested += 1;
        if self.pending.replace(request).is_some() {
            self.stats.coalesced += 1;
        }
    }

    /// Take the pending request and mark a render as in flight.
    ///
    /// Returns `None` while a render is already running or nothing is
    /// pending. The caller must pair every `Some` with a `finish` call.
    pub fn try_begin(&mut self) -> Option<RenderRequest> {
        if self.in_flight {
            return None;
        }
        let request = self.pending.take()?;
        self.in_flight = true;
        self.stats.started += 1;
        Some(request)
    }

    /// Mark the in-flight render as done.
    ///
    /// Returns `true` when a newer request arrived while rendering, meaning
    /// the caller should render again to converge on the latest state.
    pub fn finish(&mut self) -> bool {
        self.in_flight = false;
        self.stats.completed += 1;
        self.pending.is_some()
    }

    /// Whether a render is currently in flight.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether a request is waiting to run.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Current counters.
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }
}
