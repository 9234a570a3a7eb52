//! The render sink seam.
//!
//! The engine never touches the host UI directly; it hands ordered view
//! records, tagged with their originating page, to a [`RenderSink`]. The
//! sink owns insertion and removal (DOM or otherwise) and reports whether
//! its render area still exists, so a fetch resolving after teardown
//! reconciles to a no-op.

use std::sync::Mutex;

use crate::ViewRecord;

/// Lifecycle of the "load more" affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreState {
    /// Initial state, before the first page has landed.
    Fetching,
    /// The first page rendered; more pages may follow.
    LoadingMore,
    /// Pagination is exhausted; the affordance is gone.
    Removed,
}

/// Accepts view records and performs actual UI insertion/removal.
pub trait RenderSink: Send + Sync {
    /// Whether the target render area still exists.
    fn is_attached(&self) -> bool {
        true
    }

    /// Insert `records` in order, tagged with their originating page.
    /// `optimistic` marks a render served from cache ahead of the network.
    fn render_page(&self, page: u32, records: &[ViewRecord], optimistic: bool);

    /// Remove all records previously tagged with `page`.
    fn clear_page(&self, page: u32);

    /// Surface a visible error message.
    fn show_error(&self, message: &str);

    /// Update the load-more affordance.
    fn set_load_more(&self, state: LoadMoreState);

    /// Attach the attribution decoration. Idempotent; the engine calls it
    /// at most once per instance.
    fn attach_attribution(&self);

    /// Show the curator avatar in the embed header.
    fn show_avatar(&self, url: &str);
}

/// One recorded sink operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkOp {
    Render {
        page: u32,
        records: Vec<ViewRecord>,
        optimistic: bool,
    },
    Clear {
        page: u32,
    },
    Error(String),
    LoadMore(LoadMoreState),
    Attribution,
    Avatar(String),
}

/// Sink that records every operation (for development/testing).
#[derive(Debug, Default)]
pub struct RecordingSink {
    ops: Mutex<Vec<SinkOp>>,
    detached: Mutex<bool>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all operations so far.
    pub fn ops(&self) -> Vec<SinkOp> {
        self.ops.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Count operations matching a predicate.
    pub fn count(&self, pred: impl Fn(&SinkOp) -> bool) -> usize {
        self.ops().iter().filter(|op| pred(op)).count()
    }

    /// Simulate teardown of the render area.
    pub fn detach(&self) {
        *self.detached.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }

    fn record(&self, op: SinkOp) {
        self.ops.lock().unwrap_or_else(|e| e.into_inner()).push(op);
    }
}

impl RenderSink for RecordingSink {
    fn is_attached(&self) -> bool {
        !*self.detached.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn render_page(&self, page: u32, records: &[ViewRecord], optimistic: bool) {
        self.record(SinkOp::Render {
            page,
            records: records.to_vec(),
            optimistic,
        });
    }

    fn clear_page(&self, page: u32) {
        self.record(SinkOp::Clear { page });
    }

    fn show_error(&self, message: &str) {
        self.record(SinkOp::Error(message.to_string()));
    }

    fn set_load_more(&self, state: LoadMoreState) {
        self.record(SinkOp::LoadMore(state));
    }

    fn attach_attribution(&self) {
        self.record(SinkOp::Attribution);
    }

    fn show_avatar(&self, url: &str) {
        self.record(SinkOp::Avatar(url.to_string()));
    }
}
