//! Stale-while-revalidate pagination engine.
//!
//! One [`EmbedSession`] drives one mount point: it reads cached pages for
//! optimistic rendering, fetches fresh pages from the remote service,
//! reconciles the two, and extends the collection page by page as advance
//! signals arrive.
//!
//! This crate provides:
//! - `ViewRecord` / `ViewBuilder` - Presentation-ready item projections
//! - `RenderSink` - The UI insertion/removal seam
//! - `decide` / `ReconcileAction` - Cache-vs-network reconciliation
//! - `PaginationState` - The Idle/Loading/Exhausted state machine
//! - `EmbedSession` - End-to-end wiring for one embed instance

mod controller;
mod reconcile;
mod session;
mod sink;
mod view;

pub use controller::*;
pub use reconcile::*;
pub use session::*;
pub use sink::*;
pub use view::*;
