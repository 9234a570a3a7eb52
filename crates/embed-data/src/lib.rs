//! Remote collection client.
//!
//! This crate provides:
//! - `ItemRecord` - Polymorphic wire records, tagged by kind, lossless for
//!   unknown kinds
//! - `PageBody` - One normalized page of a collection
//! - `HttpTransport` / `ReqwestTransport` - The HTTP seam
//! - `CollectionClient` - Fetches one page / resolves subscriber status
//! - `CollectionSource` / `SubscriberSource` - Traits the engine consumes

mod client;
mod error;
mod item;
mod response;
mod transport;

pub use client::*;
pub use error::*;
pub use item::*;
pub use response::*;
pub use transport::*;
