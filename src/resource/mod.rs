//! Generic hypermedia resource engine.
//!
//! - `resource` — document wrapper, link relations, memoized navigation
//! - `remote` — the trait each concrete resource type implements
//! - `link` — link relation descriptors
//! - `association` — type-erased association cache entries

pub mod association;
pub mod link;
pub mod remote;
pub mod resource;

pub use association::{Association, Associations};
pub use link::Link;
pub use remote::RemoteResource;
pub use resource::{Resource, ResourceKind};
