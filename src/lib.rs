//! # Huddle Client Library
//!
//! Walks the Huddle hypermedia API: authenticates an OAuth2 session,
//! fetches XML resource documents, and follows their link relations to
//! related resources on demand.
//!
//! Modules:
//! - `config` — client configuration and its YAML loader
//! - `session` — token exchange, expiry tracking and refresh
//! - `locator` — path templates and URI expansion
//! - `xml` — document tree and path selectors
//! - `resource` — the generic hypermedia resource engine
//! - `resources` — users, workspaces, folders and documents

pub mod config;
pub mod error;
pub mod helpers;
pub mod locator;
pub mod resource;
pub mod resources;
pub mod session;
pub mod utils;
pub mod xml;

#[cfg(test)]
mod tests;

pub use crate::config::settings::Configuration;
pub use crate::error::{Error, Result};
pub use crate::resource::{RemoteResource, Resource};
pub use crate::session::Session;
