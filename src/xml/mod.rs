//! Minimal owned XML tree and path selectors for resource documents.

pub mod element;
pub mod selector;

pub use element::{parse, parse_root, Element};
pub use selector::Selector;
