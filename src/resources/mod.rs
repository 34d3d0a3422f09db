//! Concrete API resources built on the hypermedia engine.

pub mod document;
pub mod folder;
pub mod user;
pub mod workspace;

pub use document::Document;
pub use folder::Folder;
pub use user::User;
pub use workspace::Workspace;
