pub mod template;
pub mod uri;

pub use template::resource_path_for;
pub use uri::ResourceLocator;
