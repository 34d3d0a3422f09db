pub mod default_session;
pub mod session;
pub mod token;

pub use default_session::{authenticate, clear_default_session, default_session, set_default_session};
pub use session::Session;
pub use token::TokenResponse;
