//! Account command handlers.

mod login;
mod logout;
mod register;

pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use logout::LogoutHandler;
pub use register::{RegisterCommand, RegisterHandler};
