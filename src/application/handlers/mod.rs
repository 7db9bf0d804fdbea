//! Command handlers.
//!
//! Handlers take the caller's [`SessionContext`](crate::domain::session::SessionContext)
//! explicitly and reach the outside world only through ports.

pub mod dataset;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use dataset::{UploadCommand, UploadHandler};
pub use user::{
    LoginCommand, LoginHandler, LoginResult, LogoutHandler, RegisterCommand, RegisterHandler,
};
