//! Application layer - Handlers and screens.
//!
//! Handlers run one use case against a session through the ports; screens
//! compose handlers and analysis services into rendered pages.

pub mod handlers;
pub mod screens;

pub use handlers::{
    // Account handlers
    LoginCommand, LoginHandler, LoginResult, LogoutHandler, RegisterCommand, RegisterHandler,
    // Dataset handlers
    UploadCommand, UploadHandler,
};
pub use screens::{Notice, Page, ScreenRequest, ScreenRouter, Severity};
