//! Screens - menu-driven pages over one session.
//!
//! The [`ScreenRouter`] checks the session's menu state, dispatches the
//! request to the screen's render function and collects whatever the screen
//! produced into a [`Page`]. Render failures never escape: they become
//! notices on the page so the rest of the session keeps working.

mod account;
mod data;
mod page;
mod request;
mod router;
mod tools;

pub use page::{Notice, Page, Severity};
pub use request::{
    ChecklistInput, ColumnInput, ConversionInput, DashboardInput, DpmoForm, IshikawaInput,
    LoginInput, NewCause, NewSheet, ParetoInput, RegisterInput, ScatterInput, ScreenRequest,
    StratificationInput, UploadInput,
};
pub use router::ScreenRouter;
