//! Home, login, registration and logout screens.

use crate::application::handlers::{LoginCommand, RegisterCommand};
use crate::domain::foundation::DomainError;
use crate::domain::navigation::Screen;
use crate::domain::session::SessionContext;

use super::page::Page;
use super::request::ScreenRequest;
use super::router::{mismatch, ScreenRouter};

pub(super) fn home(
    _router: &ScreenRouter,
    session: &mut SessionContext,
    _request: ScreenRequest,
    page: &mut Page,
) -> Result<(), DomainError> {
    match session.username() {
        Some(username) => {
            page.text.push(format!("Welcome, {}!", username));
            page.text.push(
                "Upload a dataset, then pick an analysis tool from the menu:".to_string(),
            );
            page.text.extend(
                session
                    .menu()
                    .screens()
                    .iter()
                    .filter(|s| !matches!(s, Screen::Home | Screen::Upload | Screen::Logout))
                    .map(|s| format!("- {}", s.title())),
            );
        }
        None => {
            page.text.push(
                "Lean Six Sigma analysis toolkit. Log in or register to start.".to_string(),
            );
        }
    }
    Ok(())
}

pub(super) fn login(
    router: &ScreenRouter,
    session: &mut SessionContext,
    request: ScreenRequest,
    page: &mut Page,
) -> Result<(), DomainError> {
    let ScreenRequest::Login(input) = request else {
        return Err(mismatch(Screen::Login));
    };
    if input.is_blank() {
        page.text.push("Enter your username and password.".to_string());
        return Ok(());
    }

    let result = router.login.handle(
        session,
        LoginCommand {
            username: input.username,
            password: input.password,
        },
    )?;
    page.success(format!("Welcome back, {}!", result.username));
    page.redirect = Some(Screen::Home);
    Ok(())
}

pub(super) fn register(
    router: &ScreenRouter,
    _session: &mut SessionContext,
    request: ScreenRequest,
    page: &mut Page,
) -> Result<(), DomainError> {
    let ScreenRequest::Register(input) = request else {
        return Err(mismatch(Screen::Register));
    };
    if input.is_blank() {
        page.text.push(
            "Choose a username (4+ letters or digits) and a password with at least 8 characters, one digit and one uppercase letter."
                .to_string(),
        );
        return Ok(());
    }

    router.register.handle(RegisterCommand {
        username: input.username,
        email: input.email,
        password: input.password,
        confirm_password: input.confirm_password,
    })?;
    page.success("Registration successful. You can now log in.");
    page.redirect = Some(Screen::Login);
    Ok(())
}

pub(super) fn logout(
    router: &ScreenRouter,
    session: &mut SessionContext,
    _request: ScreenRequest,
    page: &mut Page,
) -> Result<(), DomainError> {
    router.logout.handle(session)?;
    page.info("You have been logged out.");
    page.redirect = Some(Screen::Home);
    Ok(())
}
