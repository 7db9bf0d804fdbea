//! Screen router: one render function per [`Screen`], selected from a
//! static table.

use std::sync::Arc;

use crate::application::handlers::{
    LoginHandler, LogoutHandler, RegisterHandler, UploadCommand, UploadHandler,
};
use crate::domain::dataset::CapacityLimits;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::navigation::{MenuState, Screen};
use crate::domain::report::{ExportFormat, Report};
use crate::domain::session::{Download, SessionContext};
use crate::ports::{DatasetParser, PasswordHasher, ReportExporter, UserRepository};

use super::page::{Notice, Page};
use super::request::ScreenRequest;
use super::{account, data, tools};

pub(super) type RenderFn =
    fn(&ScreenRouter, &mut SessionContext, ScreenRequest, &mut Page) -> Result<(), DomainError>;

const ROUTES: [(Screen, RenderFn); 14] = [
    (Screen::Home, account::home),
    (Screen::Login, account::login),
    (Screen::Register, account::register),
    (Screen::Upload, data::upload),
    (Screen::Dashboard, data::dashboard),
    (Screen::DpmoCalculator, tools::dpmo),
    (Screen::ChecklistSheet, tools::checklist),
    (Screen::Pareto, tools::pareto),
    (Screen::Ishikawa, tools::ishikawa),
    (Screen::Histogram, tools::histogram),
    (Screen::Scatter, tools::scatter),
    (Screen::ControlChart, tools::control_chart),
    (Screen::Stratification, tools::stratification),
    (Screen::Logout, account::logout),
];

fn route(screen: Screen) -> Option<RenderFn> {
    ROUTES
        .iter()
        .find(|(s, _)| *s == screen)
        .map(|(_, render)| *render)
}

/// Error for a request routed to the wrong render function.
pub(super) fn mismatch(screen: Screen) -> DomainError {
    DomainError::new(
        ErrorCode::InternalError,
        format!("Request was not for the {} screen", screen.title()),
    )
}

pub struct ScreenRouter {
    pub(super) login: LoginHandler,
    pub(super) register: RegisterHandler,
    pub(super) logout: LogoutHandler,
    uploads: UploadHandler,
    exporters: Vec<Arc<dyn ReportExporter>>,
    pub(super) limits: CapacityLimits,
    pub(super) preview_rows: usize,
}

impl ScreenRouter {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        parsers: Vec<Arc<dyn DatasetParser>>,
        exporters: Vec<Arc<dyn ReportExporter>>,
        limits: CapacityLimits,
        preview_rows: usize,
    ) -> Self {
        Self {
            login: LoginHandler::new(users.clone(), hasher.clone()),
            register: RegisterHandler::new(users, hasher),
            logout: LogoutHandler::new(),
            uploads: UploadHandler::new(parsers, limits),
            exporters,
            limits,
            preview_rows,
        }
    }

    /// Renders the requested screen. Never fails: every error ends up as a
    /// notice on the returned page.
    pub fn render(&self, session: &mut SessionContext, request: ScreenRequest) -> Page {
        let screen = request.screen();
        let menu = session.menu();
        if !menu.offers(screen) {
            return self.deny(session, screen, menu);
        }

        let mut page = Page::new(screen);
        match route(screen) {
            Some(render) => {
                if let Err(e) = render(self, session, request, &mut page) {
                    tracing::debug!(screen = ?screen, code = %e.code, "Screen rendered with error");
                    page.fail(&e);
                }
            }
            None => page.fail(&mismatch(screen)),
        }
        tracing::debug!(screen = ?screen, session_id = %session.id(), "Rendered screen");
        page.finish(session)
    }

    /// Accepts an uploaded file and renders the Upload screen.
    pub fn upload(&self, session: &mut SessionContext, cmd: UploadCommand) -> Page {
        let menu = session.menu();
        if !menu.offers(Screen::Upload) {
            return self.deny(session, Screen::Upload, menu);
        }

        let mut page = Page::new(Screen::Upload);
        match self.uploads.handle(session, cmd) {
            Ok(info) => page.success(format!(
                "File loaded: {} rows and {} columns",
                info.rows, info.columns
            )),
            Err(e) => page.fail(&e),
        }
        if let Err(e) = data::upload(self, session, ScreenRequest::view(Screen::Upload), &mut page) {
            page.fail(&e);
        }
        page.finish(session)
    }

    fn deny(&self, session: &mut SessionContext, screen: Screen, menu: MenuState) -> Page {
        let fallback = menu.fallback();
        tracing::debug!(requested = ?screen, fallback = ?fallback, "Screen not offered in current menu");
        let mut page = self.render(session, ScreenRequest::view(fallback));
        let message = match menu {
            MenuState::Anonymous => "Please log in to access this section",
            MenuState::Authenticated => "This section is not available while logged in",
        };
        let denied = DomainError::new(ErrorCode::Forbidden, message);
        page.notices.insert(0, Notice::from(&denied));
        page.redirect = Some(fallback);
        page
    }

    /// Shows `report` and, when asked, renders it for download.
    pub(super) fn present(
        &self,
        session: &mut SessionContext,
        page: &mut Page,
        report: Report,
        stem: &str,
        format: Option<ExportFormat>,
    ) -> Result<(), DomainError> {
        let exported = format
            .map(|format| self.export(&report, format).map(|bytes| (format, bytes)))
            .transpose();
        page.absorb(report);

        if let Some((format, bytes)) = exported? {
            let filename = session.add_download(Download::new(stem, format, bytes));
            tracing::debug!(filename = %filename, "Export ready");
            page.downloads.push(filename);
        }
        Ok(())
    }

    fn export(&self, report: &Report, format: ExportFormat) -> Result<Vec<u8>, DomainError> {
        self.exporters
            .iter()
            .find(|e| e.format() == format)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("No exporter for .{} files", format.extension()),
                )
            })?
            .render(report)
    }
}
