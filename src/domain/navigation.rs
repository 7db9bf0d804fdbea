//! Menu screens and the two-state navigation machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Every screen the menu can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Home,
    Login,
    Register,
    Upload,
    Dashboard,
    DpmoCalculator,
    ChecklistSheet,
    Pareto,
    Ishikawa,
    Histogram,
    Scatter,
    ControlChart,
    Stratification,
    Logout,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Login => "Log in",
            Screen::Register => "Register",
            Screen::Upload => "Data upload",
            Screen::Dashboard => "Dashboard",
            Screen::DpmoCalculator => "DPMO calculator",
            Screen::ChecklistSheet => "Checklist sheet",
            Screen::Pareto => "Pareto diagram",
            Screen::Ishikawa => "Ishikawa diagram",
            Screen::Histogram => "Histogram",
            Screen::Scatter => "Scatter diagram",
            Screen::ControlChart => "Control charts",
            Screen::Stratification => "Stratification",
            Screen::Logout => "Log out",
        }
    }

    /// Screens that read the uploaded dataset.
    pub fn needs_dataset(&self) -> bool {
        matches!(
            self,
            Screen::Dashboard
                | Screen::Pareto
                | Screen::Histogram
                | Screen::Scatter
                | Screen::ControlChart
                | Screen::Stratification
        )
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

const ANONYMOUS_SCREENS: &[Screen] = &[Screen::Home, Screen::Login, Screen::Register];

const AUTHENTICATED_SCREENS: &[Screen] = &[
    Screen::Home,
    Screen::Upload,
    Screen::Dashboard,
    Screen::DpmoCalculator,
    Screen::ChecklistSheet,
    Screen::Pareto,
    Screen::Ishikawa,
    Screen::Histogram,
    Screen::Scatter,
    Screen::ControlChart,
    Screen::Stratification,
    Screen::Logout,
];

/// Anonymous ↔ Authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuState {
    #[default]
    Anonymous,
    Authenticated,
}

impl MenuState {
    /// Screens offered in this state, in menu order.
    pub fn screens(&self) -> &'static [Screen] {
        match self {
            MenuState::Anonymous => ANONYMOUS_SCREENS,
            MenuState::Authenticated => AUTHENTICATED_SCREENS,
        }
    }

    pub fn offers(&self, screen: Screen) -> bool {
        self.screens().contains(&screen)
    }

    /// Where a request for an unavailable screen is sent.
    pub fn fallback(&self) -> Screen {
        match self {
            MenuState::Anonymous => Screen::Login,
            MenuState::Authenticated => Screen::Home,
        }
    }
}

impl StateMachine for MenuState {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (MenuState::Anonymous, MenuState::Authenticated)
                | (MenuState::Authenticated, MenuState::Anonymous)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            MenuState::Anonymous => vec![MenuState::Authenticated],
            MenuState::Authenticated => vec![MenuState::Anonymous],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_menu_offers_only_public_screens() {
        assert_eq!(
            MenuState::Anonymous.screens(),
            &[Screen::Home, Screen::Login, Screen::Register]
        );
        assert!(!MenuState::Anonymous.offers(Screen::Pareto));
    }

    #[test]
    fn authenticated_menu_lists_tools_in_order() {
        let screens = MenuState::Authenticated.screens();
        assert_eq!(screens.first(), Some(&Screen::Home));
        assert_eq!(screens.last(), Some(&Screen::Logout));
        assert_eq!(screens.len(), 12);
        assert!(!MenuState::Authenticated.offers(Screen::Login));
    }

    #[test]
    fn transitions_alternate_between_states() {
        assert_eq!(
            MenuState::Anonymous.transition_to(MenuState::Authenticated),
            Ok(MenuState::Authenticated)
        );
        assert!(MenuState::Anonymous.transition_to(MenuState::Anonymous).is_err());
        assert!(!MenuState::Authenticated.is_terminal());
    }

    #[test]
    fn fallback_depends_on_state() {
        assert_eq!(MenuState::Anonymous.fallback(), Screen::Login);
        assert_eq!(MenuState::Authenticated.fallback(), Screen::Home);
    }

    #[test]
    fn screen_serializes_snake_case() {
        let json = serde_json::to_string(&Screen::DpmoCalculator).unwrap();
        assert_eq!(json, "\"dpmo_calculator\"");
    }
}
