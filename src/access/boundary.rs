//! @acp:module "Gate Render Boundary"
//! @acp:summary "Projects the access state onto what a page may display"
//! @acp:domain access
//! @acp:layer api

use std::fmt;

use super::authority::AuthState;

/// @acp:summary "Fixed dead-end view shown to visitors without access"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RestrictedView;

impl RestrictedView {
    pub const ICON: &'static str = "🔒";
    pub const HEADING: &'static str = "Access restricted";
    pub const MESSAGE: &'static str =
        "This page is only available through a personal invitation link.";

    pub fn icon(&self) -> &'static str {
        Self::ICON
    }

    pub fn heading(&self) -> &'static str {
        Self::HEADING
    }

    pub fn message(&self) -> &'static str {
        Self::MESSAGE
    }
}

impl fmt::Display for RestrictedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::ICON)?;
        writeln!(f, "{}", Self::HEADING)?;
        write!(f, "{}", Self::MESSAGE)
    }
}

/// Output of the render boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<T> {
    /// Decision pending; render nothing rather than guess
    Nothing,
    Restricted(RestrictedView),
    Content(T),
}

impl<T> Rendered<T> {
    pub fn is_nothing(&self) -> bool {
        matches!(self, Rendered::Nothing)
    }

    pub fn is_restricted(&self) -> bool {
        matches!(self, Rendered::Restricted(_))
    }

    pub fn content(self) -> Option<T> {
        match self {
            Rendered::Content(children) => Some(children),
            _ => None,
        }
    }
}

/// @acp:summary "Chooses between nothing, the restricted view and the children"
pub struct GateRenderBoundary;

impl GateRenderBoundary {
    /// Children are passed through untouched on `Granted` and `Disabled`.
    pub fn render<T>(state: AuthState, children: T) -> Rendered<T> {
        match state {
            AuthState::Unknown => Rendered::Nothing,
            AuthState::Denied => Rendered::Restricted(RestrictedView),
            AuthState::Granted | AuthState::Disabled => Rendered::Content(children),
        }
    }
}
