//! @acp:module "Session Authority"
//! @acp:summary "Per-session access decision reconciled from URL, session storage and allow-list"
//! @acp:domain access
//! @acp:layer service
//!
//! # Session Authority
//!
//! One instance per page load. Resolution order:
//!
//! 1. `fg_code` on the current address, if it passes the validator. The
//!    code is written to session storage and the gate parameters are
//!    stripped from the address as part of the same transition.
//! 2. A code already held in session storage, if it still passes.
//! 3. Otherwise denied.
//!
//! Missing, malformed or rejected codes are not errors; storage failures
//! are logged and read as "nothing stored".

use std::fmt;

use tracing::{debug, info, warn};

use super::boundary::{GateRenderBoundary, Rendered};
use super::validator::TokenValidator;
use crate::config::{CODE_PARAM, GATE_PARAMS, SESSION_CODE_KEY};
use crate::location::{query_param, sanitize, Location};
use crate::storage::Storage;

/// @acp:summary "Authorization state of the current page load"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthState {
    /// No allow-list configured; the gate is open
    Disabled,
    /// Not evaluated yet, or the address is not readable yet
    Unknown,
    Granted,
    Denied,
}

impl AuthState {
    /// Whether protected content may be shown
    pub fn is_pass(&self) -> bool {
        matches!(self, AuthState::Disabled | AuthState::Granted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthState::Disabled => "disabled",
            AuthState::Unknown => "unknown",
            AuthState::Granted => "granted",
            AuthState::Denied => "denied",
        }
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a granted code was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantSource {
    Url,
    Session,
}

impl fmt::Display for GrantSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrantSource::Url => write!(f, "url"),
            GrantSource::Session => write!(f, "session"),
        }
    }
}

/// @acp:summary "Owns the access decision for one browsing session"
#[derive(Debug)]
pub struct SessionAuthority<S, L> {
    validator: TokenValidator,
    session: S,
    location: L,
    state: AuthState,
    source: Option<GrantSource>,
}

impl<S: Storage, L: Location> SessionAuthority<S, L> {
    /// Start a page load. The state is `Disabled` when the validator has
    /// no codes, `Unknown` otherwise.
    pub fn new(validator: TokenValidator, session: S, location: L) -> Self {
        let state = if validator.is_enabled() {
            AuthState::Unknown
        } else {
            AuthState::Disabled
        };
        Self {
            validator,
            session,
            location,
            state,
            source: None,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn grant_source(&self) -> Option<GrantSource> {
        self.source
    }

    pub fn is_authorized(&self) -> bool {
        self.state.is_pass()
    }

    /// @acp:summary "Evaluate the page's access"
    ///
    /// Only an `Unknown` state is evaluated; every other state is returned
    /// as is. While the address is unreadable the state stays `Unknown` and
    /// a later call picks up where this one left off.
    pub fn resolve(&mut self) -> AuthState {
        if self.state != AuthState::Unknown {
            return self.state;
        }

        let Some(url) = self.location.current() else {
            debug!("Address not readable yet, access decision deferred");
            return self.state;
        };

        if let Some(code) = query_param(&url, CODE_PARAM) {
            if self.validator.is_valid(&code) {
                self.remember(&code);
                sanitize(&self.location, &GATE_PARAMS);
                return self.grant(GrantSource::Url);
            }
            debug!("Access code on address rejected");
        }

        match self.session.get_item(SESSION_CODE_KEY) {
            Ok(Some(stored)) if self.validator.is_valid(&stored) => {
                return self.grant(GrantSource::Session);
            }
            Ok(Some(_)) => debug!("Stored access code no longer accepted"),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Session storage unreadable, treating as empty"),
        }

        debug!("No valid access code, denying");
        self.state = AuthState::Denied;
        self.state
    }

    /// @acp:summary "Re-enter the gate after a navigation"
    ///
    /// A denial only holds for one render pass; `Granted` and `Disabled`
    /// carry over.
    pub fn begin_page_load(&mut self) {
        if self.state == AuthState::Denied {
            self.state = AuthState::Unknown;
        }
    }

    /// Project the current state through the render boundary
    pub fn render<T>(&self, children: T) -> Rendered<T> {
        GateRenderBoundary::render(self.state, children)
    }

    fn remember(&self, code: &str) {
        if let Err(e) = self.session.set_item(SESSION_CODE_KEY, code) {
            warn!(error = %e, "Could not store access code; later pages will need the link again");
        }
    }

    fn grant(&mut self, source: GrantSource) -> AuthState {
        info!(%source, "Access granted");
        self.state = AuthState::Granted;
        self.source = Some(source);
        self.state
    }
}
