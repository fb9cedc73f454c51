//! @acp:module "Access Gate"
//! @acp:summary "Invitation-link gate: token validation, session authority, render boundary"
//! @acp:domain access
//! @acp:layer service
//!
//! ## Core Components
//!
//! - [`TokenValidator`]: exact-match allow-list check
//! - [`SessionAuthority`]: per-page-load state machine over the URL and
//!   session storage
//! - [`GateRenderBoundary`]: pure projection of the state to display output
//!
//! ## Usage
//!
//! ```rust
//! use fggate::access::{AuthState, SessionAuthority, TokenValidator};
//! use fggate::config::AllowList;
//! use fggate::location::MemoryLocation;
//! use fggate::storage::MemoryStorage;
//!
//! let session = MemoryStorage::new();
//! let location = MemoryLocation::parse("https://fg.example/offer?fg_code=ABC123").unwrap();
//! let validator = TokenValidator::new(AllowList::parse("ABC123"));
//!
//! let mut authority = SessionAuthority::new(validator, &session, &location);
//! assert_eq!(authority.resolve(), AuthState::Granted);
//! assert_eq!(location.href().as_deref(), Some("https://fg.example/offer"));
//! ```

pub mod authority;
pub mod boundary;
pub mod validator;

pub use authority::{AuthState, GrantSource, SessionAuthority};
pub use boundary::{GateRenderBoundary, Rendered, RestrictedView};
pub use validator::TokenValidator;
