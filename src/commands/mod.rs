//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod collection;
pub mod init;
pub mod sanitize;
pub mod session;
pub mod validate;
pub mod visit;

pub use collection::{execute_collection, CollectionOp, CollectionOptions};
pub use init::{execute_init, InitOptions};
pub use sanitize::{execute_sanitize, sanitized_address, SanitizeOptions};
pub use session::{code_status, execute_session, CodeStatus, SessionSubcommand};
pub use validate::{execute_validate, ValidateOptions};
pub use visit::{execute_visit, visit, VisitOptions, VisitReport};
