#![forbid(unsafe_code)]

//! @acp:module "FG Gate Library"
//! @acp:summary "Invitation-link session gate and persistent wishlist/cart store"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # FG Gate
//!
//! Session access control and client-state persistence shared by every
//! storefront page.
//!
//! ## Features
//!
//! - **Invitation gate**: one-time `fg_code` links authorize a visitor for
//!   the rest of the browsing session
//! - **Clean addresses**: consumed gate parameters are stripped in place
//! - **Fail-open config**: no configured codes means no gate
//! - **Persistent collections**: wishlist and cart survive reloads and
//!   tolerate the two-phase (render, then hydrate) page lifecycle
//! - **Injectable ports**: storage and location are traits, with in-memory
//!   and file-backed implementations
//!
//! ## Example
//!
//! ```rust
//! use fggate::{CollectionKind, MemoryStorage, PersistentCollectionStore};
//!
//! let local = MemoryStorage::new();
//! let mut cart = PersistentCollectionStore::for_kind(CollectionKind::Cart, &local);
//! cart.hydrate();
//! cart.add("sku-1");
//!
//! let mut other_page = PersistentCollectionStore::for_kind(CollectionKind::Cart, &local);
//! other_page.hydrate();
//! assert_eq!(other_page.count(), 1);
//! ```

pub mod access;
pub mod collection;
pub mod commands;
pub mod config;
pub mod error;
pub mod location;
pub mod storage;

// Re-exports
pub use access::{
    AuthState, GateRenderBoundary, GrantSource, Rendered, RestrictedView, SessionAuthority,
    TokenValidator,
};
pub use collection::{CollectionKind, CollectionRecord, PersistentCollectionStore};
pub use config::{AllowList, Config};
pub use error::{GateError, Result, StorageError};
pub use location::{sanitize, strip_params, Location, MemoryLocation};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageScope};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
