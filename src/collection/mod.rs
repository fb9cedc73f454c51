//! @acp:module "Collections"
//! @acp:summary "Wishlist and cart persistence shared across independently rendered pages"
//! @acp:domain storage
//! @acp:layer service

pub mod record;
pub mod store;

pub use record::{CollectionKind, CollectionRecord};
pub use store::PersistentCollectionStore;
