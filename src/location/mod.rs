//! @acp:module "Location Port"
//! @acp:summary "Address-bar abstraction: current URL and history replacement"
//! @acp:domain routing
//! @acp:layer service

pub mod sanitize;

pub use sanitize::{sanitize, strip_params};

use std::cell::{Cell, RefCell};

use url::Url;

use crate::error::Result;

/// @acp:summary "Location port - the visible address of the current page"
pub trait Location {
    /// The current address, or `None` while it is not yet readable
    /// (server-rendered markup before the client has taken over).
    fn current(&self) -> Option<Url>;

    /// Swap the current history entry for `url` without reloading and
    /// without adding an entry.
    fn replace(&self, url: &Url);
}

impl<T: Location + ?Sized> Location for &T {
    fn current(&self) -> Option<Url> {
        (**self).current()
    }

    fn replace(&self, url: &Url) {
        (**self).replace(url)
    }
}

/// Read the first value of query parameter `name`
pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// @acp:summary "In-memory location with an observable history stack"
#[derive(Debug, Default)]
pub struct MemoryLocation {
    entries: RefCell<Vec<Url>>,
    ready: Cell<bool>,
    replacements: Cell<usize>,
}

impl MemoryLocation {
    /// Location already showing `url`
    pub fn new(url: Url) -> Self {
        Self {
            entries: RefCell::new(vec![url]),
            ready: Cell::new(true),
            replacements: Cell::new(0),
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(raw)?))
    }

    /// Location whose address is not readable yet
    pub fn pending(url: Url) -> Self {
        let location = Self::new(url);
        location.ready.set(false);
        location
    }

    /// The client has taken over; the address becomes readable
    pub fn mark_ready(&self) {
        self.ready.set(true);
    }

    /// Navigate to `url`, adding a history entry
    pub fn push(&self, url: Url) {
        self.entries.borrow_mut().push(url);
    }

    /// Number of history entries
    pub fn history_len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Number of in-place replacements performed
    pub fn replace_count(&self) -> usize {
        self.replacements.get()
    }

    /// Address regardless of readiness
    pub fn href(&self) -> Option<String> {
        self.entries.borrow().last().map(|u| u.to_string())
    }
}

impl Location for MemoryLocation {
    fn current(&self) -> Option<Url> {
        if !self.ready.get() {
            return None;
        }
        self.entries.borrow().last().cloned()
    }

    fn replace(&self, url: &Url) {
        let mut entries = self.entries.borrow_mut();
        match entries.last_mut() {
            Some(last) => *last = url.clone(),
            None => entries.push(url.clone()),
        }
        self.replacements.set(self.replacements.get() + 1);
    }
}
