//! @acp:module "Token Validator"
//! @acp:summary "Exact-match access code check against the allow-list"
//! @acp:domain access
//! @acp:layer service

use crate::config::AllowList;

/// @acp:summary "Checks candidate access codes"
#[derive(Debug, Clone, Default)]
pub struct TokenValidator {
    allow_list: AllowList,
}

impl TokenValidator {
    pub fn new(allow_list: AllowList) -> Self {
        Self { allow_list }
    }

    /// Whether the gate is active at all. With no codes configured the gate
    /// is open and [`is_valid`](Self::is_valid) is never consulted.
    pub fn is_enabled(&self) -> bool {
        !self.allow_list.is_empty()
    }

    /// Exact, case-sensitive membership. Empty input is never valid.
    pub fn is_valid(&self, code: &str) -> bool {
        self.allow_list.contains(code)
    }
}
