//! @acp:module "Sanitize Command"
//! @acp:summary "Print an address with gate parameters removed"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use url::Url;

use crate::config::GATE_PARAMS;
use crate::location::strip_params;

/// Options for the sanitize command
#[derive(Debug, Clone)]
pub struct SanitizeOptions {
    pub url: String,
    /// Parameters to remove; the gate parameters when empty
    pub params: Vec<String>,
}

/// The address from `options` with the requested parameters removed
pub fn sanitized_address(options: &SanitizeOptions) -> Result<Url> {
    let url = Url::parse(&options.url)?;
    let names: Vec<&str> = if options.params.is_empty() {
        GATE_PARAMS.to_vec()
    } else {
        options.params.iter().map(String::as_str).collect()
    };
    Ok(strip_params(&url, &names))
}

/// Execute the sanitize command
pub fn execute_sanitize(options: SanitizeOptions) -> Result<()> {
    println!("{}", sanitized_address(&options)?);
    Ok(())
}
