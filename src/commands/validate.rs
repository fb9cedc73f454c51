//! @acp:module "Validate Command"
//! @acp:summary "Check an access code against the allow-list"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::{bail, Result};
use console::style;

use crate::access::TokenValidator;
use crate::config::AllowList;

/// Options for the validate command
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Candidate access code
    pub code: String,
}

/// Execute the validate command
pub fn execute_validate(options: ValidateOptions, allow_list: AllowList) -> Result<()> {
    let validator = TokenValidator::new(allow_list);

    if !validator.is_enabled() {
        println!(
            "{} No access codes configured: the gate is open",
            style("!").yellow()
        );
        return Ok(());
    }

    if validator.is_valid(&options.code) {
        println!("{} Access code accepted", style("✓").green());
        Ok(())
    } else {
        bail!("Access code rejected")
    }
}
