//! @acp:module "Session Command"
//! @acp:summary "Inspect or end the simulated browsing session"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use crate::access::TokenValidator;
use crate::config::{AllowList, Config, SESSION_CODE_KEY};
use crate::storage::{FileStorage, Storage};

/// Session subcommands
#[derive(Debug, Clone)]
pub enum SessionSubcommand {
    /// Show the remembered access code
    Show,
    /// End the session, forgetting the access code
    Clear,
}

/// How the current allow-list treats a remembered code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeStatus {
    GateDisabled,
    Accepted,
    /// Remembered, but removed from the allow-list since
    Revoked,
}

impl CodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeStatus::GateDisabled => "gate disabled",
            CodeStatus::Accepted => "accepted",
            CodeStatus::Revoked => "no longer accepted",
        }
    }
}

pub fn code_status(validator: &TokenValidator, code: &str) -> CodeStatus {
    if !validator.is_enabled() {
        CodeStatus::GateDisabled
    } else if validator.is_valid(code) {
        CodeStatus::Accepted
    } else {
        CodeStatus::Revoked
    }
}

/// Execute session subcommands
pub fn execute_session(cmd: SessionSubcommand, config: &Config, allow_list: AllowList) -> Result<()> {
    let session = FileStorage::open(config.session_path());

    match cmd {
        SessionSubcommand::Show => match session.get_item(SESSION_CODE_KEY)? {
            Some(code) => {
                let status = code_status(&TokenValidator::new(allow_list), &code);
                let status = match status {
                    CodeStatus::GateDisabled => style(status.as_str()).cyan(),
                    CodeStatus::Accepted => style(status.as_str()).green(),
                    CodeStatus::Revoked => style(status.as_str()).red(),
                };
                println!("{} Session code: {} ({})", style("→").cyan(), code, status);
            }
            None => println!("{} No access code in this session", style("!").yellow()),
        },

        SessionSubcommand::Clear => {
            session.clear()?;
            println!("{} Session ended", style("✓").green());
        }
    }

    Ok(())
}
