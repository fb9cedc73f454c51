//! @acp:module "Visit Command"
//! @acp:summary "Simulate one page load through the access gate"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Session storage is the file-backed session area, so consecutive visits
//! behave like page loads within one browsing session until
//! `fggate session clear` ends it.

use anyhow::Result;
use console::style;
use url::Url;

use crate::access::{AuthState, Rendered, SessionAuthority, TokenValidator};
use crate::config::{AllowList, Config};
use crate::location::MemoryLocation;
use crate::storage::FileStorage;

/// Options for the visit command
#[derive(Debug, Clone)]
pub struct VisitOptions {
    /// Address being visited
    pub url: String,
    /// Output as JSON
    pub json: bool,
}

/// Outcome of a simulated page load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitReport {
    pub state: AuthState,
    pub source: Option<String>,
    pub address: String,
    pub rendered: Rendered<String>,
}

/// @acp:summary "Run the gate for `url` against the given session area"
pub fn visit(url: Url, allow_list: AllowList, session: &FileStorage) -> VisitReport {
    let location = MemoryLocation::new(url);
    let mut authority = SessionAuthority::new(TokenValidator::new(allow_list), session, &location);
    let state = authority.resolve();

    VisitReport {
        state,
        source: authority.grant_source().map(|s| s.to_string()),
        address: location.href().unwrap_or_default(),
        rendered: authority.render("protected content".to_string()),
    }
}

/// Execute the visit command
pub fn execute_visit(options: VisitOptions, config: &Config, allow_list: AllowList) -> Result<()> {
    let url = Url::parse(&options.url)?;
    let session = FileStorage::open(config.session_path());
    let report = visit(url, allow_list, &session);

    if options.json {
        let view = match &report.rendered {
            Rendered::Nothing => "nothing",
            Rendered::Restricted(_) => "restricted",
            Rendered::Content(_) => "content",
        };
        let value = serde_json::json!({
            "state": report.state.as_str(),
            "source": report.source,
            "address": report.address,
            "view": view,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let state = match report.state {
        AuthState::Granted => style(report.state.as_str()).green(),
        AuthState::Disabled => style(report.state.as_str()).cyan(),
        _ => style(report.state.as_str()).red(),
    };
    println!("{} State: {}", style("→").cyan(), state);
    if let Some(source) = &report.source {
        println!("  Source: {}", source);
    }
    println!("  Address: {}", report.address);
    println!();

    match &report.rendered {
        Rendered::Nothing => println!("{}", style("(nothing rendered yet)").dim()),
        Rendered::Restricted(view) => println!("{}", view),
        Rendered::Content(children) => println!("{} {}", style("✓").green(), children),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_visits_share_the_session_file() {
        let dir = TempDir::new().unwrap();
        let session = FileStorage::open(dir.path().join("session.json"));
        let codes = AllowList::parse("ABC123");

        let first = visit(
            Url::parse("https://fg.example/offer?fg_code=ABC123&fg_ts=1").unwrap(),
            codes.clone(),
            &session,
        );
        assert_eq!(first.state, AuthState::Granted);
        assert_eq!(first.address, "https://fg.example/offer");

        let second = visit(Url::parse("https://fg.example/cart").unwrap(), codes, &session);
        assert_eq!(second.state, AuthState::Granted);
        assert_eq!(second.source.as_deref(), Some("session"));
        assert!(second.rendered.content().is_some());
    }
}
