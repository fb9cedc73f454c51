//! Session gate integration tests
//!
//! Page loads through the access gate with in-memory and file-backed ports.

use fggate::access::{AuthState, GrantSource, Rendered, SessionAuthority, TokenValidator};
use fggate::config::{AllowList, SESSION_CODE_KEY};
use fggate::location::MemoryLocation;
use fggate::storage::{FileStorage, MemoryStorage, Storage};
use fggate::RestrictedView;

fn validator(codes: &str) -> TokenValidator {
    TokenValidator::new(AllowList::parse(codes))
}

/// One page load: resolve against `session` and report state + address
fn load_page<S: Storage>(codes: &str, session: S, url: &str) -> (AuthState, String) {
    let location = MemoryLocation::parse(url).unwrap();
    let mut authority = SessionAuthority::new(validator(codes), session, &location);
    let state = authority.resolve();
    (state, location.href().unwrap())
}

// =============================================================================
// Disabled gate
// =============================================================================

mod disabled_gate_tests {
    use super::*;

    #[test]
    fn test_empty_allow_list_always_passes() {
        let urls = [
            "https://fg.example/",
            "https://fg.example/?fg_code=ANYTHING",
            "https://fg.example/?fg_code=",
            "https://fg.example/?fg_code=%ZZ",
        ];
        let stores = [
            MemoryStorage::new(),
            MemoryStorage::with_items([(SESSION_CODE_KEY, "junk")]),
            MemoryStorage::unavailable(),
        ];

        for url in urls {
            for session in &stores {
                let (state, address) = load_page("", session, url);
                assert_eq!(state, AuthState::Disabled, "{url}");
                assert!(state.is_pass());
                // Nothing is consumed when the gate is off
                assert_eq!(address, url::Url::parse(url).unwrap().to_string());
            }
        }
    }

    #[test]
    fn test_disabled_renders_children() {
        let session = MemoryStorage::new();
        let location = MemoryLocation::parse("https://fg.example/").unwrap();
        let mut authority = SessionAuthority::new(validator(""), &session, &location);
        authority.resolve();
        assert_eq!(authority.render("offer page"), Rendered::Content("offer page"));
    }
}

// =============================================================================
// Granting access
// =============================================================================

mod grant_tests {
    use super::*;

    #[test]
    fn test_every_valid_code_grants_and_is_remembered() {
        let codes = "ABC123,STUDENT-2024,x";
        for code in ["ABC123", "STUDENT-2024", "x"] {
            let session = MemoryStorage::new();
            let url = format!("https://fg.example/apply?fg_code={code}");

            let (state, _) = load_page(codes, &session, &url);
            assert_eq!(state, AuthState::Granted);
            assert_eq!(
                session.get_item(SESSION_CODE_KEY).unwrap().as_deref(),
                Some(code)
            );

            let (state, _) = load_page(codes, &session, "https://fg.example/apply");
            assert_eq!(state, AuthState::Granted);
        }
    }

    #[test]
    fn test_invalid_codes_never_grant() {
        let codes = "ABC123";
        for bad in ["WRONG", "abc123", "ABC1234", "ABC12", "", " ABC123"] {
            let session = MemoryStorage::new();
            let url = format!(
                "https://fg.example/?fg_code={}",
                url::form_urlencoded::byte_serialize(bad.as_bytes()).collect::<String>()
            );
            let (state, _) = load_page(codes, &session, &url);
            assert_eq!(state, AuthState::Denied, "url code {bad:?}");
            assert!(session.is_empty());

            let stored = MemoryStorage::with_items([(SESSION_CODE_KEY, bad)]);
            let (state, _) = load_page(codes, &stored, "https://fg.example/");
            assert_eq!(state, AuthState::Denied, "stored code {bad:?}");
        }
    }

    #[test]
    fn test_url_grant_strips_all_gate_params() {
        let session = MemoryStorage::new();
        let location = MemoryLocation::parse(
            "https://fg.example/apply?plan=12m&fg_code=ABC123&fg_sig=deadbeef&fg_ts=1700000000#terms",
        )
        .unwrap();
        let mut authority = SessionAuthority::new(validator("ABC123"), &session, &location);

        assert_eq!(authority.resolve(), AuthState::Granted);
        assert_eq!(authority.grant_source(), Some(GrantSource::Url));
        assert_eq!(
            location.href().as_deref(),
            Some("https://fg.example/apply?plan=12m#terms")
        );
        assert_eq!(location.history_len(), 1);
        assert_eq!(location.replace_count(), 1);
    }

    #[test]
    fn test_signature_and_timestamp_are_not_required() {
        let session = MemoryStorage::new();
        let (state, address) = load_page(
            "ABC123",
            &session,
            "https://fg.example/?fg_code=ABC123&fg_sig=not-a-signature&fg_ts=yesterday",
        );
        assert_eq!(state, AuthState::Granted);
        assert_eq!(address, "https://fg.example/");
    }
}

// =============================================================================
// Render boundary
// =============================================================================

mod render_tests {
    use super::*;

    #[test]
    fn test_nothing_until_address_readable() {
        let session = MemoryStorage::new();
        let location =
            MemoryLocation::pending(url::Url::parse("https://fg.example/?fg_code=WRONG").unwrap());
        let mut authority = SessionAuthority::new(validator("ABC123"), &session, &location);

        authority.resolve();
        assert!(authority.render(()).is_nothing());

        location.mark_ready();
        authority.resolve();
        assert_eq!(authority.render(()), Rendered::Restricted(RestrictedView));
    }
}

// =============================================================================
// End-to-end scenario
// =============================================================================

mod scenario_tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_invitation_link_session_lifecycle() {
        let dir = TempDir::new().unwrap();
        let session = FileStorage::open(dir.path().join("session.json"));
        let codes = "ABC123";

        // Valid link: granted, parameter gone from the address
        let (state, address) = load_page(codes, &session, "https://fg.example/?fg_code=ABC123");
        assert_eq!(state, AuthState::Granted);
        assert!(!address.contains("fg_code"));

        // Wrong code in a fresh session: restricted view
        let fresh = MemoryStorage::new();
        let location = MemoryLocation::parse("https://fg.example/?fg_code=WRONG").unwrap();
        let mut authority = SessionAuthority::new(validator(codes), &fresh, &location);
        assert_eq!(authority.resolve(), AuthState::Denied);
        assert!(authority.render("page").is_restricted());

        // Revisit without parameters: remembered
        let (state, _) = load_page(codes, &session, "https://fg.example/");
        assert_eq!(state, AuthState::Granted);

        // Session ends: denied again
        session.clear().unwrap();
        let (state, _) = load_page(codes, &session, "https://fg.example/");
        assert_eq!(state, AuthState::Denied);
    }

    #[test]
    fn test_link_is_remembered_over_corrupt_session_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        let session = FileStorage::open(&path);

        let (state, _) = load_page("ABC123", &session, "https://fg.example/?fg_code=ABC123");
        assert_eq!(state, AuthState::Granted);

        let (state, _) = load_page("ABC123", &session, "https://fg.example/");
        assert_eq!(state, AuthState::Granted);
    }
}
