//! @acp:module "URL Sanitizer"
//! @acp:summary "Strip consumed query parameters from the visible address"
//! @acp:domain routing
//! @acp:layer service
//!
//! Works on the raw query string so the parameters that stay keep their
//! original encoding and order. Only a parameter's name is decoded, to
//! compare it against the names being removed.

use url::form_urlencoded;
use url::Url;

use super::Location;

/// @acp:summary "Return `url` without the named query parameters"
///
/// Path, fragment and every other parameter are kept verbatim. When nothing
/// matches, the result equals the input.
pub fn strip_params(url: &Url, names: &[&str]) -> Url {
    let Some(query) = url.query() else {
        return url.clone();
    };

    let mut removed = false;
    let kept: Vec<&str> = query
        .split('&')
        .filter(|segment| {
            let consumed = param_name(segment)
                .map(|name| names.contains(&name.as_str()))
                .unwrap_or(false);
            removed |= consumed;
            !consumed
        })
        .collect();

    if !removed {
        return url.clone();
    }

    let mut stripped = url.clone();
    let kept: Vec<&str> = kept.into_iter().filter(|s| !s.is_empty()).collect();
    if kept.is_empty() {
        stripped.set_query(None);
    } else {
        stripped.set_query(Some(&kept.join("&")));
    }
    stripped
}

fn param_name(segment: &str) -> Option<String> {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(name, _)| name.into_owned())
}

/// @acp:summary "Remove the named parameters from the live address"
///
/// Replaces the current history entry in place. Returns `true` when the
/// address changed; an address without those parameters is left alone.
pub fn sanitize<L: Location + ?Sized>(location: &L, names: &[&str]) -> bool {
    let Some(current) = location.current() else {
        return false;
    };

    let stripped = strip_params(&current, names);
    if stripped == current {
        return false;
    }

    tracing::debug!(from = %current, to = %stripped, "Replacing address");
    location.replace(&stripped);
    true
}
