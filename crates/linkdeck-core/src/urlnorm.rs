//! Duplicate-detection URL normalization.
//!
//! Reduces the many spellings of an address to one canonical form so the
//! collection can refuse duplicates no matter how the URL was typed. The
//! normalized form is a comparison key only and is never shown to the user
//! or dereferenced.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Matches an RFC 3986 scheme prefix (`https:`, `mailto:`, ...).
static SCHEME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

/// Normalize a URL for duplicate comparison.
///
/// # Rules Applied
/// 1. Trim surrounding whitespace; blank input stays blank
/// 2. Assume `https://` when no scheme token is present (a leading `//` is
///    stripped first so protocol-relative URLs work)
/// 3. On a successful http/https parse: keep hostname minus a leading
///    `www.`, the path minus one trailing `/`, then query and fragment
/// 4. Lowercase the result
///
/// Inputs that fail to parse, or parse to a non-web scheme, get a plain
/// textual cleanup instead so comparison still behaves predictably.
///
/// # Examples
///
/// ```
/// use linkdeck_core::urlnorm::normalize;
///
/// assert_eq!(normalize("https://www.GitHub.com/"), "github.com");
/// assert_eq!(normalize("github.com"), "github.com");
/// assert_eq!(normalize("http://github.com/Rust-Lang/"), "github.com/rust-lang");
/// ```
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let candidate = if SCHEME_TOKEN.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed.strip_prefix("//").unwrap_or(trimmed))
    };

    let Ok(parsed) = Url::parse(&candidate) else {
        return fallback_normalize(&candidate);
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return fallback_normalize(&candidate);
    }

    let host = parsed.host_str().unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);

    // The url crate reports a bare authority as path "/"; that carries no
    // information for comparison, so it is dropped along with one trailing
    // slash on longer paths.
    let path = match parsed.path() {
        "/" => "",
        p => p.strip_suffix('/').unwrap_or(p),
    };

    let mut normalized = format!("{host}{path}");
    if let Some(query) = parsed.query() {
        if !query.is_empty() {
            normalized.push('?');
            normalized.push_str(query);
        }
    }
    if let Some(fragment) = parsed.fragment() {
        if !fragment.is_empty() {
            normalized.push('#');
            normalized.push_str(fragment);
        }
    }

    normalized.to_lowercase()
}

/// String-level cleanup for inputs the URL parser refuses.
fn fallback_normalize(candidate: &str) -> String {
    let mut result = candidate.to_lowercase();

    for prefix in ["https://", "http://"] {
        if let Some(rest) = result.strip_prefix(prefix) {
            result = rest.to_string();
            break;
        }
    }
    if let Some(rest) = result.strip_prefix("www.") {
        result = rest.to_string();
    }
    if let Some(rest) = result.strip_suffix('/') {
        result = rest.to_string();
    }

    result
}
