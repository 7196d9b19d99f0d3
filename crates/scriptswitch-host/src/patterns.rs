// Wildcard matching for the pattern shapes the extension writes
use url::Url;

/// Does `pattern` cover `url`?
///
/// A real content-settings store understands a richer pattern grammar; the
/// simulation only needs the three shapes the classifier emits: a verbatim
/// URL (file scoping), `*://host/*` (exact host, any scheme and path) and
/// `*://*.domain/*` (the domain or any subdomain of it).
pub fn pattern_matches(pattern: &str, url: &str) -> bool {
    if pattern == url {
        return true;
    }

    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };

    if let Some(domain) = pattern
        .strip_prefix("*://*.")
        .and_then(|rest| rest.strip_suffix("/*"))
    {
        return host == domain || host.ends_with(&format!(".{domain}"));
    }

    if let Some(exact) = pattern
        .strip_prefix("*://")
        .and_then(|rest| rest.strip_suffix("/*"))
    {
        return host == exact;
    }

    false
}
