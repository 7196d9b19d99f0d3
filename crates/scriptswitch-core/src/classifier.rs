// URL -> content-settings pattern classification
use regex::Regex;

/// Map a tab URL to the content-settings pattern a toggle should target.
///
/// Rules, in order: the browser's own `chrome:` pages are off limits;
/// `file:` URLs are scoped to the exact file; a dotted-quad host gets an
/// exact-host pattern; anything else with a DNS-looking host gets a
/// subdomain-wildcard pattern. No rule, no pattern.
pub fn classify(url: &str) -> Option<String> {
    let chrome = Regex::new(r"^chrome:").unwrap();
    let file = Regex::new(r"^file:").unwrap();
    // `[A-z]` is wider than ASCII letters: the range also admits '[', '\',
    // ']', '^', '_' and '`'. Existing stored rules were matched against
    // this exact range, so it stays.
    let ip = Regex::new(r"^[A-z]+:///?(\d+.\d+.\d+.\d+)[\s/?#:]").unwrap();
    let dns = Regex::new(r"^[A-z]+:///?([^\s/?#:]+)").unwrap();

    if chrome.is_match(url) {
        return None;
    }
    if file.is_match(url) {
        return Some(url.to_string());
    }
    if let Some(caps) = ip.captures(url) {
        return Some(format!("*://{}/*", &caps[1]));
    }
    if let Some(caps) = dns.captures(url) {
        return Some(format!("*://*.{}/*", &caps[1]));
    }

    None
}
