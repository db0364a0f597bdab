use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Rendered in place of a contact when none was discovered.
pub const NOT_FOUND: &str = "Not Found";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").unwrap());

// Retina asset names such as logo@2x.png match the address grammar.
const ASSET_SUFFIXES: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// Find candidate contact addresses in text.
///
/// Scan order is preserved; duplicates (case-insensitive) keep their first
/// occurrence. Never fails.
pub fn extract_emails(text: &str) -> Vec<String> {
    let mut emails = Vec::new();
    merge_into(&mut emails, text);
    emails
}

/// Append addresses found in `text` that are not already present in `emails`
pub fn merge_into(emails: &mut Vec<String>, text: &str) {
    let mut seen: HashSet<String> = emails.iter().map(|e| e.to_lowercase()).collect();

    for found in EMAIL_RE.find_iter(text) {
        let email = found.as_str().trim_end_matches('.');
        if is_asset_name(email) {
            continue;
        }
        if seen.insert(email.to_lowercase()) {
            emails.push(email.to_string());
        }
    }
}

/// First discovered address, if any
pub fn primary_contact(emails: &[String]) -> Option<String> {
    emails.first().cloned()
}

fn is_asset_name(email: &str) -> bool {
    email
        .rsplit('.')
        .next()
        .map(|tld| ASSET_SUFFIXES.iter().any(|s| tld.eq_ignore_ascii_case(s)))
        .unwrap_or(false)
}
