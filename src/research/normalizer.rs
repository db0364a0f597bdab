// src/research/normalizer.rs
use serde::{Serialize, Deserialize};
use url::Url;

/// Canonical target derived from one input token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTarget {
    pub display_name: String,
    pub target_url: String,
}

impl ResolvedTarget {
    /// Host portion of the target URL, falling back to the raw URL when it does not parse
    pub fn domain(&self) -> String {
        Url::parse(&self.target_url)
            .ok()
            .and_then(|url| url.host_str().map(|host| host.to_string()))
            .unwrap_or_else(|| self.target_url.clone())
    }
}

/// Turn a free-form token (company name, bare domain or URL) into a target.
///
/// Pure string work, no network access. Tokens carrying an explicit
/// `scheme://` are always URLs; otherwise a token with whitespace is a
/// company name, and a token with neither `.` nor whitespace is a bare name
/// whose site is guessed as `https://www.<name>.com`.
pub fn normalize(token: &str) -> ResolvedTarget {
    let token = token.trim();

    if has_scheme(token) {
        return from_url(token.to_string(), token);
    }

    let has_whitespace = token.chars().any(char::is_whitespace);

    if !has_whitespace && !token.contains('.') {
        return ResolvedTarget {
            display_name: non_empty(title_case(token), token),
            target_url: format!("https://www.{}.com", token.to_lowercase()),
        };
    }

    if has_whitespace {
        let collapsed = token.split_whitespace().collect::<Vec<_>>().join(" ");
        let slug: String = collapsed
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '-')
            .collect();

        return ResolvedTarget {
            display_name: non_empty(title_case(&collapsed), token),
            target_url: format!("https://www.{}.com", slug),
        };
    }

    from_url(format!("https://{}", token), token)
}

/// Title-case: first letter of every alphabetic run upper, the rest lower
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_alphabetic = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            result.push(c);
            previous_alphabetic = false;
        }
    }

    result
}

fn has_scheme(token: &str) -> bool {
    match token.find("://") {
        Some(idx) if idx > 0 => token[..idx]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        _ => false,
    }
}

fn from_url(target_url: String, token: &str) -> ResolvedTarget {
    let host = host_of(&target_url);

    let without_www = match host.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("www.") => &host[4..],
        _ => host,
    };

    let label = without_www.split('.').next().unwrap_or_default();

    let display_name = if !label.is_empty() {
        title_case(label)
    } else if !without_www.is_empty() {
        title_case(without_www)
    } else {
        token.to_string()
    };

    ResolvedTarget {
        display_name: non_empty(display_name, token),
        target_url,
    }
}

/// Host segment of a URL string: after the scheme, before path, port or query.
///
/// Sliced from the string rather than taken from `Url::host_str`, which would
/// punycode `café.de` into `xn--caf-dma.de` before the label becomes a name.
fn host_of(url: &str) -> &str {
    let rest = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };
    let rest = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let rest = rest.rsplit('@').next().unwrap_or_default();
    rest.split(':').next().unwrap_or_default()
}

fn non_empty(candidate: String, token: &str) -> String {
    if !candidate.trim().is_empty() {
        candidate
    } else if !token.trim().is_empty() {
        token.trim().to_string()
    } else {
        "Unknown Company".to_string()
    }
}
