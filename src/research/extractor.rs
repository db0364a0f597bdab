//! HTML text extraction
//!
//! Produces the visible text of a page with site chrome removed, plus every
//! contact address the page exposes.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::contacts;

/// Elements whose text never reaches the prompt
const CHROME_ELEMENTS: &[&str] = &["nav", "header", "footer"];

/// Elements whose content is not text at all
const NON_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that break the text flow. Inline markup (b, span, a, em) does not,
/// so `<b>S</b>wiggy` stays one word.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt",
    "figcaption", "figure", "form", "h1", "h2", "h3", "h4", "h5", "h6", "hr",
    "li", "main", "ol", "p", "pre", "section", "table", "td", "th", "title",
    "tr", "ul", "header", "footer", "nav", "option", "button", "label",
];

static MAILTO_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href^='mailto:']").unwrap());

/// Text and contacts pulled from one HTML document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedPage {
    /// Visible content text, whitespace-collapsed and truncated
    pub text: String,
    /// Addresses in discovery order: content text, then site chrome, then mailto links
    pub emails: Vec<String>,
}

/// Extract visible text and contacts from raw HTML
pub fn extract_page(html: &str, max_chars: usize) -> ExtractedPage {
    let document = Html::parse_document(html);

    let mut content = String::new();
    let mut chrome = String::new();
    collect_text(document.root_element(), &mut content, &mut chrome, false);

    let content = clean_text(&content);
    let chrome = clean_text(&chrome);

    let mut emails = contacts::extract_emails(&content);
    contacts::merge_into(&mut emails, &chrome);

    for link in document.select(&MAILTO_SELECTOR) {
        if let Some(href) = link.value().attr("href") {
            if let Some(address) = href.strip_prefix("mailto:") {
                let address = address.split('?').next().unwrap_or_default().trim();
                contacts::merge_into(&mut emails, address);
            }
        }
    }

    ExtractedPage {
        text: truncate_chars(&content, max_chars),
        emails,
    }
}

/// Visible text only, with navigation, header, footer, script and style removed
pub fn visible_text(html: &str, max_chars: usize) -> String {
    extract_page(html, max_chars).text
}

fn collect_text(element: ElementRef, content: &mut String, chrome: &mut String, in_chrome: bool) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let target = if in_chrome { &mut *chrome } else { &mut *content };
            target.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if NON_TEXT_ELEMENTS.contains(&name) {
                continue;
            }
            let block = BLOCK_ELEMENTS.contains(&name);
            if block {
                break_flow(content, chrome);
            }
            let chrome_child = in_chrome || CHROME_ELEMENTS.contains(&name);
            collect_text(child_element, content, chrome, chrome_child);
            if block {
                break_flow(content, chrome);
            }
        }
    }
}

fn break_flow(content: &mut String, chrome: &mut String) {
    content.push(' ');
    chrome.push(' ');
}

/// Normalize whitespace
fn clean_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Bounded prefix of at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}
