//! Markup helpers shared by the template renderers.

use crate::models::design::AccentColor;
use crate::models::resume::description_lines;

pub const MAIL_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="h-4 w-4" viewBox="0 0 20 20" fill="currentColor"><path d="M2.003 5.884L10 9.882l7.997-3.998A2 2 0 0016 4H4a2 2 0 00-1.997 1.884z"/><path d="M18 8.118l-8 4-8-4V14a2 2 0 002 2h12a2 2 0 002-2V8.118z"/></svg>"#;
pub const PHONE_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="h-4 w-4" viewBox="0 0 20 20" fill="currentColor"><path d="M2 3a1 1 0 011-1h2.153a1 1 0 01.986.836l.74 4.435a1 1 0 01-.54 1.06l-1.548.773a11.037 11.037 0 006.105 6.105l.774-1.548a1 1 0 011.059-.54l4.435.74a1 1 0 01.836.986V17a1 1 0 01-1 1h-2C6.477 18 2 13.523 2 8V5a1 1 0 011-1h.001z"/></svg>"#;
pub const LINK_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="h-4 w-4" viewBox="0 0 20 20" fill="currentColor"><path fill-rule="evenodd" d="M12.586 4.586a2 2 0 112.828 2.828l-3 3a2 2 0 01-2.828 0 1 1 0 00-1.414 1.414 4 4 0 005.656 0l3-3a4 4 0 00-5.656-5.656l-1.5 1.5a1 1 0 101.414 1.414l1.5-1.5zm-5 5a2 2 0 012.828 0 1 1 0 101.414-1.414 4 4 0 00-5.656 0l-3 3a4 4 0 105.656 5.656l-1.5-1.5a1 1 0 10-1.414-1.414l-1.5 1.5a2 2 0 11-2.828-2.828l3-3z" clip-rule="evenodd"/></svg>"#;

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps a template body in the root node. This is the only place the
/// accent color is written; templates reach it through `--accent-color`.
pub fn root(template: &str, class: &str, accent: &AccentColor, body: &str) -> String {
    format!(
        "<div data-template=\"{}\" class=\"{}\" style=\"--accent-color: {}; --accent-color-light: {};\">{}</div>",
        template,
        class,
        accent.as_str(),
        accent.light(),
        body
    )
}

/// Renders description bullets as `<li>` elements.
pub fn bullets(description: &str, li_class: &str) -> String {
    description_lines(description)
        .map(|line| format!("<li class=\"{}\">{}</li>", li_class, escape(line)))
        .collect()
}

/// Turns a bare profile link (`github.com/jane`) into an absolute URL.
pub fn external_href(link: &str) -> String {
    let link = link.trim();
    if link.starts_with("http://") || link.starts_with("https://") {
        escape(link)
    } else {
        format!("https://{}", escape(link))
    }
}

/// An anchor with optional leading icon; empty values render nothing.
pub fn link(href: &str, text: &str, icon: Option<&str>, class: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let external = if href.starts_with("https://") {
        " target=\"_blank\" rel=\"noopener noreferrer\""
    } else {
        ""
    };

    format!(
        "<a href=\"{}\"{} class=\"{}\">{}<span class=\"break-all\">{}</span></a>",
        href,
        external,
        class,
        icon.unwrap_or_default(),
        escape(text)
    )
}

pub fn mailto(email: &str) -> String {
    format!("mailto:{}", escape(email))
}

pub fn tel(phone: &str) -> String {
    format!("tel:{}", escape(phone))
}
