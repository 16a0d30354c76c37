use std::sync::LazyLock;

use regex::Regex;

use crate::models::design::AccentColor;
use crate::preview::html::escape;

static TEMPLATE: &str = include_str!("document.html");

pub const FONTS_STYLESHEET: &str = "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&family=Roboto+Slab:wght@400;700&display=swap";

static STYLESHEET_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<link href="([^"]+)" rel="stylesheet">"#).expect("stylesheet link pattern is valid")
});

static DOWNLOAD_STYLE: &str = "        body {
            background-color: #f1f5f9;
            display: flex;
            justify-content: center;
            align-items: flex-start;
            min-height: 100vh;
            padding: 2rem;
        }";

static PRINT_STYLE: &str = "        body {
            -webkit-print-color-adjust: exact;
            print-color-adjust: exact;
            background-color: #ffffff;
        }
        @page {
            size: A4;
            margin: 0;
        }";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Standalone file the user opens in a browser.
    Download,
    /// Document handed to the printer.
    Print,
}

/// A self-contained HTML page wrapping the preview markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    html: String,
}

impl ExportDocument {
    pub fn assemble(markup: &str, resume_name: &str, accent: &AccentColor, kind: ExportKind) -> Self {
        let style = match kind {
            ExportKind::Download => DOWNLOAD_STYLE,
            ExportKind::Print => PRINT_STYLE,
        };

        let html = TEMPLATE
            .replace("<<TITLE>>", &escape(&format!("{}'s Resume", resume_name)))
            .replace("<<FONTS_HREF>>", FONTS_STYLESHEET)
            .replace("<<STYLE>>", style)
            .replace("<<ACCENT>>", accent.as_str())
            .replace("<<MARKUP>>", markup);

        Self { html }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Every `rel="stylesheet"` href in the head.
    pub fn stylesheets(&self) -> Vec<&str> {
        STYLESHEET_LINK
            .captures_iter(&self.html)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }
}
