use std::path::Path;
use std::sync::LazyLock;

use eyre::{Result, eyre};
use log::{debug, info};
use regex::Regex;

use crate::utils::cli::JobSource;

static HIDDEN_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|noscript|head)[^>]*>.*?</(script|style|noscript|head)>")
        .expect("hidden block pattern is valid")
});
static BLOCK_BREAKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(br|/p|/div|/li|/h[1-6]|/tr)[^>]*>").expect("block break pattern is valid")
});
static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").expect("space pattern is valid"));
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n+").expect("blank line pattern is valid"));

pub struct JobScraper;

impl JobScraper {
    pub async fn from_url(url: &str) -> Result<String> {
        info!("fetching job description from: {}", url);

        let client = reqwest::Client::new();
        let response = client
            .get(url)
            .header("User-Agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .send()
            .await?
            .error_for_status()?;

        let html = response.text().await?;
        debug!("fetched {} bytes of job posting html", html.len());

        let text = html_to_text(&html);
        info!("successfully extracted job description text");

        Ok(text)
    }

    pub async fn from_file(path: &Path) -> Result<String> {
        info!("reading job description from file: {}", path.display());

        tokio::fs::read_to_string(path).await.map_err(Into::into)
    }
}

pub async fn get_job_description(source: &JobSource) -> Result<String> {
    if let Some(ref url) = source.job_url {
        JobScraper::from_url(url).await
    } else if let Some(ref file) = source.job_file {
        JobScraper::from_file(file).await
    } else if let Some(ref text) = source.job_text {
        Ok(text.clone())
    } else {
        Err(eyre!("no job description provided"))
    }
}

/// Reduces a job posting page to readable text.
pub fn html_to_text(html: &str) -> String {
    let text = HIDDEN_BLOCKS.replace_all(html, "");
    let text = BLOCK_BREAKS.replace_all(&text, "\n");
    let text = TAGS.replace_all(&text, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    let text = SPACES.replace_all(&text, " ");
    let text = BLANK_LINES.replace_all(&text, "\n\n");

    text.lines().map(str::trim).collect::<Vec<_>>().join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_keeps_readable_content() {
        let html = r#"<html><head><title>Job</title><style>p{color:red}</style></head>
            <body><script>track()</script><h1>Senior Rust Engineer</h1>
            <p>Build   fast &amp; safe systems.</p><ul><li>Tokio</li><li>Serde</li></ul></body></html>"#;

        let text = html_to_text(html);

        assert!(text.starts_with("Senior Rust Engineer"));
        assert!(text.contains("Build fast & safe systems."));
        assert!(text.contains("Tokio\nSerde"));
        assert!(!text.contains("track()"));
        assert!(!text.contains("color:red"));
    }

    #[tokio::test]
    async fn test_inline_text_source() {
        let source = JobSource {
            job_file: None,
            job_url: None,
            job_text: Some("Staff engineer, payments".to_string()),
        };
        assert_eq!(get_job_description(&source).await.unwrap(), "Staff engineer, payments");
    }

    #[tokio::test]
    async fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.txt");
        std::fs::write(&path, "Platform engineer").unwrap();

        let source = JobSource {
            job_file: Some(path),
            job_url: None,
            job_text: None,
        };
        assert_eq!(get_job_description(&source).await.unwrap(), "Platform engineer");
    }
}
