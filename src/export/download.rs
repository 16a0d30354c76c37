use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;

use crate::export::ExportError;
use crate::export::document::{ExportDocument, ExportKind};
use crate::models::design::AccentColor;
use crate::preview::composer::RenderedPreview;

static UNSAFE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\s/\\:*?"<>|]+"#).expect("unsafe character pattern is valid"));
static LEADING_DOTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.+").expect("leading dots pattern is valid"));

/// `"Jane Doe"` becomes `Jane_Doe_Resume`. The stem is always a single path
/// component inside the export directory.
pub fn resume_file_stem(resume_name: &str) -> String {
    let stem = UNSAFE_RUN.replace_all(resume_name, "_");
    format!("{}_Resume", LEADING_DOTS.replace(&stem, "_"))
}

pub fn download_filename(resume_name: &str) -> String {
    format!("{}.html", resume_file_stem(resume_name))
}

/// Writes the preview as a standalone HTML page into `dir` and returns its path.
pub fn export_as_downloadable_html(
    preview: Option<&RenderedPreview>,
    resume_name: &str,
    accent: &AccentColor,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let preview = preview.ok_or(ExportError::Unavailable)?;
    let document = ExportDocument::assemble(&preview.markup, resume_name, accent, ExportKind::Download);

    std::fs::create_dir_all(dir)?;
    let path = dir.join(download_filename(resume_name));

    let mut file = tempfile::Builder::new()
        .prefix(".resume-")
        .suffix(".html")
        .tempfile_in(dir)?;
    file.write_all(document.html().as_bytes())?;
    debug!("wrote {} bytes to {}", document.html().len(), file.path().display());

    // the persisted handle is dropped right away
    file.persist(&path).map_err(|e| ExportError::Io(e.error))?;

    info!("exported resume to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::design::TemplateName;
    use crate::models::resume::ResumeRecord;
    use crate::preview::composer::PreviewComposer;

    #[test]
    fn test_download_filename_collapses_whitespace() {
        assert_eq!(download_filename("Jane Doe"), "Jane_Doe_Resume.html");
        assert_eq!(download_filename("Mary  Ann\tLee"), "Mary_Ann_Lee_Resume.html");
    }

    #[test]
    fn test_download_filename_stays_inside_export_dir() {
        assert_eq!(download_filename("AC/DC Fan"), "AC_DC_Fan_Resume.html");
        assert_eq!(download_filename("../escaped"), "__escaped_Resume.html");
        assert_eq!(download_filename(r#"a\b:c*d?"e"<f>|g"#), "a_b_c_d_e_f_g_Resume.html");
        assert_eq!(resume_file_stem(".hidden"), "_hidden_Resume");
    }

    #[test]
    fn test_export_with_path_like_name_writes_into_dir() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("out");
        let accent = AccentColor::default();
        let preview = PreviewComposer::render(&ResumeRecord::seed(), TemplateName::Classic, &accent);

        let slash = export_as_downloadable_html(Some(&preview), "AC/DC Fan", &accent, &dir).unwrap();
        let dotted = export_as_downloadable_html(Some(&preview), "../escaped", &accent, &dir).unwrap();

        assert_eq!(slash, dir.join("AC_DC_Fan_Resume.html"));
        assert_eq!(dotted, dir.join("__escaped_Resume.html"));
        assert!(!root.path().join("escaped_Resume.html").exists());
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_export_writes_document_and_no_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let accent = AccentColor::default();
        let preview = PreviewComposer::render(&ResumeRecord::seed(), TemplateName::Modern, &accent);

        let path = export_as_downloadable_html(Some(&preview), "Jane Doe", &accent, dir.path()).unwrap();

        assert_eq!(path, dir.path().join("Jane_Doe_Resume.html"));
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("<title>Jane Doe's Resume</title>"));
        assert!(html.contains(&preview.markup));

        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_export_without_preview_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_as_downloadable_html(None, "Jane Doe", &AccentColor::default(), dir.path()).unwrap_err();

        assert!(matches!(err, ExportError::Unavailable));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
