use std::future::Future;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use backon::{ConstantBuilder, Retryable};
use log::{debug, info, warn};

use crate::export::ExportError;
use crate::export::document::{ExportDocument, ExportKind};
use crate::models::design::AccentColor;
use crate::preview::composer::RenderedPreview;

/// Decides whether a print document has everything it needs to lay out.
pub trait ReadinessProbe {
    fn is_ready(&self, document: &ExportDocument) -> impl Future<Output = bool> + Send;
}

/// Ready once the linked Google Fonts stylesheet answers.
pub struct FontStylesheetProbe {
    client: reqwest::Client,
}

impl FontStylesheetProbe {
    pub fn new() -> Result<Self, ExportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| ExportError::Print(e.to_string()))?;

        Ok(Self { client })
    }
}

impl ReadinessProbe for FontStylesheetProbe {
    async fn is_ready(&self, document: &ExportDocument) -> bool {
        let Some(href) = document
            .stylesheets()
            .into_iter()
            .find(|href| href.contains("fonts.googleapis.com"))
        else {
            return false;
        };

        match self.client.get(href).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                debug!("fonts stylesheet answered {}", response.status());
                false
            }
            Err(e) => {
                debug!("fonts stylesheet unreachable: {}", e);
                false
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub interval: Duration,
    /// Total probe calls, the first one included.
    pub max_attempts: NonZeroUsize,
}

pub const DEFAULT_MAX_ATTEMPTS: NonZeroUsize = NonZeroUsize::new(50).unwrap();

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Turns a finished print document into something on disk.
pub trait Printer {
    fn print(&self, document: &ExportDocument, output: &Path) -> impl Future<Output = Result<(), ExportError>> + Send;
}

/// Runs a command template such as
/// `chromium --headless --print-to-pdf={output} {input}`.
pub struct CommandPrinter {
    command: String,
}

impl CommandPrinter {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Placeholders are substituted per argument so paths with spaces survive.
    fn argv(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();

        self.command
            .split_whitespace()
            .map(|arg| arg.replace("{input}", &input).replace("{output}", &output))
            .collect()
    }
}

impl Printer for CommandPrinter {
    async fn print(&self, document: &ExportDocument, output: &Path) -> Result<(), ExportError> {
        let mut input = tempfile::Builder::new()
            .prefix("resume-print-")
            .suffix(".html")
            .tempfile()?;
        input.write_all(document.html().as_bytes())?;
        input.flush()?;

        let argv = self.argv(input.path(), output);
        let Some((program, args)) = argv.split_first() else {
            return Err(ExportError::Print("no print command configured".to_string()));
        };

        info!("running print command: {}", program);
        let result = tokio::process::Command::new(program).args(args).output().await?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            return Err(ExportError::Print(format!("{} exited with {}: {}", program, result.status, stderr)));
        }

        Ok(())
    }
}

/// A print document whose print action stays disabled until it is ready.
#[derive(Debug)]
pub struct PrintPreview {
    document: ExportDocument,
    ready: bool,
}

impl PrintPreview {
    pub fn document(&self) -> &ExportDocument {
        &self.document
    }

    pub fn can_print(&self) -> bool {
        self.ready
    }

    pub async fn wait_until_ready<P: ReadinessProbe>(
        &mut self,
        probe: &P,
        policy: &ReadinessPolicy,
    ) -> Result<(), ExportError> {
        let document = &self.document;
        let check = move || async move {
            if probe.is_ready(document).await {
                Ok(())
            } else {
                Err(ExportError::Unavailable)
            }
        };

        let outcome = check
            .retry(
                ConstantBuilder::default()
                    .with_delay(policy.interval)
                    .with_max_times(policy.max_attempts.get() - 1),
            )
            .notify(|_, delay| debug!("print document not ready, checking again in {:?}", delay))
            .await;

        match outcome {
            Ok(()) => {
                self.ready = true;
                Ok(())
            }
            Err(err) => {
                warn!("print document never became ready after {} checks", policy.max_attempts);
                Err(err)
            }
        }
    }

    pub async fn print<R: Printer>(&self, printer: &R, output: &Path) -> Result<PathBuf, ExportError> {
        if !self.can_print() {
            return Err(ExportError::Unavailable);
        }

        printer.print(&self.document, output).await?;
        info!("printed resume to {}", output.display());

        Ok(output.to_path_buf())
    }
}

pub fn export_as_print_preview(
    preview: Option<&RenderedPreview>,
    resume_name: &str,
    accent: &AccentColor,
) -> Result<PrintPreview, ExportError> {
    let preview = preview.ok_or(ExportError::Unavailable)?;

    Ok(PrintPreview {
        document: ExportDocument::assemble(&preview.markup, resume_name, accent, ExportKind::Print),
        ready: false,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::models::design::TemplateName;
    use crate::models::resume::ResumeRecord;
    use crate::preview::composer::PreviewComposer;

    struct CountingProbe {
        ready_after: usize,
        calls: AtomicUsize,
    }

    impl CountingProbe {
        fn new(ready_after: usize) -> Self {
            Self {
                ready_after,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ReadinessProbe for CountingProbe {
        async fn is_ready(&self, _document: &ExportDocument) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst) + 1 >= self.ready_after
        }
    }

    #[derive(Default)]
    struct RecordingPrinter {
        printed: Mutex<Vec<PathBuf>>,
    }

    impl Printer for RecordingPrinter {
        async fn print(&self, _document: &ExportDocument, output: &Path) -> Result<(), ExportError> {
            self.printed.lock().unwrap().push(output.to_path_buf());
            Ok(())
        }
    }

    fn print_preview() -> PrintPreview {
        let accent = AccentColor::default();
        let preview = PreviewComposer::render(&ResumeRecord::seed(), TemplateName::Classic, &accent);
        export_as_print_preview(Some(&preview), "Olivia Chen", &accent).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_exhaustion_is_unavailable() {
        let mut preview = print_preview();
        let probe = CountingProbe::new(usize::MAX);

        let err = preview
            .wait_until_ready(&probe, &ReadinessPolicy::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Unavailable));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 50);
        assert!(!preview.can_print());
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_succeeds_once_probe_reports_ready() {
        let mut preview = print_preview();
        let probe = CountingProbe::new(3);

        preview
            .wait_until_ready(&probe, &ReadinessPolicy::default())
            .await
            .unwrap();

        assert_eq!(probe.calls.load(Ordering::SeqCst), 3);
        assert!(preview.can_print());
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_policy_probes_once() {
        let mut preview = print_preview();
        let probe = CountingProbe::new(usize::MAX);
        let policy = ReadinessPolicy {
            interval: Duration::from_millis(100),
            max_attempts: NonZeroUsize::MIN,
        };

        let err = preview.wait_until_ready(&probe, &policy).await.unwrap_err();

        assert!(matches!(err, ExportError::Unavailable));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_print_is_disabled_until_ready() {
        let preview = print_preview();
        let printer = RecordingPrinter::default();

        let err = preview.print(&printer, Path::new("out.pdf")).await.unwrap_err();

        assert!(matches!(err, ExportError::Unavailable));
        assert!(printer.printed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_print_after_ready_reaches_printer() {
        let mut preview = print_preview();
        preview
            .wait_until_ready(&CountingProbe::new(1), &ReadinessPolicy::default())
            .await
            .unwrap();

        let printer = RecordingPrinter::default();
        let path = preview.print(&printer, Path::new("out.pdf")).await.unwrap();

        assert_eq!(path, PathBuf::from("out.pdf"));
        assert_eq!(*printer.printed.lock().unwrap(), vec![PathBuf::from("out.pdf")]);
    }

    #[test]
    fn test_print_preview_requires_rendered_preview() {
        let err = export_as_print_preview(None, "Olivia Chen", &AccentColor::default()).unwrap_err();
        assert!(matches!(err, ExportError::Unavailable));
    }

    #[test]
    fn test_command_printer_substitutes_per_argument() {
        let printer = CommandPrinter::new("chromium --headless --print-to-pdf={output} {input}");
        let argv = printer.argv(Path::new("/tmp/in file.html"), Path::new("/out/My Resume.pdf"));

        assert_eq!(
            argv,
            vec![
                "chromium",
                "--headless",
                "--print-to-pdf=/out/My Resume.pdf",
                "/tmp/in file.html",
            ]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_printer_runs_command_on_transient_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("resume.html");
        let preview = print_preview();

        CommandPrinter::new("cp {input} {output}")
            .print(preview.document(), &output)
            .await
            .unwrap();

        let copied = std::fs::read_to_string(&output).unwrap();
        assert_eq!(copied, preview.document().html());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_printer_reports_failures() {
        let preview = print_preview();
        let err = CommandPrinter::new("false")
            .print(preview.document(), Path::new("unused.pdf"))
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Print(_)));
    }
}
