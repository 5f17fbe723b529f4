//! HTML to PDF conversion. Production uses the `wkhtmltopdf` binary, fed the
//! document on stdin and read back from stdout.

use async_trait::async_trait;
use std::{path::PathBuf, process::Stdio};
use thiserror::Error;
use tokio::{io::AsyncWriteExt, process::Command};

/// Every PDF starts with this header; anything else coming back from the
/// converter is treated as a failure.
const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to start {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write html to converter: {0}")]
    WriteHtml(#[source] std::io::Error),
    #[error("failed to read converter output: {0}")]
    ReadPdf(#[source] std::io::Error),
    #[error("converter exited with status {status}: {stderr}")]
    Exit { status: String, stderr: String },
    #[error("converter produced no output")]
    Empty,
    #[error("converter output is not a PDF")]
    NotPdf,
}

#[async_trait]
pub trait PdfConverter: Send + Sync {
    /// Convert a complete, UTF-8 encoded HTML document into PDF bytes.
    async fn convert(&self, html: &str) -> Result<Vec<u8>, ConvertError>;
}

/// Reject converter output that could not be a PDF document.
pub fn ensure_pdf(bytes: Vec<u8>) -> Result<Vec<u8>, ConvertError> {
    if bytes.is_empty() {
        Err(ConvertError::Empty)
    } else if !bytes.starts_with(PDF_MAGIC) {
        Err(ConvertError::NotPdf)
    } else {
        Ok(bytes)
    }
}

pub struct WkHtmlToPdf {
    bin: PathBuf,
}

impl WkHtmlToPdf {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }
}

#[async_trait]
impl PdfConverter for WkHtmlToPdf {
    async fn convert(&self, html: &str) -> Result<Vec<u8>, ConvertError> {
        let mut child = Command::new(&self.bin)
            .args(["--quiet", "--encoding", "utf-8", "-", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ConvertError::Spawn {
                bin: self.bin.display().to_string(),
                source,
            })?;

        // stdin has to be written while stdout is drained, or a large
        // document fills the pipe and both sides block.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ConvertError::WriteHtml(std::io::ErrorKind::BrokenPipe.into()))?;
        let write_html = async move {
            stdin.write_all(html.as_bytes()).await?;
            stdin.shutdown().await
        };
        let (written, output) =
            futures::join!(write_html, child.wait_with_output());
        let output = output.map_err(ConvertError::ReadPdf)?;

        // A converter that dies early also breaks the stdin pipe; its exit
        // status and stderr say more than the EPIPE does.
        if !output.status.success() {
            return Err(ConvertError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written.map_err(ConvertError::WriteHtml)?;
        tracing::debug!(bytes = output.stdout.len(), "converted html to pdf");

        ensure_pdf(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_pdf() {
        assert!(matches!(ensure_pdf(vec![]), Err(ConvertError::Empty)));
        assert!(matches!(
            ensure_pdf(b"<html></html>".to_vec()),
            Err(ConvertError::NotPdf)
        ));
        let pdf = b"%PDF-1.4\n%%EOF".to_vec();
        assert_eq!(ensure_pdf(pdf.clone()).expect("valid header"), pdf);
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let converter = WkHtmlToPdf::new("/nonexistent/wkhtmltopdf");
        let result = converter.convert("<html></html>").await;

        assert!(matches!(result, Err(ConvertError::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_failing_converter_reports_exit() {
        let converter = WkHtmlToPdf::new("false");
        let result = converter.convert("<html></html>").await;

        assert!(matches!(result, Err(ConvertError::Exit { .. })));
    }

    #[tokio::test]
    async fn test_silent_converter_is_an_error() {
        // `true` exits cleanly without reading stdin or writing a byte
        let converter = WkHtmlToPdf::new("true");
        let result = converter.convert("<html></html>").await;

        assert!(matches!(
            result,
            Err(ConvertError::Empty) | Err(ConvertError::WriteHtml(_))
        ));
    }
}
