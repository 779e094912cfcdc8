//! qrexport - render a URL as a QR code and export it two ways
//!
//! This library encodes a configured URL into a QR symbol and exports it
//! as a `data:image/png;base64,...` string (for inline embedding) and as
//! a PNG file on disk. The two exports are independent operations that
//! run concurrently; one failing never prevents the other.
//!
//! # Example
//!
//! ```no_run
//! use qrexport::{EccLevel, ExportJob, QrExporter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let exporter = QrExporter::new(EccLevel::High);
//!     let job = ExportJob::new("https://example.com/x", "qr.png");
//!
//!     let report = exporter.export(&job).await;
//!     if let Ok(url) = &report.data_url {
//!         println!("{url}");
//!     }
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod qr;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{EccLevel, ExportOptions, LogRotation, LoggingOptions, QrExportConfig};
pub use qr::{QrDecoder, QrEncoder, QrPayload};

use std::path::{Path, PathBuf};

/// Parameters for a single export run
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// Text encoded into the QR symbol
    pub text: String,
    /// Destination path for the PNG artifact
    pub output: PathBuf,
}

impl ExportJob {
    /// Create a job from text and an output path
    pub fn new(text: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            text: text.into(),
            output: output.into(),
        }
    }

    /// Build a job from resolved export options
    pub fn from_options(options: &ExportOptions) -> Self {
        Self {
            text: options.url.clone(),
            output: options.output.clone(),
        }
    }
}

/// Outcome of one export run, one result per operation
#[derive(Debug)]
pub struct ExportReport {
    /// Result of the encode-to-data-URL operation
    pub data_url: Result<String>,
    /// Result of the encode-to-file operation, carrying the written path
    pub file: Result<PathBuf>,
}

impl ExportReport {
    /// True when both operations completed
    pub fn success(&self) -> bool {
        self.data_url.is_ok() && self.file.is_ok()
    }

    /// Number of failed operations (0 to 2)
    pub fn failures(&self) -> usize {
        [self.data_url.is_err(), self.file.is_err()]
            .iter()
            .filter(|failed| **failed)
            .count()
    }
}

/// High-level driver combining the encoder with concurrent export
pub struct QrExporter {
    encoder: QrEncoder,
    decoder: QrDecoder,
}

impl QrExporter {
    /// Create a new exporter with the given error-correction level
    pub fn new(ecc_level: EccLevel) -> Self {
        Self {
            encoder: QrEncoder::with_ecc_level(ecc_level),
            decoder: QrDecoder::new(),
        }
    }

    /// Run both export operations concurrently and collect their results.
    ///
    /// The operations share no state and are joined, not chained: a failure
    /// in either one is captured in the report while the other proceeds.
    pub async fn export(&self, job: &ExportJob) -> ExportReport {
        let encoder = self.encoder;
        let text = job.text.clone();
        let data_url_task = tokio::task::spawn_blocking(move || encoder.data_url(&text));

        let encoder = self.encoder;
        let text = job.text.clone();
        let path = job.output.clone();
        let file_task = tokio::task::spawn_blocking(move || -> Result<PathBuf> {
            encoder.write_png(&path, &text)?;
            Ok(path)
        });

        let (data_url, file) = tokio::join!(data_url_task, file_task);

        ExportReport {
            data_url: flatten(data_url),
            file: flatten(file),
        }
    }

    /// Decode the PNG at `path` and check it yields exactly `expected`.
    pub fn verify_file(&self, path: &Path, expected: &str) -> Result<()> {
        let payload = self.decoder.decode_file(path)?;
        match payload.as_str() {
            Some(text) if text == expected => Ok(()),
            Some(text) => Err(Error::Export(format!(
                "Decoded content mismatch: expected '{expected}', got '{text}'"
            ))),
            None => Err(Error::Export(
                "Decoded content is not valid UTF-8".to_string(),
            )),
        }
    }
}

fn flatten<T>(joined: std::result::Result<Result<T>, tokio::task::JoinError>) -> Result<T> {
    match joined {
        Ok(result) => result,
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_failures() {
        let report = ExportReport {
            data_url: Ok("data:image/png;base64,".to_string()),
            file: Err(Error::Io(std::io::Error::other("disk full"))),
        };
        assert!(!report.success());
        assert_eq!(report.failures(), 1);

        let report = ExportReport {
            data_url: Ok(String::new()),
            file: Ok(PathBuf::from("qr.png")),
        };
        assert!(report.success());
        assert_eq!(report.failures(), 0);
    }

    #[test]
    fn job_from_options_uses_configured_values() {
        let options = ExportOptions::default();
        let job = ExportJob::from_options(&options);
        assert_eq!(job.text, options.url);
        assert_eq!(job.output, options.output);
    }
}
