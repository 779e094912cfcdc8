//! Helpers for rendering export results

use crate::{ExportJob, ExportReport, Result};
use serde_json::{Map, Value, json};

/// Combined structured and human-readable representation of an export run
#[derive(Debug, Clone)]
pub struct RenderedExport {
    /// Structured JSON representation suitable for downstream consumers
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Render an export report into both JSON and human-readable forms.
///
/// `verification` carries the outcome of the optional decode-back check;
/// pass `None` when verification was not requested (or not possible
/// because the file was never written).
pub fn render_export_report(
    job: &ExportJob,
    report: &ExportReport,
    verification: Option<&Result<()>>,
) -> RenderedExport {
    let json = export_report_value(job, report, verification);
    let mut human = Vec::new();

    match &report.data_url {
        Ok(url) => human.push(format!("QR code data URL: {url}")),
        Err(err) => human.push(format!("Failed to generate data URL: {err}")),
    }

    match &report.file {
        Ok(path) => human.push(format!("QR code saved to {}", path.display())),
        Err(err) => human.push(format!(
            "Failed to save QR code to {}: {err}",
            job.output.display()
        )),
    }

    match verification {
        Some(Ok(())) => human.push(format!(
            "Verified: {} decodes to the input URL",
            job.output.display()
        )),
        Some(Err(err)) => human.push(format!("Verification failed: {err}")),
        None => {}
    }

    RenderedExport { json, human }
}

/// Produce a structured JSON representation of the export report.
pub fn export_report_value(
    job: &ExportJob,
    report: &ExportReport,
    verification: Option<&Result<()>>,
) -> Value {
    let mut root = Map::new();
    root.insert("text".to_string(), Value::String(job.text.clone()));

    let data_url = match &report.data_url {
        Ok(url) => json!({ "ok": true, "value": url }),
        Err(err) => json!({ "ok": false, "error": err.to_string() }),
    };
    root.insert("data_url".to_string(), data_url);

    let file = match &report.file {
        Ok(path) => json!({ "ok": true, "path": path.display().to_string() }),
        Err(err) => json!({
            "ok": false,
            "path": job.output.display().to_string(),
            "error": err.to_string(),
        }),
    };
    root.insert("file".to_string(), file);

    match verification {
        Some(Ok(())) => {
            root.insert("verified".to_string(), Value::Bool(true));
        }
        Some(Err(err)) => {
            root.insert("verified".to_string(), Value::Bool(false));
            root.insert("verify_error".to_string(), Value::String(err.to_string()));
        }
        None => {}
    }

    root.insert("success".to_string(), Value::Bool(report.success()));

    Value::Object(root)
}
