//! qrexport CLI entrypoint

use clap::Parser;
use qrexport::config::EccLevel;
use qrexport::output::render_export_report;
use qrexport::{Error, ExportJob, QrExportConfig, QrExporter, Result, logging};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "qrexport",
    version,
    about = "Render a URL as a QR code and export it as a data URL and a PNG file"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrexport.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the URL to encode (takes precedence over config file)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Override the output PNG path
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Override the error-correction level (L, M, Q, or H)
    #[arg(long, value_name = "LEVEL")]
    ecc_level: Option<String>,

    /// Output results as formatted JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Decode the written PNG afterwards and check it matches the input
    #[arg(long)]
    verify: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = QrExportConfig::load(cli.config.as_deref())?;

    if let Some(ref url) = cli.url {
        config.export.url = url.clone();
    }

    if let Some(ref output) = cli.output {
        config.export.output = output.clone();
    }

    if let Some(ref level) = cli.ecc_level {
        config.export.ecc_level = level.parse::<EccLevel>().map_err(Error::Config)?;
    }

    logging::init(&config.logging)?;

    let exporter = QrExporter::new(config.export.ecc_level);
    let job = ExportJob::from_options(&config.export);
    info!(
        url = %job.text,
        output = %job.output.display(),
        ecc_level = config.export.ecc_level.letter(),
        "Starting QR export"
    );

    let report = exporter.export(&job).await;

    let verification = match (cli.verify, &report.file) {
        (true, Ok(path)) => Some(exporter.verify_file(path, &job.text)),
        _ => None,
    };

    let rendered = render_export_report(&job, &report, verification.as_ref());
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rendered.json)?);
    } else {
        for line in &rendered.human {
            println!("{line}");
        }
    }

    if let Err(err) = &report.data_url {
        error!("Data URL generation failed: {err}");
    }
    if let Err(err) = &report.file {
        error!("PNG export failed: {err}");
    }
    match &verification {
        Some(Ok(())) => info!("Verified: {} decodes to the input URL", job.output.display()),
        Some(Err(err)) => error!("Verification failed: {err}"),
        None => {}
    }

    let failures = report.failures();
    if failures > 0 {
        return Err(Error::Export(format!(
            "{failures} of 2 export operations failed"
        )));
    }

    if let Some(Err(err)) = verification {
        return Err(err);
    }

    Ok(())
}
