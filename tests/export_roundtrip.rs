use std::fs;
use std::path::PathBuf;

use qrexport::{EccLevel, ExportJob, QrDecoder, QrExporter};

fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("qrexport-test-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir.join(name)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn export_produces_data_url_and_decodable_png() {
    let output = scratch_path("roundtrip.png");
    let exporter = QrExporter::new(EccLevel::High);
    let job = ExportJob::new("https://example.com/x", &output);

    let report = exporter.export(&job).await;
    assert!(report.success(), "both operations should succeed");

    let data_url = report.data_url.expect("data url");
    assert!(data_url.starts_with("data:image/"));

    let path = report.file.expect("file path");
    assert_eq!(path, output);
    let metadata = fs::metadata(&path).expect("written file");
    assert!(metadata.len() > 0, "PNG must be non-empty");

    let decoded = QrDecoder::new().decode_file(&path).expect("decode png");
    assert_eq!(decoded.as_str(), Some("https://example.com/x"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn repeated_export_is_idempotent_at_content_level() {
    let output = scratch_path("idempotent.png");
    let exporter = QrExporter::new(EccLevel::High);
    let job = ExportJob::new("https://example.com/x", &output);

    let decoder = QrDecoder::new();

    let first = exporter.export(&job).await;
    assert!(first.success());
    let first_decoded = decoder.decode_file(&output).expect("decode first run");

    let second = exporter.export(&job).await;
    assert!(second.success());
    let second_decoded = decoder.decode_file(&output).expect("decode second run");

    assert_eq!(first_decoded.as_str(), second_decoded.as_str());
    assert_eq!(second_decoded.as_str(), Some("https://example.com/x"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unwritable_output_fails_file_operation_only() {
    let output = PathBuf::from("/nonexistent-qrexport-dir/qr.png");
    let exporter = QrExporter::new(EccLevel::High);
    let job = ExportJob::new("https://example.com/x", &output);

    let report = exporter.export(&job).await;

    assert!(report.file.is_err(), "writing into a missing dir must fail");
    let data_url = report
        .data_url
        .as_ref()
        .expect("data url must still be generated independently");
    assert!(data_url.starts_with("data:image/"));
    assert_eq!(report.failures(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn verify_detects_content_mismatch() {
    let output = scratch_path("mismatch.png");
    let exporter = QrExporter::new(EccLevel::High);
    let job = ExportJob::new("https://example.com/a", &output);

    let report = exporter.export(&job).await;
    assert!(report.success());

    exporter
        .verify_file(&output, "https://example.com/a")
        .expect("matching content verifies");

    assert!(
        exporter
            .verify_file(&output, "https://example.com/b")
            .is_err(),
        "mismatched content must be rejected"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn default_ecc_level_survives_roundtrip_for_long_urls() {
    let output = scratch_path("long-url.png");
    let url = "https://daily-co.github.io/pipecat-crush-quest/download_contacts.html";
    let exporter = QrExporter::new(EccLevel::High);
    let job = ExportJob::new(url, &output);

    let report = exporter.export(&job).await;
    assert!(report.success());

    let decoded = QrDecoder::new().decode_file(&output).expect("decode png");
    assert_eq!(decoded.as_str(), Some(url));
}
