//! Signature Verification CLI

use clap::{Parser, Subcommand};
use sig_core::media::sniff_mime;
use sig_core::report::generate_report;
use sig_core::{
    AnalysisPolicy, CoreResult, ImageFile, InMemoryPreviewStore, LogNotifier, MockAnalyzer,
    RemoteAnalyzer, ReportFormat, ResultView, SignatureAnalyzer, VerificationReport,
    VerificationSession, VerificationVerdict,
};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "sig-verify")]
#[command(about = "Handwritten Signature Verification Tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a signature image
    Verify {
        /// Path to image file
        #[arg(short, long)]
        file: PathBuf,

        /// Output format (text, json, markdown, html)
        #[arg(short = 'F', long, default_value = "text")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,

        /// Analysis service endpoint, e.g. http://localhost:3000/api/verify
        #[arg(short, long)]
        remote: Option<String>,

        /// Seed for the mock analyzer
        #[arg(long)]
        seed: Option<u64>,

        /// Simulated analysis latency in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Probability that the mock analysis fails
        #[arg(long)]
        failure_rate: Option<f64>,
    },

    /// Show information about an image file
    Info {
        /// Path to image file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the default analysis policy
    Policy,
}

/// Where `verify` sends the image
enum AnalyzerChoice {
    Mock {
        policy: AnalysisPolicy,
        seed: Option<u64>,
    },
    Remote(String),
}

impl AnalyzerChoice {
    fn build(self) -> Box<dyn SignatureAnalyzer> {
        match self {
            AnalyzerChoice::Mock { policy, seed: Some(seed) } => {
                Box::new(MockAnalyzer::with_seed(policy, seed))
            }
            AnalyzerChoice::Mock { policy, seed: None } => Box::new(MockAnalyzer::new(policy)),
            AnalyzerChoice::Remote(endpoint) => Box::new(RemoteAnalyzer::new(endpoint)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set subscriber: {}", e);
    }

    match cli.command {
        Commands::Verify {
            file,
            format,
            output_file,
            remote,
            seed,
            delay_ms,
            failure_rate,
        } => {
            let choice = match remote {
                Some(endpoint) => AnalyzerChoice::Remote(endpoint),
                None => {
                    let defaults = AnalysisPolicy::default();
                    AnalyzerChoice::Mock {
                        policy: AnalysisPolicy {
                            delay_ms: delay_ms.unwrap_or(defaults.delay_ms),
                            failure_rate: failure_rate.unwrap_or(defaults.failure_rate),
                            ..defaults
                        },
                        seed,
                    }
                }
            };
            cmd_verify(file, format, output_file, choice);
        }
        Commands::Info { file } => {
            cmd_info(file);
        }
        Commands::Policy => {
            cmd_policy();
        }
    }
}

fn cmd_verify(file: PathBuf, output_format: String, output_file: Option<PathBuf>, choice: AnalyzerChoice) {
    info!("Verifying signature: {}", file.display());

    if !file.exists() {
        error!("File not found: {}", file.display());
        std::process::exit(1);
    }

    let format = match parse_format(&output_format) {
        Ok(format) => format,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if let AnalyzerChoice::Mock { policy, .. } = &choice {
        if let Err(e) = policy.validate() {
            error!("Invalid analysis policy: {}", e);
            std::process::exit(1);
        }
    }

    let image = match load_image(&file) {
        Ok(image) => image,
        Err(e) => {
            error!("Failed to read {}: {}", file.display(), e);
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    let analyzer = choice.build();
    info!("Using {} analyzer", analyzer.name());

    let mut session = VerificationSession::new(InMemoryPreviewStore::new(), LogNotifier);
    let outcome = runtime.block_on(async {
        session
            .upload_and_analyze(image.clone(), analyzer.as_ref())
            .await
            .cloned()
    });

    let verdict = match outcome {
        Ok(verdict) => verdict,
        Err(e) => {
            error!("Verification failed: {}", e);
            std::process::exit(1);
        }
    };

    match render_output(&image, verdict, format) {
        Ok(content) => {
            if let Some(out_path) = output_file {
                if let Err(e) = std::fs::write(&out_path, &content) {
                    error!("Failed to write output file: {}", e);
                    std::process::exit(1);
                }
                info!("Report written to: {}", out_path.display());
            } else {
                println!("{}", content);
            }
        }
        Err(e) => {
            error!("Failed to generate report: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_info(file: PathBuf) {
    info!("Extracting info from: {}", file.display());

    if !file.exists() {
        error!("File not found: {}", file.display());
        std::process::exit(1);
    }

    match load_image(&file) {
        Ok(image) => print!("{}", describe_image(&file, &image)),
        Err(e) => {
            error!("Failed to read {}: {}", file.display(), e);
            std::process::exit(1);
        }
    }
}

fn cmd_policy() {
    match serde_json::to_string_pretty(&AnalysisPolicy::default()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Failed to serialize policy: {}", e);
            std::process::exit(1);
        }
    }
}

/// `text` is handled locally; everything else is a report format
enum OutputFormat {
    Text,
    Report(ReportFormat),
}

fn parse_format(raw: &str) -> CoreResult<OutputFormat> {
    match raw.trim().to_lowercase().as_str() {
        "text" | "txt" => Ok(OutputFormat::Text),
        other => other.parse().map(OutputFormat::Report),
    }
}

fn load_image(path: &Path) -> CoreResult<ImageFile> {
    let data = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(ImageFile::from_bytes(name, data))
}

fn render_output(image: &ImageFile, verdict: VerificationVerdict, format: OutputFormat) -> CoreResult<String> {
    match format {
        OutputFormat::Text => Ok(ResultView::from_verdict(&verdict).render_text()),
        OutputFormat::Report(format) => {
            let report = VerificationReport::new(image, verdict, chrono::Utc::now());
            generate_report(&report, format)
        }
    }
}

fn describe_image(path: &Path, image: &ImageFile) -> String {
    let mut out = format!("\nImage Information\n{}\n", "=".repeat(50));
    out.push_str(&format!("File: {}\n", path.display()));
    out.push_str(&format!(
        "Size: {} bytes ({:.2} MB)\n",
        image.len(),
        image.len() as f64 / 1024.0 / 1024.0
    ));
    out.push_str(&format!("SHA-256: {}\n", image.sha256()));
    out.push_str(&format!(
        "Format: {}\n",
        sniff_mime(&image.bytes).unwrap_or("Unknown")
    ));

    let dimensions = image::ImageReader::new(Cursor::new(&image.bytes))
        .with_guessed_format()
        .ok()
        .and_then(|reader| reader.into_dimensions().ok());
    match dimensions {
        Some((width, height)) => out.push_str(&format!("Dimensions: {}x{}\n", width, height)),
        None => out.push_str("Dimensions: Unknown\n"),
    }

    let accepted = if image.is_image() && !image.is_empty() { "yes" } else { "no" };
    out.push_str(&format!("Accepted for analysis: {}\n", accepted));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_1X1: &[u8] = &[
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1f, 0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9c, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
    ];

    fn temp_file(name: &str, data: &[u8]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(data).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_image_sniffs_type() {
        let (_dir, path) = temp_file("signature.bin", PNG_1X1);
        let image = load_image(&path).unwrap();
        assert_eq!(image.file_name, "signature.bin");
        assert_eq!(image.mime_type, "image/png");
        assert!(image.is_image());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_image(&dir.path().join("nope.png")).is_err());
    }

    #[test]
    fn test_describe_png() {
        let (_dir, path) = temp_file("sig.png", PNG_1X1);
        let image = load_image(&path).unwrap();
        let info = describe_image(&path, &image);
        assert!(info.contains("Format: image/png"));
        assert!(info.contains("Dimensions: 1x1"));
        assert!(info.contains("Accepted for analysis: yes"));
        assert!(info.contains(&image.sha256()));
    }

    #[test]
    fn test_describe_pdf_is_not_accepted() {
        let (_dir, path) = temp_file("contract.pdf", b"%PDF-1.7\n");
        let image = load_image(&path).unwrap();
        let info = describe_image(&path, &image);
        assert!(info.contains("Format: Unknown"));
        assert!(info.contains("Accepted for analysis: no"));
    }

    #[test]
    fn test_parse_format() {
        assert!(matches!(parse_format("text"), Ok(OutputFormat::Text)));
        assert!(matches!(parse_format("JSON"), Ok(OutputFormat::Report(ReportFormat::Json))));
        assert!(matches!(parse_format("md"), Ok(OutputFormat::Report(ReportFormat::Markdown))));
        assert!(parse_format("pdf").is_err());
    }

    #[test]
    fn test_render_text_output() {
        let image = ImageFile::from_bytes("sig.png", PNG_1X1.to_vec());
        let verdict = VerificationVerdict::from_score(0.93, 0.7);
        let text = render_output(&image, verdict, OutputFormat::Text).unwrap();
        assert!(text.starts_with("Authentic Signature"));
        assert!(text.contains("93%"));
    }

    #[test]
    fn test_seeded_mock_verify_round() {
        let (_dir, path) = temp_file("sig.png", PNG_1X1);
        let image = load_image(&path).unwrap();
        let analyzer = AnalyzerChoice::Mock {
            policy: AnalysisPolicy::instant(),
            seed: Some(11),
        }
        .build();

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut session = VerificationSession::new(InMemoryPreviewStore::new(), LogNotifier);
        let verdict = runtime
            .block_on(session.upload_and_analyze(image.clone(), analyzer.as_ref()))
            .unwrap()
            .clone();
        assert_eq!(verdict.is_authentic, verdict.confidence_score > 0.7);

        let json = render_output(&image, verdict, OutputFormat::Report(ReportFormat::Json)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["file_name"], "sig.png");
    }
}
