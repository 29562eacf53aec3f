use clap::{Parser, Subcommand};
use leafscan::classify::Classifier;
use leafscan::config::{BundleConfig, CONFIG_FILE};
use leafscan::engine::{InferenceBackend, TractBackend};
use leafscan::{acquire, config, output};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "leafscan")]
#[command(about = "On-device plant leaf disease classification")]
#[command(long_about = "\
On-device plant leaf disease classification

Runs a quantized TFLite image classifier locally. Photos never leave the
machine: the image is decoded, resampled to the model's input size, fed
through the model, and the best-scoring disease label is printed.

The model and its label list ship as a matched pair, described by a
leafscan.toml in the working directory (or --config). With no config file
the built-in bundle applies: a 224x224 uint8 model named model.tflite next
to the binary, with the stock seven-disease label list.

Scores are raw quantized bytes (0-255), not probabilities. The winner is
the same either way, and raw bytes don't pretend to a precision the model
doesn't offer.

Run 'leafscan gen-config' to print a documented leafscan.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Bundle config file (default: ./leafscan.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Model artifact path, overriding the config
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Emit machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a single leaf photo
    Classify {
        /// Image file (jpg, png, tiff, webp)
        image: PathBuf,
        /// Also print the full per-label score table
        #[arg(long)]
        scores: bool,
    },
    /// Classify every supported image in a directory
    Batch {
        /// Directory to scan (not recursive)
        dir: PathBuf,
    },
    /// Show model facts and check label alignment without classifying
    Inspect,
    /// Print a stock leafscan.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let bundle = load_bundle(cli.config.as_deref())?;
    let model_path = cli.model.clone().unwrap_or_else(|| bundle.model.clone());
    let backend = TractBackend::load_path(&model_path)?;

    if backend.input_layout() != bundle.layout() {
        log::warn!(
            "model declares input {} but config expects {}; the model wins",
            backend.input_layout(),
            bundle.layout()
        );
    }

    match cli.command {
        Command::Classify { image, scores } => {
            let classifier = Classifier::new(backend, bundle.label_set());
            let bitmap = acquire::acquire(&image, &classifier.layout())?;

            if scores {
                let vector = classifier.scores_for(&bitmap)?;
                output::print_lines(&output::format_score_table(&vector, classifier.labels()));
            }

            let prediction = classifier.classify(&bitmap)?;
            if cli.json {
                let report = output::PredictionReport::new(&image, &prediction);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_lines(&output::format_prediction(&prediction, scores));
            }
        }
        Command::Batch { dir } => {
            let classifier = Classifier::new(backend, bundle.label_set());
            run_batch(&classifier, &dir, cli.json)?;
        }
        Command::Inspect => {
            let lines = output::format_inspect(
                &model_path,
                backend.input_layout(),
                bundle.layout(),
                backend.output_len(),
                &bundle.label_set(),
            );
            output::print_lines(&lines);
        }
        Command::GenConfig => unreachable!("handled before model load"),
    }

    Ok(())
}

/// Resolve the bundle config: explicit flag, then ./leafscan.toml, then the
/// built-in defaults. A missing explicit file is an error; a missing
/// implicit one is not.
fn load_bundle(flag: Option<&Path>) -> Result<BundleConfig, config::ConfigError> {
    if let Some(path) = flag {
        return BundleConfig::load(path);
    }
    let implicit = Path::new(CONFIG_FILE);
    if implicit.exists() {
        BundleConfig::load(implicit)
    } else {
        Ok(BundleConfig::default())
    }
}

/// Classify every supported image directly inside `dir`, in name order.
/// One bad file does not stop the batch; it is reported and skipped.
fn run_batch<B: InferenceBackend>(
    classifier: &Classifier<B>,
    dir: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut images: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| acquire::is_supported(p))
        .collect();
    images.sort();

    if images.is_empty() {
        eprintln!("No supported images in {}", dir.display());
        return Ok(());
    }

    let mut reports = Vec::new();
    let mut failures = 0usize;
    for path in &images {
        let outcome = classifier.classify_file(path).map_err(|e| e.to_string());
        if outcome.is_err() {
            failures += 1;
        }
        if json {
            reports.push(match &outcome {
                Ok(prediction) => {
                    serde_json::to_value(output::PredictionReport::new(path, prediction))?
                }
                Err(reason) => serde_json::json!({
                    "image": path.display().to_string(),
                    "error": reason,
                }),
            });
        } else {
            println!("{}", output::format_batch_line(path, &outcome));
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!(
            "{} classified, {} failed",
            images.len() - failures,
            failures
        );
    }
    Ok(())
}
