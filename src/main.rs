//! `hog-detector` command-line tool: train, run and score the detector.
use clap::{Parser, Subcommand};
use hog_detector::classifier::{Classifier, LinearSvm};
use hog_detector::dataset::{read_descriptions, write_descriptions};
use hog_detector::image::io::write_json_file;
use hog_detector::{load_config, pipeline, DetectorConfig, PedestrianDetector, Result};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hog-detector")]
#[command(about = "Train and run a sliding-window pedestrian detector")]
#[command(version)]
struct Cli {
    /// JSON file overriding the default detector configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model on an image directory and its ground truth.
    Learn {
        dir: PathBuf,
        descriptions: PathBuf,
        model_out: PathBuf,
    },
    /// Detect on every image of a directory and write a description table.
    Classify {
        dir: PathBuf,
        descriptions_out: PathBuf,
        model: PathBuf,
    },
    /// Detect on a single image.
    Detect {
        image: PathBuf,
        model: PathBuf,
        /// Write the full detection report (JSON).
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Score detections against ground truth.
    Evaluate {
        ground_truth: PathBuf,
        detections: PathBuf,
        /// Write unmatched detections as a description table.
        #[arg(long)]
        false_positives: Option<PathBuf>,
    },
    /// Train, collect false positives on the training images, retrain.
    Bootstrap {
        dir: PathBuf,
        descriptions: PathBuf,
        model_out: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DetectorConfig::default(),
    };
    let svm = LinearSvm::new(config.svm);

    match cli.command {
        Commands::Learn {
            dir,
            descriptions,
            model_out,
        } => {
            let gt = read_descriptions(&descriptions)?;
            let learned = pipeline::learn(&config, &svm, &dir, &gt)?;
            svm.save(&learned.model, &model_out)?;
            info!("model written to {}", model_out.display());
        }
        Commands::Classify {
            dir,
            descriptions_out,
            model,
        } => {
            let detector = load_detector(config, svm, &model)?;
            let regions = pipeline::classify(&detector, &dir)?;
            write_descriptions(&descriptions_out, &regions)?;
            info!(
                "{} detections written to {}",
                regions.len(),
                descriptions_out.display()
            );
        }
        Commands::Detect { image, model, json } => {
            let detector = load_detector(config, svm, &model)?;
            let report = pipeline::detect_one(&detector, &image)?;
            println!("Detection summary");
            println!(
                "  image: {}x{} ({} windows)",
                report.input.width, report.input.height, report.input.windows_scanned
            );
            println!("  candidates: {}", report.candidates.len());
            for det in &report.detections {
                println!("  x={:<5} score={:.4}", det.x, det.score);
            }
            println!("  total_ms: {:.3}", report.timings.total_ms);
            if let Some(path) = json {
                write_json_file(&path, &report)?;
                println!("JSON report written to {}", path.display());
            }
        }
        Commands::Evaluate {
            ground_truth,
            detections,
            false_positives,
        } => {
            let report = pipeline::evaluate_files(&ground_truth, &detections, &config.evaluation)?;
            println!("{}", report.summary());
            if let Some(path) = false_positives {
                write_descriptions(&path, &report.false_positive_regions)?;
                info!(
                    "{} false positives written to {}",
                    report.false_positives,
                    path.display()
                );
            }
        }
        Commands::Bootstrap {
            dir,
            descriptions,
            model_out,
        } => {
            let gt = read_descriptions(&descriptions)?;
            let outcome = pipeline::bootstrap(&config, svm.clone(), &dir, &gt)?;
            svm.save(&outcome.model, &model_out)?;
            info!(
                "bootstrapped model ({} samples) written to {}",
                outcome.training_set.samples.len(),
                model_out.display()
            );
        }
    }
    Ok(())
}

fn load_detector(
    config: DetectorConfig,
    svm: LinearSvm,
    model_path: &Path,
) -> Result<PedestrianDetector<LinearSvm>> {
    let model = svm.load(model_path)?;
    PedestrianDetector::new(config, svm, model)
}
