use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use seizure_centroid::analysis::classifier::CentroidTable;
use seizure_centroid::config::AppConfig;
use seizure_centroid::error::{log_classifier_error, ClassifierError};
use seizure_centroid::session::{SessionData, SessionRunner};

#[derive(Parser, Debug)]
#[command(
    name = "centroid_cli",
    about = "Nearest-centroid seizure classification harness"
)]
struct Cli {
    /// Enable debug logging (per-class training diagnostics)
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fit centroids on the training stream and print the table
    Fit {
        #[command(flatten)]
        input: InputArgs,
        /// Write the centroid table to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Classify the test stream and report accuracy
    Evaluate {
        #[command(flatten)]
        input: InputArgs,
        /// Use a previously fitted centroid table instead of training
        #[arg(long)]
        centroids: Option<PathBuf>,
        /// Print the full JSON report
        #[arg(long)]
        json: bool,
    },
    /// Run the minimum-positive threshold detector
    Threshold {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Session JSON with train/test samples and labels
    #[arg(long)]
    session: PathBuf,
    /// Configuration JSON (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl InputArgs {
    fn load(&self) -> Result<(AppConfig, SessionData)> {
        let config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        let data = SessionData::load(&self.session)?;
        Ok((config, data))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    seizure_centroid::init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Fit { input, output } => run_fit(&input, output),
        Commands::Evaluate {
            input,
            centroids,
            json,
        } => run_evaluate(&input, centroids, json),
        Commands::Threshold { input } => run_threshold(&input),
    }
}

fn run_fit(input: &InputArgs, output: Option<PathBuf>) -> Result<ExitCode> {
    let (config, data) = input.load()?;
    let table = match SessionRunner::new(config).fit(&data) {
        Ok(table) => table,
        Err(err) => return classifier_failure(&err, "fit"),
    };

    let json = serde_json::to_string_pretty(&table)?;
    if let Some(path) = output {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }
    Ok(ExitCode::SUCCESS)
}

fn run_evaluate(input: &InputArgs, centroids: Option<PathBuf>, json: bool) -> Result<ExitCode> {
    let (mut config, data) = input.load()?;
    if let Some(path) = centroids {
        let table = load_centroids(&path)?;
        config.classifier.label_count = table.label_count();
        config.classifier.centroids = Some(table.into());
        config.validate()?;
    }

    let report = match SessionRunner::new(config).run(&data) {
        Ok(report) => report,
        Err(err) => return classifier_failure(&err, "evaluate"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "The classifier sorted {}% of labels correctly and correctly predicted {}% of label {} windows.",
            report.evaluation.overall_accuracy,
            report.evaluation.positive_class_recall,
            report.evaluation.positive_label
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn run_threshold(input: &InputArgs) -> Result<ExitCode> {
    let (config, data) = input.load()?;
    let report = match SessionRunner::new(config).threshold(&data) {
        Ok(report) => report,
        Err(err) => return classifier_failure(&err, "threshold"),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(ExitCode::SUCCESS)
}

fn load_centroids(path: &Path) -> Result<CentroidTable> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

fn classifier_failure(err: &ClassifierError, context: &str) -> Result<ExitCode> {
    log_classifier_error(err, context);
    eprintln!("Error: {err}");
    match err {
        ClassifierError::DivisionByZero { .. } => Ok(ExitCode::from(2)),
        _ => Ok(ExitCode::from(1)),
    }
}
