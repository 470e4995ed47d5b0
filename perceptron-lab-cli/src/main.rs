//! Command-line entry point: train a perceptron, generate datasets, list the catalog.

use clap::{Args, Parser, Subcommand};
use perceptron_lab::io::{save_model, save_report, write_dataset_csv};
use perceptron_lab::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io::stdout;
use std::path::PathBuf;

mod render;

#[derive(Parser, Debug)]
#[command(
    name = "perceptron-lab",
    version,
    about = "Train and evaluate a perceptron on synthetic 2-D data"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset, train a perceptron and print its metrics
    Train(TrainArgs),
    /// Generate a dataset and write it as CSV
    Generate(GenerateArgs),
    /// List the available datasets
    Datasets,
}

#[derive(Args, Debug, Default)]
struct DatasetArgs {
    /// Dataset name: blobs, iris, moons, cancer, noisy or custom
    #[arg(short, long)]
    dataset: Option<DatasetKind>,
    /// Number of samples to generate
    #[arg(short = 'n', long)]
    samples: Option<usize>,
    /// Cluster standard deviation (blobs)
    #[arg(long, allow_negative_numbers = true)]
    cluster_std: Option<f64>,
    /// Noise level (moons)
    #[arg(long, allow_negative_numbers = true)]
    noise: Option<f64>,
    /// Class separation (noisy)
    #[arg(long, allow_negative_numbers = true)]
    separation: Option<f64>,
    /// Label flip probability (noisy)
    #[arg(long, allow_negative_numbers = true)]
    flip_prob: Option<f64>,
    /// Box half-width (custom)
    #[arg(long, allow_negative_numbers = true)]
    spread: Option<f64>,
    /// Class 0 centre as X,Y (custom)
    #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    center0: Option<[f64; 2]>,
    /// Class 1 centre as X,Y (custom)
    #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    center1: Option<[f64; 2]>,
    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct TrainArgs {
    #[command(flatten)]
    data: DatasetArgs,
    /// JSON experiment config; flags override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Learning rate
    #[arg(short, long, allow_negative_numbers = true)]
    learning_rate: Option<f64>,
    /// Maximum number of epochs
    #[arg(short, long, allow_negative_numbers = true)]
    epochs: Option<usize>,
    /// Fraction of samples held out for testing
    #[arg(short, long, allow_negative_numbers = true)]
    test_fraction: Option<f64>,
    /// Write the full report as JSON
    #[arg(long)]
    report: Option<PathBuf>,
    /// Write the trained model as JSON
    #[arg(long)]
    save_model: Option<PathBuf>,
    /// Write the generated dataset as CSV
    #[arg(long)]
    export_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    data: DatasetArgs,
    /// Output CSV path
    #[arg(short, long)]
    output: PathBuf,
}

/// Parse `X,Y` into a point.
fn parse_point(s: &str) -> Result<[f64; 2], String> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().map_err(|e| format!("'{}': {}", c, e)))
        .collect::<Result<Vec<f64>, String>>()?;
    match coords[..] {
        [x, y] => Ok([x, y]),
        _ => Err(format!("expected two comma-separated numbers, got {}", coords.len())),
    }
}

impl DatasetArgs {
    /// Apply the flags on top of `base`. Parameters that do not belong to the
    /// chosen dataset are ignored with a warning.
    fn apply(&self, base: DatasetKind) -> DatasetKind {
        let mut kind = self.dataset.clone().unwrap_or(base);
        if let Some(n) = self.samples {
            kind = kind.with_n_samples(n);
        }
        let mut unused = Vec::new();
        match &mut kind {
            DatasetKind::Blobs { cluster_std, .. } => {
                if let Some(v) = self.cluster_std {
                    *cluster_std = v;
                }
            }
            DatasetKind::Moons { noise, .. } => {
                if let Some(v) = self.noise {
                    *noise = v;
                }
            }
            DatasetKind::Noisy {
                separation,
                flip_prob,
                ..
            } => {
                if let Some(v) = self.separation {
                    *separation = v;
                }
                if let Some(v) = self.flip_prob {
                    *flip_prob = v;
                }
            }
            DatasetKind::Custom {
                center0,
                center1,
                spread,
                ..
            } => {
                if let Some(v) = self.spread {
                    *spread = v;
                }
                if let Some(v) = self.center0 {
                    *center0 = v;
                }
                if let Some(v) = self.center1 {
                    *center1 = v;
                }
            }
            DatasetKind::Iris { .. } | DatasetKind::Cancer { .. } => {}
        }
        let name = kind.name();
        for (flag, set, owner) in [
            ("--cluster-std", self.cluster_std.is_some(), "blobs"),
            ("--noise", self.noise.is_some(), "moons"),
            ("--separation", self.separation.is_some(), "noisy"),
            ("--flip-prob", self.flip_prob.is_some(), "noisy"),
            ("--spread", self.spread.is_some(), "custom"),
            ("--center0", self.center0.is_some(), "custom"),
            ("--center1", self.center1.is_some(), "custom"),
        ] {
            if set && owner != name {
                unused.push(flag);
            }
        }
        if !unused.is_empty() {
            log::warn!("ignoring {} for dataset '{}'", unused.join(", "), name);
        }
        kind
    }
}

impl TrainArgs {
    fn experiment_config(&self) -> Result<ExperimentConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => ExperimentConfig::default(),
        };
        config.dataset = self.data.apply(config.dataset);
        if let Some(lr) = self.learning_rate {
            config.perceptron.learning_rate = lr;
        }
        if let Some(epochs) = self.epochs {
            config.perceptron.n_epochs = epochs;
        }
        if let Some(fraction) = self.test_fraction {
            config.test_fraction = fraction;
        }
        if self.data.seed.is_some() {
            config.seed = self.data.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logger() {
    let env = env_logger::Env::default().default_filter_or("perceptron_lab=info");
    env_logger::Builder::from_env(env)
        .format_level(false)
        .format_module_path(false)
        .format_timestamp(None)
        .init();
}

fn train(args: &TrainArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.experiment_config()?;
    let experiment = Experiment::run(&config)?;

    render::print_report(&mut stdout(), &experiment.report)?;

    if let Some(path) = &args.report {
        save_report(&experiment.report, path)?;
        log::info!("report written to {}", path.display());
    }
    if let Some(path) = &args.save_model {
        save_model(experiment.pipeline.estimator(), path)?;
        log::info!("model written to {}", path.display());
    }
    if let Some(path) = &args.export_csv {
        write_dataset_csv(path, &experiment.dataset.x, &experiment.dataset.y)?;
        log::info!("dataset written to {}", path.display());
    }
    Ok(())
}

fn generate(args: &GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let kind = args.data.apply(DatasetKind::default());
    let mut rng = match args.data.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let dataset = kind.generate(&mut rng);
    write_dataset_csv(&args.output, &dataset.x, &dataset.y)?;
    log::info!(
        "wrote {} samples of '{}' to {}",
        dataset.len(),
        dataset.info.name,
        args.output.display()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let cli = Cli::parse();
    match &cli.command {
        Command::Train(args) => train(args),
        Command::Generate(args) => generate(args),
        Command::Datasets => {
            render::print_catalog(&mut stdout())?;
            Ok(())
        }
    }
}
