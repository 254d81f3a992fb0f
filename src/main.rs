use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod metrics;
mod mnist;
mod model;
mod render;

pub type Result<T> = anyhow::Result<T>;

/// Name of the text report written into the base directory.
const SUMMARY_FILE: &str = "averaging_results";

/// One-line file in the base directory holding the chart headline.
const HEADLINE_FILE: &str = "headline";

#[derive(Parser)]
#[command(name = "runlab")]
#[command(about = "Average experiment run metrics and prepare MNIST samples", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average the metrics logs of repeated runs and render summary + charts.
    Average {
        /// Experiment directory holding `headline` and `run-<i>/metrics/metrics.csv`.
        base_dir: PathBuf,

        /// How many runs were started.
        #[arg(long, default_value_t = metrics::DEFAULT_RUN_COUNT)]
        runs: usize,

        /// JSON file overriding chart colours, fonts and zoom axes.
        #[arg(long)]
        style: Option<PathBuf>,
    },
    /// Convert gzip MNIST image/label files into a two-class JSON sample set.
    Extract(ExtractArgs),
}

#[derive(Args)]
struct ExtractArgs {
    #[arg(long)]
    images: PathBuf,

    #[arg(long)]
    labels: PathBuf,

    #[arg(short = 'o', long)]
    out: PathBuf,

    /// Optional second file holding only the first `--short-count` samples.
    #[arg(long)]
    short_out: Option<PathBuf>,

    #[arg(long, default_value_t = 100)]
    short_count: usize,

    /// Records to read from the streams (accepted or not).
    #[arg(long, default_value_t = mnist::extract::DEFAULT_RECORD_COUNT)]
    count: usize,

    /// Bytes per image record.
    #[arg(long, default_value_t = mnist::extract::DEFAULT_PIXELS)]
    pixels: usize,

    /// Raw label mapped to `true`.
    #[arg(long, default_value_t = 1)]
    positive: u8,

    /// Raw label mapped to `false`.
    #[arg(long, default_value_t = 7)]
    negative: u8,

    #[arg(long, value_enum, default_value_t = mnist::SampleFormat::Lines)]
    format: mnist::SampleFormat,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Average {
            base_dir,
            runs,
            style,
        } => {
            let style = match style {
                Some(path) => config::ChartStyle::load(&path)?,
                None => config::ChartStyle::default(),
            };
            run_average(&base_dir, runs, &style)?;
        }
        Commands::Extract(args) => run_extract(&args)?,
    }

    Ok(())
}

/// Average all runs under `base_dir` and write the summary and chart pages.
///
/// Nothing is written unless every step succeeds.
fn run_average(base_dir: &Path, runs: usize, style: &config::ChartStyle) -> Result<()> {
    // 1) Headline.
    let headline_path = base_dir.join(HEADLINE_FILE);
    let headline = fs::read_to_string(&headline_path)
        .with_context(|| format!("read headline file {}", headline_path.display()))?
        .trim_end()
        .to_string();

    // 2) Load runs; missing ones only lower the denominator.
    let run_set = metrics::locate_runs(base_dir, runs)?;
    if !run_set.missing.is_empty() {
        info!(
            missing = ?run_set.missing,
            "{} of {} runs missing",
            run_set.missing.len(),
            runs
        );
    }

    // 3) Reduce.
    let averaged = metrics::average(&run_set.runs)?;
    let cumulative = metrics::accumulate_time(&averaged);
    let summary = model::summarize(&averaged, &cumulative)?;

    // 4) Render everything before touching the filesystem.
    let mut outputs = vec![(
        base_dir.join(SUMMARY_FILE),
        render::render_summary(&headline, &summary),
    )];
    for chart in model::build_charts(&headline, &averaged, &cumulative, style) {
        let page = render::render_chart_page(&chart)
            .with_context(|| format!("render chart {}", chart.name))?;
        outputs.push((base_dir.join(format!("{}.html", chart.name)), page));
    }

    write_outputs(&outputs)?;
    info!(
        runs = run_set.effective_count(),
        rows = averaged.len(),
        "Wrote {}",
        base_dir.join(SUMMARY_FILE).display()
    );
    Ok(())
}

fn run_extract(args: &ExtractArgs) -> Result<()> {
    let options = mnist::ExtractOptions {
        pixels: args.pixels,
        count: args.count,
        classes: mnist::ClassFilter::new(args.positive, args.negative)?,
    };

    let images = mnist::open_gz(&args.images)?;
    let labels = mnist::open_gz(&args.labels)?;
    let samples = mnist::extract_samples(images, labels, &options).with_context(|| {
        format!(
            "extract samples from {} and {}",
            args.images.display(),
            args.labels.display()
        )
    })?;

    let mut outputs = vec![(
        args.out.clone(),
        mnist::serialize_samples(&samples, args.format)?,
    )];
    if let Some(short_out) = &args.short_out {
        let short = mnist::prefix(&samples, args.short_count);
        outputs.push((
            short_out.clone(),
            mnist::serialize_samples(short, args.format)?,
        ));
    }

    write_outputs(&outputs)?;
    info!(samples = samples.len(), "Wrote {}", args.out.display());
    Ok(())
}

fn write_outputs(outputs: &[(PathBuf, String)]) -> Result<()> {
    for (path, contents) in outputs {
        fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}
