use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use histo_common::Config;
use histo_core::{
    draw_bars, export_json, gutter_width, histogram_json, label_bins, read_sources, resolve_bounds,
    resolve_inputs, Histogram,
};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const PIPED_BAR_WIDTH: usize = 40;
const MIN_BAR_WIDTH: usize = 10;

fn parse_finite(s: &str) -> Result<f64, String> { // reject nan/inf at CLI parse time
    let v: f64 = s.parse().map_err(|_| format!("not a number: {s}"))?;
    if v.is_finite() { Ok(v) } else { Err(format!("bound must be a finite number, got {s}")) }
}

#[derive(Parser)]
#[command(name = "histo", version, about = "Plot a histogram of numbers in the terminal")]
struct Cli {
    /// tracing filter, e.g. "debug" or "histo_core=debug"; falls back to RUST_LOG
    #[arg(long, global = true)]
    log: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bin values from files (or stdin) and draw the distribution
    Hist {
        /// files or glob patterns; "-" or nothing reads stdin
        inputs: Vec<String>,
        /// number of bins in histogram
        #[arg(long, allow_negative_numbers = true)]
        bin: Option<i64>,
        /// left bound of the histogram, default is min value
        #[arg(long, allow_hyphen_values = true, value_parser = parse_finite)]
        left: Option<f64>,
        /// right bound of the histogram, default is max value
        #[arg(long, allow_hyphen_values = true, value_parser = parse_finite)]
        right: Option<f64>,
        #[arg(long)]
        json: bool,
        /// also write the histogram as JSON to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show or initialise the config file
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        path: bool,
    },
    Completions { shell: Shell },
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());
    match cli.command {
        Commands::Hist { inputs, bin, left, right, json, output } => {
            let config = Config::load().context("loading config")?;
            run_hist(inputs, HistArgs { bin, left, right, json, output }, &config)?
        }
        Commands::Config { init, path } => run_config(init, path)?,
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "histo", &mut io::stdout());
        }
    }
    Ok(())
}

struct HistArgs {
    bin: Option<i64>,
    left: Option<f64>,
    right: Option<f64>,
    json: bool,
    output: Option<PathBuf>,
}

fn run_hist(inputs: Vec<String>, args: HistArgs, config: &Config) -> anyhow::Result<()> {
    config.validate()?;
    // flag > config file > built-in default / data extreme
    let bin_count = args.bin.unwrap_or(config.histogram.bins);
    let left = args.left.or(config.histogram.left);
    let right = args.right.or(config.histogram.right);

    let sources = resolve_inputs(&inputs)?;
    let values = read_sources(&sources)?;
    let bound = resolve_bounds(&values, left, right);
    debug!(values = values.len(), left = bound.left, right = bound.right, "resolved bound");
    let hist = Histogram::build(&values, bin_count, bound)?;

    if let Some(path) = &args.output {
        export_json(path, &hist)?;
        eprintln!("Exported to {}", path.display());
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&histogram_json(&hist))?)?;
        return Ok(());
    }
    let bars = label_bins(&hist.bins);
    let width = bar_width(config, gutter_width(&bars));
    draw_bars(&mut out, &bars, width)?;
    Ok(())
}

fn bar_width(config: &Config, gutter: usize) -> usize {
    if let Some(w) = config.display.bar_width {
        return w.max(1);
    }
    if !io::stdout().is_terminal() {
        return PIPED_BAR_WIDTH;
    }
    match crossterm::terminal::size() {
        Ok((cols, _)) => (cols as usize).saturating_sub(gutter).max(MIN_BAR_WIDTH),
        Err(_) => PIPED_BAR_WIDTH,
    }
}

fn run_config(init: bool, show_path: bool) -> anyhow::Result<()> {
    let path = Config::config_path();
    if show_path {
        println!("{}", path.display());
        return Ok(());
    }
    if init {
        if path.exists() {
            anyhow::bail!("config already exists: {}", path.display());
        }
        Config::default().save_to(&path)?;
        println!("Config written to {}", path.display());
        return Ok(());
    }
    let config = Config::load_from(&path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}
