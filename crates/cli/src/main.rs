use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use folio_core::{BatchConfig, BatchProcessor, HttpExtractor, OutputMode, locate_archive, parse_url_list};
use owo_colors::OwoColorize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fetch a list of web articles and bundle them as Word and PDF documents
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Turn a list of article URLs into Word and PDF documents", long_about = None)]
struct Args {
    /// File with one URL per line, or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Directory receiving one sub-directory per run
    #[arg(short, long, default_value = "output", value_name = "DIR")]
    output_dir: PathBuf,

    /// Document grouping (per-article, combined)
    #[arg(long, default_value = "per-article", value_name = "MODE")]
    mode: OutputMode,

    /// Keep boilerplate lines such as newsletter prompts
    #[arg(long)]
    no_filter: bool,

    /// HTTP timeout per URL in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Keep only the newest N runs in the output directory
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(usize))]
    keep_runs: Option<usize>,

    /// Copy the run's archive to FILE
    #[arg(long, value_name = "FILE")]
    archive_out: Option<PathBuf>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "folio=debug,folio_core=debug" } else { "folio=info,folio_core=info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
        echo::print_step(1, 3, "Reading URL list");
    }

    let raw = read_input(&args.input)?;
    let urls = parse_url_list(&raw);

    if urls.is_empty() {
        echo::print_warning("No URLs given; the archive will only hold the report");
    } else if args.verbose {
        eprintln!("  {} {}", "URLs:".dimmed(), urls.len().to_string().bright_white());
        eprintln!("  {} {}", "Input:".dimmed(), echo::format_size(raw.len()).bright_white());
        eprintln!();
    }

    let mut builder = BatchConfig::builder()
        .output_root(&args.output_dir)
        .mode(args.mode)
        .apply_filter(!args.no_filter)
        .timeout(args.timeout)
        .retention(args.keep_runs);
    if let Some(user_agent) = args.user_agent {
        builder = builder.user_agent(user_agent);
    }
    let config = builder.build();

    if args.verbose {
        echo::print_step(2, 3, &format!("Processing {} URL(s)", urls.len()));
        eprintln!("  {} {}", "Mode:".dimmed(), format!("{:?}", config.mode).bright_white());
        eprintln!("  {} {}", "Filter:".dimmed(), if config.apply_filter { "on" } else { "off" }.bright_white());
        eprintln!("  {} {}s\n", "Timeout:".dimmed(), config.fetch.timeout.to_string().bright_white());
    }

    let extractor = HttpExtractor::new(config.fetch.clone()).context("Failed to build HTTP client")?;
    let processor = BatchProcessor::new(extractor, config);
    let output = processor.process(&urls).await.context("Batch processing failed")?;

    if args.verbose {
        echo::print_step(3, 3, "Writing summary");
    }

    if let Some(target) = &args.archive_out {
        let archive = locate_archive(&args.output_dir, &output.run_id).context("Failed to locate run archive")?;
        fs::copy(&archive, target).with_context(|| format!("Failed to copy archive to {}", target.display()))?;
        echo::print_success(&format!("Archive copied to {}", target.display().bright_white()));
    }

    if args.json {
        println!("{}", output.to_json().context("Failed to serialize summary")?);
    } else {
        echo::print_summary(&output);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["folio"]).unwrap();
        assert_eq!(args.input, "-");
        assert_eq!(args.output_dir, PathBuf::from("output"));
        assert_eq!(args.mode, OutputMode::PerArticle);
        assert_eq!(args.timeout, 10);
        assert!(!args.no_filter);
        assert!(args.keep_runs.is_none());
    }

    #[test]
    fn test_args_mode_and_flags() {
        let args = Args::try_parse_from([
            "folio",
            "urls.txt",
            "--mode",
            "combined",
            "--no-filter",
            "--keep-runs",
            "3",
            "-o",
            "/tmp/out",
        ])
        .unwrap();
        assert_eq!(args.input, "urls.txt");
        assert_eq!(args.mode, OutputMode::Combined);
        assert!(args.no_filter);
        assert_eq!(args.keep_runs, Some(3));
        assert_eq!(args.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_args_rejects_unknown_mode() {
        assert!(Args::try_parse_from(["folio", "--mode", "zip"]).is_err());
    }
}
