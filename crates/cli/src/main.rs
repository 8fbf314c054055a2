use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use homedigest_core::{
    Digest, DigestConfig, DigestPage, JsonConfig, PreprocessConfig, Region, TsvFormatter, collect_inputs,
    convert_to_json, read_page, read_stdin,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

mod echo;

use echo::{
    format_size, print_banner, print_error, print_info, print_stats_summary, print_step, print_success, print_timing,
    print_warning,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the listings table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Tsv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" | "tab" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: tsv, json", s)),
        }
    }
}

/// Extract property listings from archived real-estate email digest pages
#[derive(Parser, Debug)]
#[command(name = "homedigest")]
#[command(author = "homedigest contributors")]
#[command(version)]
#[command(about = "Extract property listings from archived email digest pages", long_about = None)]
struct Args {
    /// Digest pages or directories of pages, or "-" for stdin
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (tsv, json)
    #[arg(short, long, default_value = "tsv", value_name = "FORMAT")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Print parse statistics to stderr
    #[arg(long)]
    stats: bool,

    /// State code location patterns accept
    #[arg(long, default_value = "WA", value_name = "STATE")]
    state: String,

    /// Leading zip digits location patterns accept
    #[arg(long, default_value = "98", value_name = "DIGITS")]
    zip_prefix: String,

    /// Levels the fallback walk examines, counting the listing scope
    #[arg(long, default_value = "5", value_name = "NUM")]
    fallback_levels: usize,

    /// Parse pages exactly as written, without markup cleanup
    #[arg(long)]
    no_preprocess: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

/// Read every input, reporting unreadable ones without stopping.
fn read_inputs(inputs: &[String], verbose: bool) -> Vec<DigestPage> {
    let mut pages = Vec::new();

    for input in inputs {
        if input == "-" {
            match read_stdin() {
                Ok(page) => pages.push(page),
                Err(e) => print_error(&format!("Failed to read from stdin: {}", e)),
            }
            continue;
        }

        let files = match collect_inputs(&[PathBuf::from(input)]) {
            Ok(files) => files,
            Err(e) => {
                print_error(&format!("Skipping {}: {}", input, e));
                continue;
            }
        };
        if files.is_empty() {
            print_warning(&format!("No digest pages in {}", input));
        }

        for file in files {
            match read_page(&file) {
                Ok(page) => {
                    if verbose {
                        eprintln!("  {} {}", file.display().bright_white(), format_size(page.html.len()).dimmed());
                    }
                    if page.lossy {
                        print_warning(&format!("{} is not valid UTF-8; undecodable bytes replaced", file.display()));
                    }
                    pages.push(page);
                }
                Err(e) => print_error(&format!("Skipping {}: {}", file.display(), e)),
            }
        }
    }

    pages
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
        print_step(1, 3, "Reading digest pages");
    }

    let pages = read_inputs(&args.inputs, args.verbose);
    if pages.is_empty() {
        anyhow::bail!("No readable input among {} path(s)", args.inputs.len());
    }

    let config = DigestConfig::builder()
        .region(Region { state: args.state.clone(), zip_prefix: args.zip_prefix.clone() })
        .max_fallback_levels(args.fallback_levels)
        .preprocess(if args.no_preprocess { PreprocessConfig::disabled() } else { PreprocessConfig::default() })
        .build();
    let digest = Digest::with_config(config).context("Invalid extraction settings")?;

    if args.verbose {
        eprintln!();
        print_step(2, 3, &format!("Extracting listings from {} page(s)", pages.len()));
    }

    let started = Instant::now();
    let dataset = digest.run(pages).context("Failed to extract listings")?;

    if args.verbose {
        print_timing("Extraction", started.elapsed());
        eprintln!(
            "  {} {}",
            "Listings:".dimmed(),
            dataset.listings.len().to_string().bright_white()
        );
        eprintln!();
        print_step(3, 3, "Writing output");
        eprintln!("  {} {}", "Format:".dimmed(), format!("{:?}", args.format).bright_white());
        eprintln!();
    }

    let output = match args.format {
        OutputFormat::Tsv => TsvFormatter::new().convert(&dataset.listings).context("Failed to render TSV")?,
        OutputFormat::Json => {
            let config = JsonConfig { include_stats: true, pretty: args.pretty };
            let mut rendered = convert_to_json(&dataset, &config).context("Failed to render JSON")?;
            rendered.push('\n');
            rendered
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!(
                "{} listings written to {}",
                dataset.listings.len(),
                path.display().bright_white()
            ));
        }
        None => {
            print!("{}", output);
        }
    }

    if args.stats {
        print_stats_summary(&dataset);
    }

    Ok(())
}
