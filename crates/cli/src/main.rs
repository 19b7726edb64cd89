mod echo;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use hnsift_core::{
    DEFAULT_BASE_URL, Entry, FetchConfig, JsonConfig, JsonFormatter, MarkdownConfig, SelectConfig, SiftConfig, Sifter,
    SortOrder, TextConfig, convert_to_markdown, convert_to_text, fetch_file, fetch_stdin,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use url::Url;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for selected entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(format!("Invalid format: {}. Valid options: text, json, markdown", s)),
        }
    }
}

/// List the best-scoring stories from a news front page
#[derive(Parser, Debug)]
#[command(name = "hnsift")]
#[command(author = "hnsift Contributors")]
#[command(version)]
#[command(about = "List the best-scoring stories from a news front page", long_about = None)]
struct Args {
    /// Local HTML file or "-" for stdin (default: fetch --url)
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Listing URL to fetch when no INPUT is given
    #[arg(long, default_value = DEFAULT_BASE_URL, value_name = "URL")]
    url: String,

    /// Number of pages to fetch (values below 1 fetch one page)
    #[arg(short, long, default_value = "1", value_name = "NUM", allow_negative_numbers = true)]
    pages: i64,

    /// Minimum score for a story to be listed
    #[arg(short, long, default_value = "100", value_name = "POINTS")]
    threshold: u32,

    /// Keep page order instead of sorting by score
    #[arg(long)]
    unordered: bool,

    /// Sort lowest score first
    #[arg(long, conflicts_with = "unordered")]
    ascending: bool,

    /// Attempts per page before giving up
    #[arg(long, default_value = "6", value_name = "NUM")]
    attempts: u32,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "3", value_name = "SECS")]
    timeout: u64,

    /// Delay between page requests in milliseconds
    #[arg(long, default_value = "75", value_name = "MS")]
    delay_ms: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Output format (text, json, markdown)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Emit a JSON object keyed by position (JSON only)
    #[arg(long)]
    keyed: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,
}

impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.keyed && self.format != OutputFormat::Json {
            anyhow::bail!("--keyed is only supported with --format json");
        }
        Ok(())
    }

    fn sift_config(&self) -> SiftConfig {
        let defaults = FetchConfig::default();
        let fetch = FetchConfig {
            base_url: self.url.clone(),
            max_attempts: self.attempts,
            timeout: self.timeout,
            page_delay: Duration::from_millis(self.delay_ms),
            user_agent: self.user_agent.clone().unwrap_or_else(|| defaults.user_agent.clone()),
            ..defaults
        };

        let select = SelectConfig::builder()
            .threshold(self.threshold)
            .ordered(!self.unordered)
            .order(if self.ascending { SortOrder::Ascending } else { SortOrder::Descending })
            .build();

        SiftConfig { fetch, select }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "hnsift_core=debug,hnsift=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn render(entries: &[Entry], args: &Args) -> anyhow::Result<String> {
    let output = match args.format {
        OutputFormat::Text => convert_to_text(entries, &TextConfig { numbered: true, include_header: true }),
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(JsonConfig { keyed: args.keyed, pretty: true });
            let mut json = formatter.convert(entries).context("Failed to serialize entries")?;
            json.push('\n');
            json
        }
        OutputFormat::Markdown => {
            let config = MarkdownConfig { heading: None, base_url: Url::parse(&args.url).ok() };
            convert_to_markdown(entries, &config)
        }
    };

    Ok(output)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "hnsift", &mut io::stdout());
        return Ok(());
    }

    args.validate()?;
    init_tracing(args.verbose);

    let start = Instant::now();
    let mut timings: Vec<(String, Duration)> = Vec::new();

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let sifter = Sifter::with_config(args.sift_config());

    let entries = match args.input.as_deref() {
        Some(input) => {
            let step_start = Instant::now();
            let html = if input == "-" {
                if args.verbose {
                    echo::print_step(1, 3, "Reading from stdin");
                }
                fetch_stdin().context("Failed to read from stdin")?
            } else {
                if args.verbose {
                    echo::print_step(1, 3, &format!("Reading from file {}", input.bright_white()));
                }
                fetch_file(input).with_context(|| format!("Failed to read file: {}", input))?
            };
            timings.push(("Read".to_string(), step_start.elapsed()));

            if args.verbose {
                eprintln!("  {} {}\n", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
                echo::print_step(2, 3, "Selecting entries");
            }

            let step_start = Instant::now();
            let entries = sifter.sift_html(&html).context("Failed to select entries")?;
            timings.push(("Select".to_string(), step_start.elapsed()));
            entries
        }
        None => {
            if args.verbose {
                echo::print_step(
                    1,
                    3,
                    &format!("Fetching {} page(s) from {}", args.pages, args.url.bright_white().underline()),
                );
            }

            let step_start = Instant::now();
            let report = sifter.fetch_and_sift(args.pages).context("Failed to fetch listing")?;
            timings.push(("Fetch and select".to_string(), step_start.elapsed()));

            echo::print_page_failures(&report.failures);
            if args.verbose {
                echo::print_fetch_summary(&report);
                echo::print_step(2, 3, "Selected entries");
            }
            report.entries
        }
    };

    if args.verbose {
        eprintln!(
            "  {} {}\n",
            "Entries:".dimmed(),
            entries.len().to_string().bright_white()
        );
        echo::print_step(3, 3, "Writing output");
    }

    let output = render(&entries, &args)?;

    match &args.output {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    if args.verbose {
        echo::print_timing_summary(start.elapsed(), &timings);
    }

    Ok(())
}
