// Command-line interface definitions and parsing for chanprobe

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Channel list to probe (one `name,url` per line)
    pub input: Option<String>,

    // Core Options
    /// File the ranked channels are written to (default: fastest_channels.txt)
    #[arg(short = 'o', long, value_name = "FILE", help_heading = "Core Options")]
    pub output: Option<String>,

    /// Per-probe timeout in seconds (default: 3)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        help_heading = "Core Options"
    )]
    pub timeout: Option<u64>,

    /// Probes in flight at once (default: 50)
    #[arg(long, value_name = "COUNT", help_heading = "Core Options")]
    pub concurrency: Option<usize>,

    // Ranking
    /// Keep the N fastest channels (default: 3)
    #[arg(short = 'n', long = "top", value_name = "N", help_heading = "Ranking")]
    pub top: Option<usize>,

    /// Keep every reachable channel
    #[arg(long, help_heading = "Ranking")]
    pub all: bool,

    /// Group channels by name, fastest first within each group
    #[arg(long, help_heading = "Ranking")]
    pub grouped: bool,

    /// Maximum channels kept per group (implies --grouped)
    #[arg(long, value_name = "N", help_heading = "Ranking")]
    pub per_group: Option<usize>,

    // Probing
    /// Request only the first N bytes of HTTP streams
    #[arg(long, value_name = "BYTES", help_heading = "Probing")]
    pub range_bytes: Option<u64>,

    /// Program used to probe rtmp streams (default: ffprobe)
    #[arg(long, value_name = "PATH", help_heading = "Probing")]
    pub ffprobe: Option<String>,

    /// Probe each URL only once
    #[arg(long, help_heading = "Probing")]
    pub dedup: bool,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, default_value = output_formats::DEFAULT, help_heading = "Output & Verbosity")]
    pub format: String,

    /// Disable progress bars
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Network & Security
    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network & Security")]
    pub user_agent: Option<String>,

    /// HTTP/HTTPS proxy URL
    #[arg(long, value_name = "URL", help_heading = "Network & Security")]
    pub proxy: Option<String>,

    /// Skip SSL certificate verification
    #[arg(long, help_heading = "Network & Security")]
    pub insecure: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Write a small sample channel list
    #[command(name = "sample", arg_required_else_help = true)]
    Sample {
        /// Where to write the sample list
        path: String,
    },
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let mut cli_config = CliConfig::default();

    // Core options
    cli_config.timeout = cli.timeout;

    if let Some(concurrency) = cli.concurrency {
        if concurrency > 200 {
            eprintln!(
                "Warning: Concurrency of {concurrency} is quite high and may overwhelm stream servers. Consider using a smaller value."
            );
        }
        cli_config.concurrency = Some(concurrency);
    }

    cli_config.output_path = cli.output.clone();

    // Ranking
    cli_config.top_n = cli.top;
    cli_config.keep_all = cli.all;
    cli_config.per_group = cli.per_group;
    cli_config.grouped = cli.grouped || cli.per_group.is_some();

    // Probing
    cli_config.range_bytes = cli.range_bytes;
    cli_config.ffprobe_path = cli.ffprobe.clone();
    cli_config.dedup = cli.dedup;

    // Output & format
    cli_config.quiet = cli.quiet;
    cli_config.verbose = cli.verbose;
    cli_config.no_progress = cli.no_progress;
    // Leave the default unset so a config file can choose the format
    if cli.format != output_formats::DEFAULT {
        cli_config.output_format = Some(cli.format.clone());
    }

    // Network & security
    cli_config.user_agent = cli.user_agent.clone();
    cli_config.proxy = cli.proxy.clone();
    cli_config.skip_ssl_verification = cli.insecure;

    // Configuration
    cli_config.config_file = cli.config.clone();
    cli_config.no_config = cli.no_config;

    cli_config
}
