use chanprobe::config::{CliConfig, Config};
use chanprobe::core::ChanProbeError;
use chanprobe::core::constants::output_formats;
use chanprobe::discovery::{self, ParsedList};
use chanprobe::reporting::{RunSummary, logging};
use chanprobe::ui::output;
use chanprobe::ui::{Cli, Commands, ProgressReporter, cli_to_config, print_completions};
use chanprobe::validation::{ProbeBatch, ProbeChannels, ProbePipeline, RankedList, rank};
use clap::{CommandFactory, Parser};

use std::path::Path;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle subcommands first
    if let Some(exit_code) = handle_special_commands(&cli) {
        std::process::exit(exit_code);
    }

    if cli.input.is_none() {
        eprintln!("Error: No input file provided");
        eprintln!("\nFor more information, try '--help'.");
        std::process::exit(1);
    }

    match run_chanprobe_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle subcommands and return exit code if one was processed
pub fn handle_special_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Some(Commands::CompletionGenerate { shell }) => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        Some(Commands::Sample { ref path }) => match discovery::write_sample_file(path) {
            Ok(count) => {
                println!("Wrote {count} sample channels to {path}");
                Some(0)
            }
            Err(e) => {
                eprintln!("Error: {e}");
                Some(1)
            }
        },
        None => None,
    }
}

/// Main probing logic extracted from main() for testing
pub async fn run_chanprobe_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let cli_config = cli_to_config(cli);
    // Config files can turn on verbose output, the level is settled below
    logging::init_logger(cli_config.verbose, cli_config.quiet);

    let config = load_and_merge_config(&cli_config)?;
    config.validate().inspect_err(|e| {
        logging::log_error("Invalid configuration", Some(e));
    })?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::set_verbosity(output_settings.verbose, output_settings.quiet);
    logging::log_config_info(&config);

    let input = cli
        .input
        .as_deref()
        .ok_or_else(|| ChanProbeError::InvalidArgument("No input file provided".to_string()))?;

    if output_settings.should_show_config_info() {
        output::display_config_info(&config, input);
    }

    let parsed = read_and_parse_input(input)?;
    let candidates = if config.dedup.unwrap_or(false) {
        ProbePipeline::deduplicate(parsed.candidates.clone())
    } else {
        parsed.candidates.clone()
    };

    let mut progress = create_progress_reporter(&output_settings);
    let batch = probe_candidates(candidates, &config, progress.as_mut()).await?;
    finalize_progress_reporter(progress);

    let ranked = rank(batch.results.clone(), config.rank_mode());
    let output_path = config.output_path();
    write_output(output_path, &ranked)?;

    let summary = RunSummary::new(input, output_path, &parsed.stats, &batch, started.elapsed())
        .with_written(ranked.len());

    output::display_results(
        &ranked,
        &summary,
        &output_settings.output_format,
        output_settings.quiet,
    );

    Ok(0)
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // CLI takes precedence
    config.merge_with_cli(cli_config);
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
    pub show_progress: bool,
}

impl OutputSettings {
    pub fn should_show_config_info(&self) -> bool {
        !self.quiet && self.verbose && self.output_format == output_formats::TEXT
    }
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let verbose = config.verbose.unwrap_or(false);
    let output_format = config
        .output_format
        .as_deref()
        .unwrap_or(output_formats::DEFAULT)
        .to_string();
    let show_progress = !quiet && !cli_config.no_progress;

    OutputSettings {
        quiet,
        verbose,
        output_format,
        show_progress,
    }
}

/// Read the channel list and parse it into candidates
pub fn read_and_parse_input(input: &str) -> Result<ParsedList, Box<dyn std::error::Error>> {
    let lines = discovery::read_lines(input).inspect_err(|e| {
        logging::log_error(&format!("Could not read input '{input}'"), Some(e));
    })?;
    logging::log_input_info(input, lines.lines.len(), lines.lossy);

    let parsed = discovery::parse_lines(lines.lines);
    logging::log_parse_stats(&parsed.stats);

    Ok(parsed)
}

/// Create the per-probe reporter for text output, with the bar only when progress is shown
pub fn create_progress_reporter(output_settings: &OutputSettings) -> Option<ProgressReporter> {
    if !output_settings.quiet && output_settings.output_format == output_formats::TEXT {
        Some(ProgressReporter::new(output_settings.show_progress))
    } else {
        None
    }
}

/// Probe every candidate with the configured pipeline
pub async fn probe_candidates(
    candidates: Vec<chanprobe::Candidate>,
    config: &Config,
    progress: Option<&mut ProgressReporter>,
) -> Result<ProbeBatch, Box<dyn std::error::Error>> {
    let pipeline = ProbePipeline::from_config(config).inspect_err(|e| {
        logging::log_error("Could not build the HTTP client", Some(e));
    })?;

    logging::log_probe_start(candidates.len(), pipeline.concurrency());

    let start_time = Instant::now();
    let batch = pipeline.probe_channels(candidates, progress).await;

    logging::log_probe_complete(
        batch.probed(),
        batch.reachable(),
        batch.unsupported,
        start_time.elapsed().as_millis(),
    );

    Ok(batch)
}

/// Finalize progress reporting
pub fn finalize_progress_reporter(progress: Option<ProgressReporter>) {
    if let Some(ref progress) = progress {
        progress.finish_and_clear();
    }
}

/// Write the ranked list, logging where it went
pub fn write_output(path: &str, ranked: &RankedList) -> Result<(), Box<dyn std::error::Error>> {
    output::write_ranked_list(Path::new(path), ranked).inspect_err(|e| {
        logging::log_error(&format!("Could not write output '{path}'"), Some(e));
    })?;
    log::info!("Wrote {} channel(s) to {path}", ranked.len());
    Ok(())
}
