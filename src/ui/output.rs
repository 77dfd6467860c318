//! Output file writing and console display for chanprobe

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::core::constants::{display, output_formats, syntax};
use crate::core::error::Result;
use crate::reporting::RunSummary;
use crate::ui::color::{Colors, colorize};
use crate::validation::{ProbeResult, RankedList};

/// Serialize a ranked list in the output file format.
///
/// Flat lists are one `name,url` line per channel. Grouped lists put a
/// `# name — count` header before each group.
pub fn render_ranked_list(ranked: &RankedList) -> String {
    let mut out = String::new();

    match ranked {
        RankedList::Flat(entries) => {
            for result in entries {
                push_entry(&mut out, result);
            }
        }
        RankedList::Grouped(groups) => {
            for group in groups {
                out.push_str(&format!(
                    "{} {} — {}\n",
                    syntax::COMMENT_PREFIX,
                    group.name,
                    group.entries.len()
                ));
                for result in &group.entries {
                    push_entry(&mut out, result);
                }
            }
        }
    }

    out
}

fn push_entry(out: &mut String, result: &ProbeResult) {
    out.push_str(&result.candidate.to_string());
    out.push('\n');
}

/// Write the ranked list to `path`, creating parent directories as needed.
/// An empty list still produces an (empty) file.
pub fn write_ranked_list<P: AsRef<Path>>(path: P, ranked: &RankedList) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_ranked_list(ranked))?;
    Ok(())
}

/// Display configuration information in a user-friendly format
pub fn display_config_info(config: &Config, input: &str) {
    let rows = [
        ("Input", input.to_string()),
        ("Output", config.output_path().to_string()),
        ("Concurrency", config.concurrency().to_string()),
        (
            "Timeout (seconds)",
            config.timeout_duration().as_secs().to_string(),
        ),
        ("Ranking", describe_rank_mode(config)),
    ];

    for (label, value) in rows {
        println!(
            "{}: {}",
            colorize(&colorize(label, Colors::BOLD), Colors::BRIGHT_CYAN),
            colorize(&value, Colors::BRIGHT_WHITE)
        );
    }
    println!();
}

fn describe_rank_mode(config: &Config) -> String {
    use crate::validation::RankMode;

    match config.rank_mode() {
        RankMode::Top(n) => format!("top {n}"),
        RankMode::All => "all reachable".to_string(),
        RankMode::Grouped { per_group: None } => "grouped by name".to_string(),
        RankMode::Grouped { per_group: Some(n) } => format!("grouped by name, {n} per group"),
    }
}

/// Print the final results in the requested console format
pub fn display_results(
    ranked: &RankedList,
    summary: &RunSummary,
    output_format: &str,
    quiet: bool,
) {
    match output_format {
        output_formats::JSON => println!("{}", render_json(ranked, summary)),
        output_formats::MINIMAL => print!("{}", render_minimal(ranked)),
        _ => {
            if !quiet {
                print!("{}", render_text(ranked, summary));
            }
        }
    }
}

#[derive(Serialize)]
struct JsonChannel<'a> {
    name: &'a str,
    url: &'a str,
    latency_ms: u64,
    status: Option<u16>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    status: &'a str,
    summary: &'a RunSummary,
    channels: Vec<JsonChannel<'a>>,
}

/// JSON document with the summary and every written channel
pub fn render_json(ranked: &RankedList, summary: &RunSummary) -> String {
    let channels = ranked
        .iter()
        .map(|result| JsonChannel {
            name: &result.candidate.name,
            url: &result.candidate.url,
            latency_ms: result.latency_millis(),
            status: result.outcome.as_ref().ok().and_then(|o| o.status),
        })
        .collect();

    let output = JsonOutput {
        status: if ranked.is_empty() { "empty" } else { "success" },
        summary,
        channels,
    };

    serde_json::to_string(&output).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

/// One `latency_ms name url` line per channel, no decoration
pub fn render_minimal(ranked: &RankedList) -> String {
    ranked
        .iter()
        .map(|result| {
            format!(
                "{} {} {}\n",
                result.latency_millis(),
                result.candidate.name,
                result.candidate.url
            )
        })
        .collect()
}

/// Human-readable ranking and summary
pub fn render_text(ranked: &RankedList, summary: &RunSummary) -> String {
    let mut out = String::new();

    if ranked.is_empty() {
        out.push_str(&format!(
            "{} {}\n",
            display::WARNING_EMOJI,
            colorize("No reachable channels found", Colors::YELLOW)
        ));
    } else {
        let heading = format!(
            "Fastest channels ({} of {} reachable)",
            ranked.len(),
            summary.reachable
        );
        out.push_str(&format!(
            "{} {}\n",
            display::RANKING_EMOJI,
            colorize(&colorize(&heading, Colors::BOLD), Colors::BRIGHT_CYAN)
        ));

        match ranked {
            RankedList::Flat(entries) => push_text_entries(&mut out, entries),
            RankedList::Grouped(groups) => {
                for group in groups {
                    out.push_str(&format!(
                        "\n{} {}\n",
                        colorize(&group.name, Colors::BRIGHT_WHITE),
                        colorize(&format!("({})", group.entries.len()), Colors::DIM)
                    ));
                    push_text_entries(&mut out, &group.entries);
                }
            }
        }
    }

    out.push_str(&format!(
        "\n{} Saved {} channel(s) to {}\n",
        display::FILE_EMOJI,
        summary.written,
        summary.output
    ));

    let emoji = if summary.reachable > 0 {
        display::SUCCESS_EMOJI
    } else {
        display::ERROR_EMOJI
    };
    out.push_str(&format!(
        "{} Probed {} channel(s): {} reachable, {} failed, {} unsupported ({:.1}% success) in {}ms\n",
        emoji,
        summary.probed,
        colorize(&summary.reachable.to_string(), Colors::GREEN),
        colorize(&summary.failed.to_string(), Colors::RED),
        summary.unsupported,
        summary.success_rate,
        summary.duration_ms
    ));

    out
}

fn push_text_entries(out: &mut String, entries: &[ProbeResult]) {
    for (i, result) in entries.iter().enumerate() {
        out.push_str(&format!(
            "{:4}. {} {}\n",
            i + 1,
            colorize("✓", Colors::GREEN),
            result
        ));
    }
}
