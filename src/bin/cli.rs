//! Wildlife Health Watch CLI
//!
//! Command-line interface for surveillance operations:
//! - Generate synthetic datasets
//! - Print headline metrics and breakdowns for a filter
//! - List recent cases
//! - Check API server status

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use wildwatch::api::dto::FilterParams;
use wildwatch::api::routes::export::{encode_records, ExportFormat};
use wildwatch::config::{generate_default_config, Config};
use wildwatch::pipeline::{filter, Dashboard};
use wildwatch::surveillance::{Dataset, SamplingProfile, SurveillanceRecord};

#[derive(Parser)]
#[command(name = "wildwatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Wildlife syndromic surveillance toolkit")]
#[command(long_about = "Wildlife Health Watch generates synthetic surveillance records\nand summarises them the way the dashboard does.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8090", global = true)]
    pub api_url: String,

    /// Output format (table, json, csv, ndjson)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

/// Dataset overrides; unset flags fall back to the loaded config
#[derive(Args)]
pub struct DatasetArgs {
    /// Number of records
    #[arg(short = 'n', long)]
    records: Option<usize>,
    /// RNG seed
    #[arg(short, long)]
    seed: Option<u64>,
    /// Sampling profile (uniform, field)
    #[arg(long)]
    profile: Option<SamplingProfile>,
}

/// Filter flags; list values are comma-separated catalog names
#[derive(Args)]
pub struct FilterArgs {
    /// First report date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,
    /// Last report date (YYYY-MM-DD)
    #[arg(long)]
    end: Option<String>,
    #[arg(long)]
    regions: Option<String>,
    #[arg(long)]
    species: Option<String>,
    #[arg(long)]
    syndromes: Option<String>,
    #[arg(long)]
    severities: Option<String>,
    #[arg(long)]
    statuses: Option<String>,
}

impl From<FilterArgs> for FilterParams {
    fn from(args: FilterArgs) -> Self {
        FilterParams {
            start: args.start,
            end: args.end,
            regions: args.regions,
            species: args.species,
            syndromes: args.syndromes,
            severities: args.severities,
            statuses: args.statuses,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a synthetic dataset
    Generate {
        #[command(flatten)]
        dataset: DatasetArgs,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Headline metrics and category breakdowns for a filter
    Summary {
        #[command(flatten)]
        dataset: DatasetArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Most recent cases matching a filter
    Cases {
        #[command(flatten)]
        dataset: DatasetArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Rows to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show API server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { dataset, output } => {
            let dataset = build_dataset(&dataset)?;
            let format = match cli.format.as_str() {
                // no table rendering for a full dump
                "table" => ExportFormat::Csv,
                other => ExportFormat::parse(other)?,
            };

            let selection: Vec<&SurveillanceRecord> = dataset.records().iter().collect();
            let bytes = encode_records(&selection, format)?;

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &bytes)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    eprintln!("Wrote {} to {:?}", dataset.info(), path);
                }
                None => {
                    print!("{}", String::from_utf8_lossy(&bytes));
                }
            }
        }

        Commands::Summary {
            dataset,
            filter: filter_args,
        } => {
            let dataset = build_dataset(&dataset)?;
            let criteria = FilterParams::from(filter_args).to_criteria(dataset.window())?;
            let dashboard = Dashboard::build(&dataset, &criteria)?;

            match SummaryFormat::parse(&cli.format)? {
                SummaryFormat::Json => {
                    let body = serde_json::json!({
                        "summary": dashboard.summary,
                        "species": dashboard.species,
                        "syndromes": dashboard.syndromes,
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                SummaryFormat::Table => print_summary(&dataset, &dashboard),
            }
        }

        Commands::Cases {
            dataset,
            filter: filter_args,
            limit,
        } => {
            let dataset = build_dataset(&dataset)?;
            let criteria = FilterParams::from(filter_args).to_criteria(dataset.window())?;
            let selection = filter(dataset.records(), &criteria)?;
            let recent = wildwatch::pipeline::recent_cases(&selection, limit);

            match cli.format.as_str() {
                "table" => print_cases(&recent, selection.len()),
                other => {
                    let rows: Vec<&SurveillanceRecord> = recent.iter().collect();
                    let bytes = encode_records(&rows, ExportFormat::parse(other)?)?;
                    print!("{}", String::from_utf8_lossy(&bytes));
                }
            }
        }

        Commands::Status => {
            let client = reqwest::Client::new();
            let response = client
                .get(format!("{}/health", cli.api_url))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("Wildlife Health Watch v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );

                    if let Some(dataset) = health.get("dataset") {
                        println!();
                        println!("Dataset:");
                        if let Some(records) = dataset["records"].as_u64() {
                            println!("  Records: {}", records);
                        }
                        if let Some(seed) = dataset["seed"].as_u64() {
                            println!("  Seed:    {}", seed);
                        }
                        if let (Some(start), Some(end)) = (
                            dataset["window_start"].as_str(),
                            dataset["window_end"].as_str(),
                        ) {
                            println!("  Window:  {} to {}", start, end);
                        }
                    }

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    bail!("API returned error: {}", resp.status());
                }
                Err(e) => {
                    eprintln!("Make sure the API server is running:");
                    eprintln!("  cargo run --bin wildwatch");
                    return Err(e).context(format!(
                        "Cannot connect to Wildlife Health Watch API at {}",
                        cli.api_url
                    ));
                }
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Output formats the summary command can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SummaryFormat {
    Table,
    Json,
}

impl SummaryFormat {
    fn parse(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(SummaryFormat::Table),
            "json" => Ok(SummaryFormat::Json),
            other => bail!("Unsupported summary format: {} (use table or json)", other),
        }
    }
}

fn build_dataset(args: &DatasetArgs) -> anyhow::Result<Dataset> {
    let config = Config::load_default().dataset;

    let records = args.records.unwrap_or(config.records);
    let seed = args.seed.unwrap_or(config.seed);
    let mut generator = config.generator_config()?;
    if let Some(profile) = args.profile {
        generator.profile = profile;
    }

    Dataset::generate(records, seed, generator).context("Dataset generation failed")
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn print_summary(dataset: &Dataset, dashboard: &Dashboard) {
    let summary = &dashboard.summary;

    println!("{}", dataset.info());
    println!();
    println!("{:<22} {}", "Total cases", summary.total_cases);
    println!("{:<22} {}", "Active alerts", summary.active_alerts);
    println!("{:<22} {}", "Critical cases", summary.critical_cases);
    println!("{:<22} {}", "Animals affected", summary.animals_affected);
    println!("{:<22} {}", "Regions affected", summary.regions_affected);
    println!("{:<22} {}", "Cases (last 30 days)", summary.cases_last_30_days);

    if summary.total_cases == 0 {
        println!();
        println!("No cases match the selected filters");
        return;
    }

    for (title, counts) in [("Species", &dashboard.species), ("Syndromes", &dashboard.syndromes)] {
        println!();
        println!("{:<22} {:>6}", title, "Cases");
        println!("{}", "-".repeat(29));
        for row in counts {
            println!("{:<22} {:>6}", row.label, row.count);
        }
    }
}

fn print_cases(recent: &[SurveillanceRecord], matched: usize) {
    if recent.is_empty() {
        println!("No cases match the selected filters");
        return;
    }

    println!(
        "{:<14} {:<10} {:<12} {:<17} {:<16} {:<9} {:>7}  {}",
        "Case", "Date", "Region", "Species", "Syndrome", "Severity", "Animals", "Status"
    );
    println!("{}", "-".repeat(100));

    for r in recent {
        println!(
            "{:<14} {:<10} {:<12} {:<17} {:<16} {:<9} {:>7}  {}",
            r.case_id,
            r.date.format("%Y-%m-%d"),
            r.region,
            r.species,
            r.syndrome,
            r.severity,
            r.animal_count,
            r.status
        );
    }

    println!();
    println!("Showing {} of {} matching cases", recent.len(), matched);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_format_parse() {
        assert_eq!(SummaryFormat::parse("table").unwrap(), SummaryFormat::Table);
        assert_eq!(SummaryFormat::parse("JSON").unwrap(), SummaryFormat::Json);
        assert!(SummaryFormat::parse("csv").is_err());
        assert!(SummaryFormat::parse("ndjson").is_err());
    }
}
