//! carbonscribe CLI: carbon-footprint estimates from plain-language activity logs.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use carbonscribe::config::EngineConfig;
use carbonscribe::engine::FootprintEngine;
use carbonscribe::factors::{
    self, ELECTRICITY_FACTOR, FOOD, FactorTable, PLASTIC, SHOPPING, SHOPPING_COST_PER_KG,
    TREE_ABSORPTION_KG, WATER,
};

#[derive(Parser)]
#[command(
    name = "carbonscribe",
    version,
    about = "Carbon-footprint estimates from plain-language activity logs"
)]
struct Cli {
    /// Engine configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Alias table (TOML, or JSON by extension). Overrides the config file.
    #[arg(long, global = true)]
    aliases: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one activity description.
    Analyze {
        /// Description to score. Read from stdin when omitted.
        text: Option<String>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Score a file of descriptions, one per line, in parallel.
    Batch {
        /// Input file.
        #[arg(long)]
        file: PathBuf,

        /// Print the reports as a JSON array.
        #[arg(long)]
        json: bool,
    },

    /// Show the alias-normalized form of a description.
    Normalize {
        /// Description to normalize.
        text: String,
    },

    /// List the emission-factor tables.
    Factors,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    // Default to warn so --json output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Factors => print_factors(),

        Commands::Analyze { text, json } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf).into_diagnostic()?;
                    buf
                }
            };
            if text.trim().is_empty() {
                miette::bail!("no activity description given");
            }
            let engine = build_engine(cli.config, cli.aliases)?;
            let report = engine.analyze(&text)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
            } else {
                println!("{report}");
            }
        }

        Commands::Batch { file, json } => {
            let content = std::fs::read_to_string(&file).into_diagnostic()?;
            let inputs: Vec<&str> = content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();
            if inputs.is_empty() {
                miette::bail!("{} contains no activity descriptions", file.display());
            }
            let engine = build_engine(cli.config, cli.aliases)?;
            let reports = engine
                .analyze_batch(&inputs)
                .into_iter()
                .collect::<Result<Vec<_>, _>>()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
            } else {
                for (input, report) in inputs.iter().zip(&reports) {
                    println!("{input}");
                    println!(
                        "  total: {} kg CO₂, trees: {}",
                        report.total(),
                        report.trees_required()
                    );
                }
            }
        }

        Commands::Normalize { text } => {
            let engine = build_engine(cli.config, cli.aliases)?;
            let normalized = engine.normalize(&text)?;
            println!("{}", normalized.text);
            for matched in &normalized.matched {
                println!("  {}: {}", matched.category, matched.label);
            }
        }
    }

    Ok(())
}

fn build_engine(config: Option<PathBuf>, aliases: Option<PathBuf>) -> Result<FootprintEngine> {
    let mut config = match config {
        Some(path) => EngineConfig::load(&path)?,
        None => EngineConfig::default(),
    };
    if aliases.is_some() {
        config.alias_file = aliases;
    }
    Ok(FootprintEngine::new(config)?)
}

fn print_table(table: &FactorTable, unit: &str) {
    println!("{} ({unit}):", table.name());
    for (key, factor) in table.entries() {
        println!("  {key:<20} {factor}");
    }
}

fn print_factors() {
    for group in &factors::TRANSPORT_GROUPS {
        print_table(group, "kg CO₂ per km");
    }
    println!("electricity (kg CO₂ per kWh): {ELECTRICITY_FACTOR}");
    print_table(&FOOD, "kg CO₂ per kg");
    print_table(&SHOPPING, "kg CO₂ per kg");
    print_table(&SHOPPING_COST_PER_KG, "rs per kg");
    print_table(&WATER, "kg CO₂ per 100 l");
    print_table(&PLASTIC, "kg CO₂ per kg");
    println!("tree absorption: {TREE_ABSORPTION_KG} kg CO₂ per tree");
}
