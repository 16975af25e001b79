mod analysis;
mod cache;
mod config;
mod display;
mod error;
mod loader;

use analysis::fighter_stats::{self, FighterCareerStats};
use cache::TableCache;
use clap::Parser;
use config::Config;
use display::output::{
    display_comparison, display_dataset_summary, display_error, display_fight_history,
    display_fighter_card, display_fighter_list, display_info, display_insights,
    display_method_breakdown, display_method_counts, display_success,
};
use error::AppError;
use indicatif::ProgressBar;
use loader::records::LoadReport;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ComparisonExport {
    fighters: Vec<FighterCareerStats>,
}

#[derive(Parser, Debug)]
#[command(name = "Octagon Stats")]
#[command(about = "Compare fighter careers from a historical UFC bout log", long_about = None)]
struct Args {
    /// First fighter to compare
    #[arg(required_unless_present_any = ["list", "methods"])]
    fighter1: Option<String>,

    /// Second fighter to compare
    #[arg(required_unless_present_any = ["list", "methods"])]
    fighter2: Option<String>,

    /// Bout log CSV (overrides UFC_DATA_PATH)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Recent bouts to show per fighter (default: 10)
    #[arg(short, long)]
    recent: Option<usize>,

    /// List every fighter on record and exit
    #[arg(long)]
    list: bool,

    /// Show the finish-method distribution and exit
    #[arg(long)]
    methods: bool,

    /// Emit career stats as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Reload the bout log even if cached
    #[arg(long)]
    refresh: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(data) = args.data {
        config.data_path = data;
    }
    if let Some(recent) = args.recent {
        config.recent_limit = recent;
    }

    // JSON mode keeps stdout clean for piping.
    let quiet = args.json;

    let mut table_cache = TableCache::new();
    if args.refresh {
        table_cache.invalidate();
    }

    let report = load_table(&mut table_cache, &config.data_path, quiet)?;

    if !quiet {
        display_success(&format!(
            "Loaded {} bouts from {}",
            report.table.len(),
            config.data_path.display()
        ));
        display_dataset_summary(&report);
    }

    if report.table.is_empty() {
        return Err(AppError::EmptyTable);
    }

    if args.list {
        display_fighter_list(&report.table.fighter_names());
        return Ok(());
    }

    if args.methods {
        display_method_counts(&report.table.method_counts());
        return Ok(());
    }

    let (Some(first_name), Some(second_name)) =
        (args.fighter1.as_deref(), args.fighter2.as_deref())
    else {
        return Err(AppError::InvalidSelection(
            "two fighter names are required for a comparison".to_string(),
        ));
    };

    if first_name == second_name {
        return Err(AppError::InvalidSelection(format!(
            "{} cannot be compared against themself",
            first_name
        )));
    }

    if !quiet {
        display_info(&format!("Comparing {} vs {}", first_name, second_name));
    }

    let first = fighter_stats::aggregate(&report.table, first_name)
        .ok_or_else(|| AppError::UnknownFighter(first_name.to_string()))?;
    let second = fighter_stats::aggregate(&report.table, second_name)
        .ok_or_else(|| AppError::UnknownFighter(second_name.to_string()))?;

    if args.json {
        let export = ComparisonExport {
            fighters: vec![first, second],
        };
        let encoded = serde_json::to_string_pretty(&export)
            .map_err(|e| AppError::ExportError(e.to_string()))?;
        println!("{}", encoded);
        return Ok(());
    }

    // Display results
    display_fighter_card(&first);
    display_method_breakdown(&first);
    display_fighter_card(&second);
    display_method_breakdown(&second);
    display_comparison(&first, &second);
    display_insights(&first, &second);
    display_fight_history(&first, config.recent_limit);
    display_fight_history(&second, config.recent_limit);

    Ok(())
}

fn load_table(
    table_cache: &mut TableCache,
    path: &Path,
    quiet: bool,
) -> Result<Arc<LoadReport>, AppError> {
    if quiet {
        return table_cache.fetch(path);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Reading bout log from {}", path.display()));
    spinner.enable_steady_tick(Duration::from_millis(80));
    let report = table_cache.fetch(path);
    spinner.finish_and_clear();
    report
}
