//! Trade Toolkit CLI - Command line interface for the option trading tools.
//!
//! Every command prints a JSON envelope (`ok`, `data`, `error`) on stdout.
//! Logs go to stderr.

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::fmt::Display;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trade_toolkit::{
    calculator::{calculate, coerce_number, CalculatorInputs},
    gann::{self, list_presets, require_preset, GannResult},
    journal::{NewTrade, TradeJournal, TradeStatus},
    ApiResponse, Config,
};

#[derive(Parser)]
#[command(name = "trade-toolkit")]
#[command(about = "Option trading toolkit - P&L calculator, paper trades and Gann levels")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.trade-toolkit/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate stop loss, target and P&L for a premium
    Calc {
        /// Premium per unit
        #[arg(short, long, allow_hyphen_values = true)]
        premium: Option<String>,
        /// Units per lot
        #[arg(short, long, allow_hyphen_values = true)]
        lot_size: Option<String>,
        /// Stop loss as a percentage of the premium
        #[arg(short, long, allow_hyphen_values = true)]
        stop_loss_percent: Option<String>,
        /// Target as a multiple of the stop loss distance
        #[arg(short, long, allow_hyphen_values = true)]
        target_multiplier: Option<String>,
    },
    /// Paper trade journal commands
    Paper {
        #[command(subcommand)]
        action: PaperAction,
    },
    /// Gann level commands
    Gann {
        #[command(subcommand)]
        action: GannAction,
    },
}

#[derive(Subcommand)]
enum PaperAction {
    /// Record a new paper trade
    Add {
        /// Option type (CE/PE)
        #[arg(short, long)]
        option_type: String,
        /// Strike price
        #[arg(short, long)]
        strike: String,
        /// Premium per unit
        #[arg(short, long)]
        premium: String,
        /// Lot size (defaults to 20)
        #[arg(short, long)]
        lot_size: Option<String>,
    },
    /// List trades with totals
    List,
    /// Show journal totals
    Totals,
    /// Mark a trade as having hit its target
    Done {
        #[arg(short, long)]
        id: i64,
    },
    /// Mark a trade as stopped out
    Close {
        #[arg(short, long)]
        id: i64,
    },
    /// Permanently delete a trade
    Delete {
        #[arg(short, long)]
        id: i64,
    },
}

#[derive(clap::Args)]
struct GannArgs {
    /// Index price, e.g. 85698 or 85,698.25
    #[arg(short, long, allow_hyphen_values = true)]
    price: String,
    /// Step preset id or name
    #[arg(long)]
    preset: Option<String>,
    /// Rounding mode: round, floor or ceil
    #[arg(short, long)]
    rounding: Option<String>,
}

#[derive(Subcommand)]
enum GannAction {
    /// Calculate Gann levels
    Levels {
        #[command(flatten)]
        args: GannArgs,
    },
    /// List step presets
    Presets,
    /// Print levels as CSV
    Csv {
        #[command(flatten)]
        args: GannArgs,
    },
    /// Write levels to a CSV file
    Export {
        #[command(flatten)]
        args: GannArgs,
        /// Output file (defaults to a timestamped name in the export directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    // Initialize logging
    let log_level = match &loaded {
        Ok(config) => config.log_level.clone(),
        Err(_) => Config::default().log_level,
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match config_or_envelope(loaded) {
        Ok(config) => config,
        Err(envelope) => {
            println!("{}", envelope);
            return Ok(());
        }
    };

    let output = match cli.command {
        Commands::Calc {
            premium,
            lot_size,
            stop_loss_percent,
            target_multiplier,
        } => handle_calc(premium, lot_size, stop_loss_percent, target_multiplier),
        Commands::Paper { action } => handle_paper(&config, action),
        Commands::Gann { action } => handle_gann(&config, action),
    };

    println!("{}", output);
    Ok(())
}

/// Turn a config load failure into an error envelope.
fn config_or_envelope(
    loaded: trade_toolkit::Result<Config>,
) -> std::result::Result<Config, String> {
    loaded.map_err(|e| {
        tracing::error!(error = %e, "failed to load config");
        err(format!("failed to load config: {}", e))
    })
}

fn render<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string_pretty(response)
        .unwrap_or_else(|e| json!({ "ok": false, "error": e.to_string() }).to_string())
}

fn ok<T: Serialize>(data: T) -> String {
    render(&ApiResponse::ok(data))
}

fn err(error: impl Display) -> String {
    render(&ApiResponse::<()>::err(error.to_string()))
}

fn handle_calc(
    premium: Option<String>,
    lot_size: Option<String>,
    stop_loss_percent: Option<String>,
    target_multiplier: Option<String>,
) -> String {
    let mut inputs = CalculatorInputs::default();
    if let Some(raw) = premium {
        inputs.premium = coerce_number(&raw);
    }
    if let Some(raw) = lot_size {
        inputs.lot_size = coerce_number(&raw);
    }
    if let Some(raw) = stop_loss_percent {
        inputs.stop_loss_percent = coerce_number(&raw);
    }
    if let Some(raw) = target_multiplier {
        inputs.target_multiplier = coerce_number(&raw);
    }

    ok(json!({
        "inputs": inputs,
        "results": calculate(&inputs),
    }))
}

fn handle_paper(config: &Config, action: PaperAction) -> String {
    let mut journal = match TradeJournal::open(config.journal_store()) {
        Ok(journal) => journal,
        Err(e) => return err(e),
    };

    match action {
        PaperAction::Add {
            option_type,
            strike,
            premium,
            lot_size,
        } => {
            let mut form = NewTrade::new(&option_type, &strike, &premium);
            if let Some(lot) = lot_size {
                form = form.with_lot_size(&lot);
            }
            match journal.add_trade(&form) {
                Ok(trade) => ok(json!({
                    "trade": trade,
                    "totals": journal.totals(),
                })),
                Err(e) => err(e),
            }
        }
        PaperAction::List => ok(json!({
            "trades": journal.trades(),
            "totals": journal.totals(),
        })),
        PaperAction::Totals => ok(journal.totals()),
        PaperAction::Done { id } => mark(&mut journal, id, TradeStatus::Done),
        PaperAction::Close { id } => mark(&mut journal, id, TradeStatus::Close),
        PaperAction::Delete { id } => match journal.delete(id) {
            Ok(removed) => ok(json!({
                "removed": removed,
                "totals": journal.totals(),
            })),
            Err(e) => err(e),
        },
    }
}

fn mark<S: trade_toolkit::TradeStore>(
    journal: &mut TradeJournal<S>,
    id: i64,
    status: TradeStatus,
) -> String {
    match journal.mark_status(id, status) {
        Ok(trade) => ok(json!({
            "trade": trade,
            "totals": journal.totals(),
        })),
        Err(e) => err(e),
    }
}

fn compute_levels(config: &Config, args: &GannArgs) -> trade_toolkit::Result<GannResult> {
    let preset = match &args.preset {
        Some(key) => require_preset(key)?,
        None => config.gann_preset()?,
    };
    let rounding = match &args.rounding {
        Some(mode) => mode.parse()?,
        None => config.gann.rounding,
    };
    gann::calculate_levels(&args.price, &preset, rounding)
}

fn handle_gann(config: &Config, action: GannAction) -> String {
    match action {
        GannAction::Levels { args } => match compute_levels(config, &args) {
            Ok(result) => ok(result),
            Err(e) => err(e),
        },
        GannAction::Presets => ok(json!({
            "presets": list_presets(),
        })),
        GannAction::Csv { args } => {
            match compute_levels(config, &args).and_then(|result| gann::to_csv(&result)) {
                Ok(csv) => csv,
                Err(e) => err(e),
            }
        }
        GannAction::Export { args, output } => {
            let result = match compute_levels(config, &args) {
                Ok(result) => result,
                Err(e) => return err(e),
            };
            let written = match output {
                Some(path) => gann::write_csv_to(&result, &path).map(|_| path),
                None => gann::write_csv(&result, &config.export_dir(), Utc::now()),
            };
            match written {
                Ok(path) => ok(json!({
                    "path": path,
                    "rows": result.levels.len(),
                })),
                Err(e) => err(e),
            }
        }
    }
}
