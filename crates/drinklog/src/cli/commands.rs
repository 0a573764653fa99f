//! # CLI Layer
//!
//! This module is **one possible UI client** for drinklog, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Load configuration, initialize the API over the data directory
//! 3. **API Dispatch**: Call the appropriate `DrinkLogApi` method
//! 4. **Output Formatting**: Turn results into text via `render.rs`
//!
//! Running `drinklog` without a command shows today's drinks.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `handle_*()`: Per-command handlers that call the API and print

use super::render::{
    print_messages, render_chart, render_day, render_favorites, render_range, render_summary,
    render_units,
};
use super::setup::{Cli, Commands, FavCommands};
use chrono::NaiveDate;
use clap::Parser;
use drinklogapp::aggregate::DateRange;
use drinklogapp::codec::TransferFormat;
use drinklogapp::config::{default_config_path, DrinkLogConfig};
use drinklogapp::entry::DrinkEntry;
use drinklogapp::error::Result;
use drinklogapp::group::Period;
use drinklogapp::init::{initialize, DrinkLogContext};
use drinklogapp::mixed::MixedDrink;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr; `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = DrinkLogConfig::load(cli.config.as_deref())?;
    init_tracing(&config.log_level);

    // Commands that never touch the log
    match &cli.command {
        Some(Commands::Units) => {
            print!("{}", render_units());
            return Ok(());
        }
        Some(Commands::Config { template }) => {
            return handle_config(&config, cli.config.as_deref(), cli.data_dir.as_deref(), *template);
        }
        _ => {}
    }

    let mut ctx = initialize(config, cli.data_dir)?;
    debug!(data_dir = %ctx.data_dir.display(), "drink log ready");

    match cli.command.unwrap_or(Commands::Today) {
        Commands::Add {
            name,
            volume,
            unit,
            abv,
        } => handle_add(&mut ctx, name, volume, unit, abv),
        Commands::Mix {
            name,
            base,
            base_unit,
            base_abv,
            total,
            total_unit,
        } => {
            let default_unit = ctx.config.default_unit.clone();
            let mixed = MixedDrink::new(
                base,
                base_unit.unwrap_or_else(|| default_unit.clone()),
                base_abv,
                total,
                total_unit.unwrap_or(default_unit),
            );
            handle_log(&mut ctx, DrinkEntry::mixed(name, mixed))
        }
        Commands::Delete { ids } => handle_delete(&mut ctx, &ids),
        Commands::Today => handle_today(&ctx),
        Commands::Log { from, to } => handle_range(&ctx, from, to),
        Commands::Chart { from, to, json } => handle_chart(&ctx, from, to, json),
        Commands::Summary { by, from, to } => handle_summary(&ctx, by, from, to),
        Commands::Fav(cmd) => handle_fav(&mut ctx, cmd),
        Commands::Export { format, output } => handle_export(&ctx, format, output),
        Commands::Import { file, format } => handle_import(&mut ctx, &file, format),
        Commands::Units | Commands::Config { .. } => Ok(()),
    }
}

fn direct_entry(
    ctx: &DrinkLogContext,
    name: String,
    volume: f64,
    unit: Option<String>,
    abv: f64,
) -> DrinkEntry {
    let unit = unit.unwrap_or_else(|| ctx.config.default_unit.clone());
    DrinkEntry::direct(name, volume, unit, abv)
}

fn handle_add(
    ctx: &mut DrinkLogContext,
    name: String,
    volume: f64,
    unit: Option<String>,
    abv: f64,
) -> Result<()> {
    let entry = direct_entry(ctx, name, volume, unit, abv);
    handle_log(ctx, entry)
}

fn handle_log(ctx: &mut DrinkLogContext, entry: DrinkEntry) -> Result<()> {
    let result = ctx.api.log_drink(entry)?;
    print_messages(&result.messages);
    if !result.affected_drinks.is_empty() {
        print!("{}", render_day(&ctx.api.today()));
    }
    Ok(())
}

fn handle_delete(ctx: &mut DrinkLogContext, ids: &[i64]) -> Result<()> {
    let result = ctx.api.delete_drinks(ids)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_today(ctx: &DrinkLogContext) -> Result<()> {
    print!("{}", render_day(&ctx.api.today()));
    Ok(())
}

fn handle_range(ctx: &DrinkLogContext, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<()> {
    let report = ctx.api.range_totals(DateRange::new(from, to));
    print!("{}", render_range(&report));
    Ok(())
}

fn handle_chart(
    ctx: &DrinkLogContext,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let dataset = ctx.api.chart(DateRange::new(from, to));
    if json {
        println!("{}", serde_json::to_string_pretty(&dataset.rows)?);
    } else {
        print!("{}", render_chart(&dataset));
    }
    Ok(())
}

fn handle_summary(
    ctx: &DrinkLogContext,
    period: Period,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    let totals = ctx.api.summary(period, DateRange::new(from, to));
    print!("{}", render_summary(&totals));
    Ok(())
}

fn handle_fav(ctx: &mut DrinkLogContext, cmd: FavCommands) -> Result<()> {
    let result = match cmd {
        FavCommands::Save {
            name,
            volume,
            unit,
            abv,
        } => {
            let entry = direct_entry(ctx, name, volume, unit, abv);
            ctx.api.save_favorite(entry)?
        }
        FavCommands::FromDrink { id } => ctx.api.save_favorite_from_drink(id)?,
        FavCommands::List => {
            let result = ctx.api.list_favorites();
            print!("{}", render_favorites(&result.listed_favorites));
            result
        }
        FavCommands::Log { name } => ctx.api.log_favorite(&name)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &DrinkLogContext, format: TransferFormat, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            let result = ctx.api.export_to_file(format, &path)?;
            print_messages(&result.messages);
        }
        None => println!("{}", ctx.api.export(format)?),
    }
    Ok(())
}

fn handle_import(ctx: &mut DrinkLogContext, file: &Path, format: Option<TransferFormat>) -> Result<()> {
    let result = ctx.api.import_file(file, format)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(
    config: &DrinkLogConfig,
    config_file: Option<&Path>,
    data_override: Option<&Path>,
    template: bool,
) -> Result<()> {
    if template {
        print!("{}", DrinkLogConfig::template());
        return Ok(());
    }

    let file = config_file.map(Path::to_path_buf).or_else(default_config_path);
    let data_dir = match data_override.map(Path::to_path_buf).or_else(|| config.data_dir.clone()) {
        Some(dir) => dir,
        None => drinklogapp::init::default_data_dir()?,
    };

    match file {
        Some(path) => println!("config_file = {}", path.display()),
        None => println!("config_file = (none)"),
    }
    println!("data_dir = {}", data_dir.display());
    println!("default_unit = {}", config.default_unit);
    println!("log_level = {}", config.log_level);
    Ok(())
}
