use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use drinklogapp::codec::TransferFormat;
use drinklogapp::group::Period;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "drinklog", bin_name = "drinklog", version)]
#[command(
    about = "Track what you drink and how much pure alcohol it adds up to",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the drink log (overrides config and DRINKLOG_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Config file to read instead of the default drinklog.toml
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a drink: `drinklog add Beer 50 cl --abv 5`
    Add {
        name: String,
        volume: f64,
        /// Volume unit (defaults to the configured default_unit)
        unit: Option<String>,
        /// Alcohol by volume, in percent
        #[arg(short, long)]
        abv: f64,
    },

    /// Log a mixed drink from its base liquor and total volume
    Mix {
        name: String,
        /// Volume of the base liquor
        #[arg(long)]
        base: f64,
        #[arg(long, value_name = "UNIT")]
        base_unit: Option<String>,
        /// ABV of the base liquor, in percent
        #[arg(long)]
        base_abv: f64,
        /// Volume of the finished drink
        #[arg(long)]
        total: f64,
        #[arg(long, value_name = "UNIT")]
        total_unit: Option<String>,
    },

    /// Delete drinks by id
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Today's drinks and their total (default command)
    Today,

    /// Drinks and totals per day
    Log {
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Pure alcohol per drink name and day
    Chart {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Print the dataset as JSON rows
        #[arg(long)]
        json: bool,
    },

    /// Totals per day, week or month
    Summary {
        #[arg(long, default_value = "day")]
        by: Period,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Saved drink presets
    #[command(subcommand)]
    Fav(FavCommands),

    /// Write the whole log as JSON or CSV
    Export {
        #[arg(short, long, default_value = "json")]
        format: TransferFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the log with the content of a JSON or CSV file
    Import {
        file: PathBuf,
        /// Format of the file (guessed from the extension when omitted)
        #[arg(short, long)]
        format: Option<TransferFormat>,
    },

    /// List the accepted volume units
    Units,

    /// Show the effective configuration
    Config {
        /// Print a commented sample drinklog.toml instead
        #[arg(long)]
        template: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum FavCommands {
    /// Save a favorite: `drinklog fav save IPA 33 cl --abv 6.5`
    Save {
        name: String,
        volume: f64,
        unit: Option<String>,
        #[arg(short, long)]
        abv: f64,
    },
    /// Save an already logged drink as a favorite
    FromDrink { id: i64 },
    /// List saved favorites
    List,
    /// Log a drink from a favorite
    Log { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn no_command_is_allowed() {
        assert!(parse(&["drinklog"]).command.is_none());
    }

    #[test]
    fn add_with_and_without_unit() {
        match parse(&["drinklog", "add", "Beer", "50", "cl", "--abv", "5"]).command {
            Some(Commands::Add {
                name,
                volume,
                unit,
                abv,
            }) => {
                assert_eq!(name, "Beer");
                assert_eq!(volume, 50.0);
                assert_eq!(unit.as_deref(), Some("cl"));
                assert_eq!(abv, 5.0);
            }
            other => panic!("unexpected: {:?}", other),
        }
        match parse(&["drinklog", "add", "Beer", "500", "-a", "5"]).command {
            Some(Commands::Add { unit, .. }) => assert!(unit.is_none()),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn add_requires_abv() {
        assert!(Cli::try_parse_from(["drinklog", "add", "Beer", "500"]).is_err());
    }

    #[test]
    fn log_parses_dates() {
        match parse(&["drinklog", "log", "--from", "2025-01-01", "--to", "2025-01-31"]).command {
            Some(Commands::Log { from, to }) => {
                assert_eq!(from, NaiveDate::from_ymd_opt(2025, 1, 1));
                assert_eq!(to, NaiveDate::from_ymd_opt(2025, 1, 31));
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(Cli::try_parse_from(["drinklog", "log", "--from", "yesterday"]).is_err());
    }

    #[test]
    fn summary_period() {
        match parse(&["drinklog", "summary", "--by", "week"]).command {
            Some(Commands::Summary { by, .. }) => assert_eq!(by, Period::Week),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(Cli::try_parse_from(["drinklog", "summary", "--by", "year"]).is_err());
    }

    #[test]
    fn export_format_and_global_data_dir() {
        let cli = parse(&["drinklog", "export", "--format", "csv", "--data-dir", "/tmp/dl"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/dl")));
        match cli.command {
            Some(Commands::Export { format, output }) => {
                assert_eq!(format, TransferFormat::Csv);
                assert!(output.is_none());
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn delete_needs_ids() {
        assert!(Cli::try_parse_from(["drinklog", "delete"]).is_err());
        match parse(&["drinklog", "rm", "1", "2"]).command {
            Some(Commands::Delete { ids }) => assert_eq!(ids, vec![1, 2]),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn fav_subcommands() {
        match parse(&["drinklog", "fav", "log", "IPA"]).command {
            Some(Commands::Fav(FavCommands::Log { name })) => assert_eq!(name, "IPA"),
            other => panic!("unexpected: {:?}", other),
        }
        match parse(&["drinklog", "fav", "from-drink", "42"]).command {
            Some(Commands::Fav(FavCommands::FromDrink { id })) => assert_eq!(id, 42),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
