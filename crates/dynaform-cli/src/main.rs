use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;
mod logging;
mod tui;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "dynaform", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML schema document (default: the bundled form types)
    #[arg(long, global = true)]
    schemas: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// List the available form types
    List,
    /// Show the fields of a form type
    Show {
        /// Form type name, e.g. "User Information"
        form: String,
    },
    /// Fill in and submit a form non-interactively
    ///
    /// Each --set assigns one field. Values are checked against the field's
    /// kind (number, date as YYYY-MM-DD, or one of a choice's options) before
    /// the form is submitted. On success the submitted record is printed as
    /// JSON; otherwise every missing required field is reported and the
    /// command exits with an error.
    Fill {
        /// Form type name
        form: String,

        /// Field assignment as name=value (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = commands::forms::parse_assignment)]
        sets: Vec<(String, String)>,
    },
    /// Fill forms interactively in the terminal
    Tui {
        /// Write all submissions as JSON to this file on exit
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Manage the schema document
    Schemas {
        #[command(subcommand)]
        action: SchemasAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum SchemasAction {
    /// Write the bundled form types to the default schema file
    Init,
    /// Print the default schema file path
    Path,
    /// Check a schema document for errors
    Validate {
        /// Schema file to check (default: the configured or default path)
        path: Option<PathBuf>,
    },
    /// Print the bundled form types as a schema document
    Example,
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print one value, or the whole config file
    Get { key: Option<String> },
    /// Set a value in the config file
    Set { key: String, value: String },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?.with_schema_file(cli.schemas);

    logging::setup(&config)?;

    match cli.command {
        Commands::List => commands::forms::list(&config)?,
        Commands::Show { form } => commands::forms::show(&config, &form)?,
        Commands::Fill { form, sets } => commands::forms::fill(&config, &form, sets)?,
        Commands::Tui { export } => {
            let export = export.or_else(|| config.export_path.clone());
            tui::run_tui(commands::load_registry(&config)?, export)?;
        }
        Commands::Schemas { action } => match action {
            SchemasAction::Init => commands::schemas::init_schemas()?,
            SchemasAction::Path => commands::schemas::show_path(),
            SchemasAction::Validate { path } => {
                commands::schemas::validate_schemas(path.or_else(|| config.schema_file.clone()))?;
            }
            SchemasAction::Example => commands::schemas::show_example()?,
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config),
            ConfigAction::Get { key } => commands::config::get_config(&config, key)?,
            ConfigAction::Set { key, value } => commands::config::set_config(&key, &value)?,
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
