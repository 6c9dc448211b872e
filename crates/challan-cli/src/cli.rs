//! CLI definition using clap

use std::path::PathBuf;

use challan_domain::model::{ItemField, ItemKind, LoadingType};
use challan_types::{ExportFormat, OutputFormat};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

const DEFAULT_DRAFT: &str = "challan-draft.json";

#[derive(Parser)]
#[command(name = "challan")]
#[command(version)]
#[command(about = "Loading challan console: edit a dispatch loading and print its challan")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Session draft file (.json or .toml)
    #[arg(long, short = 'd', global = true, default_value = DEFAULT_DRAFT)]
    pub draft: PathBuf,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Header fields; each flag overwrites one field of the draft
#[derive(Args, Debug, Default, Clone)]
pub struct HeaderArgs {
    /// Challan number (stored in upper case)
    #[arg(long)]
    pub challan: Option<String>,

    /// Dispatch date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Dispatch origin; the configured company address when blank
    #[arg(long)]
    pub from: Option<String>,

    /// Destination
    #[arg(long)]
    pub to: Option<String>,

    /// Vehicle number
    #[arg(long)]
    pub vehicle: Option<String>,

    #[arg(long)]
    pub driver: Option<String>,

    #[arg(long)]
    pub driver_phone: Option<String>,

    #[arg(long)]
    pub transporter: Option<String>,

    /// Lorry receipt number
    #[arg(long)]
    pub lr: Option<String>,

    /// Vehicle in time (YYYY-MM-DDTHH:MM); empty string clears it
    #[arg(long)]
    pub vehicle_in: Option<String>,

    /// Vehicle out time (YYYY-MM-DDTHH:MM); empty string clears it
    #[arg(long)]
    pub vehicle_out: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a new loading session draft
    New {
        #[command(flatten)]
        header: HeaderArgs,

        /// Loading type (regular, grade)
        #[arg(long = "type", short = 't', default_value = "regular")]
        loading_type: LoadingType,

        /// Overwrite an existing draft
        #[arg(long)]
        force: bool,
    },

    /// Change header fields of the draft
    SetHeader {
        #[command(flatten)]
        header: HeaderArgs,
    },

    /// Append an empty row to an item table
    AddItem {
        /// Table (regular, grade, poly)
        kind: ItemKind,

        /// Field values for the new row, as field=value
        #[arg(value_name = "FIELD=VALUE")]
        values: Vec<String>,
    },

    /// Set fields of one row
    UpdateItem {
        /// Table (regular, grade, poly)
        kind: ItemKind,

        /// Row number as printed (starting at 1)
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        row: u64,

        /// Field values, as field=value (e.g. total-ctn=100)
        #[arg(value_name = "FIELD=VALUE", required = true)]
        values: Vec<String>,
    },

    /// Remove one row
    RemoveItem {
        /// Table (regular, grade, poly)
        kind: ItemKind,

        /// Row number as printed (starting at 1)
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        row: u64,
    },

    /// Switch between carton and grade loading
    SetType {
        /// Loading type (regular, grade)
        loading_type: LoadingType,
    },

    /// Show the loading summary
    Show,

    /// Print the challan (PDF and CSV copy)
    Print {
        /// Output directory. Uses config value if not specified.
        #[arg(long, short = 'o')]
        out_dir: Option<PathBuf>,
    },

    /// Export the challan table without requiring a complete header
    Export {
        /// Output directory. Uses config value if not specified.
        #[arg(long, short = 'o')]
        out_dir: Option<PathBuf>,

        /// File type (csv, xlsx). Uses config value if not specified.
        #[arg(long, short = 'x')]
        export_format: Option<ExportFormat>,
    },

    /// Show or modify configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set company name printed on challans
        #[arg(long)]
        set_company_name: Option<String>,

        /// Set default company address
        #[arg(long)]
        set_company_address: Option<String>,

        /// Set default output directory
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// Set default output format (json, table)
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default export format (csv, xlsx)
        #[arg(long)]
        set_export: Option<ExportFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Split `field=value`; the value may be empty or contain '='
pub fn parse_assignment(raw: &str) -> Result<(ItemField, &str), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got: {}", raw))?;
    Ok((field.parse()?, value))
}
