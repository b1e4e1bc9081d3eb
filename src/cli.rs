use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Filter delimited lighting-product catalogs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the selectable filter options and range bounds a catalog supports
    Domains(DomainsArgs),
    /// Match catalog rows against filter criteria and export them as CSV
    Match(MatchArgs),
}

#[derive(Debug, Args)]
pub struct DomainsArgs {
    /// Input catalog file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Catalog delimiter character (supports ',', ';', 'tab', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct MatchArgs {
    /// Input catalog file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output CSV file (stdout if omitted; matched_products.csv by convention)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Catalog delimiter character (supports ',', ';', 'tab', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// JSON file holding a complete filter specification (wins over flags)
    #[arg(long = "spec")]
    pub spec: Option<PathBuf>,
    /// Space type to accept (repeatable; all observed values if omitted)
    #[arg(long = "space-type", action = clap::ArgAction::Append)]
    pub space_types: Vec<String>,
    /// Lighting type to accept (repeatable; all observed values if omitted)
    #[arg(long = "lighting-type", action = clap::ArgAction::Append)]
    pub lighting_types: Vec<String>,
    /// Require ATEX certification (explosion-proof)
    #[arg(long)]
    pub atex: bool,
    /// Lower power bound in watts (catalog minimum if omitted)
    #[arg(long = "power-min")]
    pub power_min: Option<f64>,
    /// Upper power bound in watts (catalog maximum if omitted)
    #[arg(long = "power-max")]
    pub power_max: Option<f64>,
    /// Lower lumen output bound (catalog minimum if omitted)
    #[arg(long = "lumen-min")]
    pub lumen_min: Option<f64>,
    /// Upper lumen output bound (catalog maximum if omitted)
    #[arg(long = "lumen-max")]
    pub lumen_max: Option<f64>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
