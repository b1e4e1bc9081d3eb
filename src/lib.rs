pub mod catalog;
pub mod cli;
pub mod domains;
pub mod io_utils;
pub mod matcher;
pub mod store;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands, DomainsArgs, MatchArgs},
    domains::{FilterDomains, NumericBounds},
    matcher::FilterSpec,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("product_finder", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Domains(args) => handle_domains(&args),
        Commands::Match(args) => handle_match(&args),
    }
}

fn handle_domains(args: &DomainsArgs) -> Result<()> {
    let delimiter = io_utils::resolve_delimiter(args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!(
        "Deriving filter domains for '{}' with delimiter '{}'",
        args.input.display(),
        printable_delimiter(delimiter)
    );
    let catalog = catalog::Catalog::load(&args.input, delimiter, encoding)
        .with_context(|| format!("Loading catalog {:?}", args.input))?;
    let domains = FilterDomains::derive(&catalog);
    println!("Space types: {}", format_options(&domains.space_types));
    println!("Lighting types: {}", format_options(&domains.lighting_types));
    println!("Power (W): {}", format_bounds(domains.power));
    println!("Lumen output: {}", format_bounds(domains.lumen));
    Ok(())
}

fn handle_match(args: &MatchArgs) -> Result<()> {
    let delimiter = io_utils::resolve_delimiter(args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!(
        "Matching products in '{}' with delimiter '{}'",
        args.input.display(),
        printable_delimiter(delimiter)
    );
    let catalog = catalog::Catalog::load(&args.input, delimiter, encoding)
        .with_context(|| format!("Loading catalog {:?}", args.input))?;
    let spec = match &args.spec {
        Some(path) => FilterSpec::load(path)?,
        None => spec_from_args(args, &catalog),
    };
    let matched = matcher::filter(catalog.records(), &spec);
    info!("{} of {} product(s) matched", matched.len(), catalog.len());
    matcher::write_csv(&matched, args.output.as_deref())
        .context("Writing matched products CSV")?;
    if let Some(output) = &args.output {
        info!("Matched products written to {output:?}");
    }
    Ok(())
}

/// Builds a spec from flags, defaulting omitted criteria from the catalog's
/// derived domains (select-all policy). The core filter itself keeps strict
/// empty-means-no-match semantics.
fn spec_from_args(args: &MatchArgs, catalog: &catalog::Catalog) -> FilterSpec {
    let domains = FilterDomains::derive(catalog);
    let space_types = if args.space_types.is_empty() {
        domains.space_types.iter().cloned().collect()
    } else {
        args.space_types.iter().cloned().collect()
    };
    let lighting_types = if args.lighting_types.is_empty() {
        domains.lighting_types.iter().cloned().collect()
    } else {
        args.lighting_types.iter().cloned().collect()
    };
    FilterSpec {
        space_types,
        lighting_types,
        atex_required: args.atex,
        power_range: range_from(domains.power, args.power_min, args.power_max),
        lumen_range: range_from(domains.lumen, args.lumen_min, args.lumen_max),
    }
}

fn range_from(bounds: Option<NumericBounds>, low: Option<f64>, high: Option<f64>) -> (f64, f64) {
    // (0, 0) stands in for the bounds of an empty catalog; nothing can match
    // it anyway.
    let (min, max) = bounds.map_or((0.0, 0.0), |b| (b.min as f64, b.max as f64));
    (low.unwrap_or(min), high.unwrap_or(max))
}

fn format_options(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}

fn format_bounds(bounds: Option<NumericBounds>) -> String {
    match bounds {
        Some(b) => format!("{}..{}", b.min, b.max),
        None => "no data".to_string(),
    }
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
