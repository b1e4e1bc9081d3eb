//! Filter evaluation and result export.
//!
//! [`filter()`] is the core predicate: one conjunctive pass over the catalog
//! combining categorical membership, the ATEX certification requirement, and
//! two inclusive numeric ranges. It is pure, total, and stable (matches keep
//! their catalog order). An empty selection set matches nothing; that strict
//! semantics is deliberate and callers wanting "nothing selected means
//! everything" must default-populate their sets from the derived domains.
//!
//! [`serialize()`] and [`write_csv()`] render a result table as comma CSV
//! with the canonical header row, suitable for a `matched_products.csv`
//! download.

use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{CATALOG_HEADERS, ProductRecord},
    io_utils,
};

/// One filter evaluation's worth of user-chosen criteria. Built fresh per
/// query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub space_types: HashSet<String>,
    pub lighting_types: HashSet<String>,
    #[serde(default)]
    pub atex_required: bool,
    pub power_range: (f64, f64),
    pub lumen_range: (f64, f64),
}

impl FilterSpec {
    /// Loads a complete spec from a JSON file.
    pub fn load(path: &Path) -> Result<FilterSpec> {
        let file = File::open(path).with_context(|| format!("Opening spec file {path:?}"))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing spec file {path:?}"))
    }

    pub fn matches(&self, record: &ProductRecord) -> bool {
        self.space_types.contains(&record.space_type)
            && self.lighting_types.contains(&record.lighting_type)
            && (self.power_range.0..=self.power_range.1).contains(&record.power_watts)
            && (self.lumen_range.0..=self.lumen_range.1).contains(&record.lumen_output)
            && (!self.atex_required || record.is_atex_certified())
    }
}

/// Returns the rows of `records` satisfying `spec`, in their original order.
pub fn filter(records: &[ProductRecord], spec: &FilterSpec) -> Vec<ProductRecord> {
    records
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect()
}

/// Renders a result table as comma-delimited CSV text with the canonical
/// header row. Re-parsing the output reproduces every text field exactly and
/// the numeric fields equal-as-numbers.
pub fn serialize(records: &[ProductRecord]) -> Result<String> {
    let mut writer = io_utils::csv_writer_builder(b',').from_writer(Vec::new());
    write_records(&mut writer, records)?;
    let bytes = writer
        .into_inner()
        .context("Flushing serialized CSV buffer")?;
    String::from_utf8(bytes).context("Serialized CSV is not valid UTF-8")
}

/// Streams the same CSV representation to `path`, or to stdout when `path`
/// is `None` or `-`.
pub fn write_csv(records: &[ProductRecord], path: Option<&Path>) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(path, b',')?;
    write_records(&mut writer, records)?;
    writer.flush().context("Flushing CSV output")?;
    Ok(())
}

fn write_records<W: Write>(writer: &mut csv::Writer<W>, records: &[ProductRecord]) -> Result<()> {
    writer
        .write_record(CATALOG_HEADERS)
        .context("Writing CSV header row")?;
    for record in records {
        writer
            .write_record([
                record.name.as_str(),
                record.space_type.as_str(),
                record.lighting_type.as_str(),
                record.atex.as_str(),
                format_number(record.power_watts).as_str(),
                format_number(record.lumen_output).as_str(),
                record.image_url.as_str(),
                record.product_link.as_str(),
            ])
            .with_context(|| format!("Writing CSV row for '{}'", record.name))?;
    }
    Ok(())
}

fn format_number(value: f64) -> String {
    // The integer rendering only applies where the cast cannot saturate.
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}
