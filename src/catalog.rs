//! Catalog loading and cleaning.
//!
//! [`Catalog::load()`] reads a delimited product file fully into memory,
//! resolves the required columns from the header row, coerces the two numeric
//! columns, and drops any row where either numeric value fails to parse.
//! A row with one bad numeric field is excluded whole rather than zero-filled,
//! so derived min/max bounds only ever see usable values.

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use encoding_rs::Encoding;
use log::{debug, info};
use thiserror::Error;

use crate::io_utils;

/// Canonical export header, in catalog column order.
pub const CATALOG_HEADERS: [&str; 8] = [
    "Product Name",
    "Space Type",
    "Lighting Type",
    "ATEX Certified",
    "Power (W)",
    "Lumen Output",
    "Image URL",
    "Product Link",
];

/// The one literal that marks a product as ATEX certified. Case-sensitive;
/// anything else (including "yes" or "YES") counts as not certified.
pub const ATEX_CERTIFIED: &str = "Yes";

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to open catalog file {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read catalog header row from {path:?}")]
    Header {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("catalog file {path:?} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },
    #[error("failed to read catalog row {row} from {path:?}")]
    Row {
        path: PathBuf,
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("failed to decode catalog row {row} of {path:?} as {encoding}")]
    Decode {
        path: PathBuf,
        row: usize,
        encoding: &'static str,
    },
}

/// One cleaned catalog row. Both numeric fields are guaranteed parsed; the
/// ATEX field keeps its raw text so exports round-trip exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub name: String,
    pub space_type: String,
    pub lighting_type: String,
    pub atex: String,
    pub power_watts: f64,
    pub lumen_output: f64,
    pub image_url: String,
    pub product_link: String,
}

impl ProductRecord {
    pub fn is_atex_certified(&self) -> bool {
        self.atex == ATEX_CERTIFIED
    }
}

/// An immutable, cleaned product table. Construct via [`Catalog::load()`] or
/// through a [`crate::store::CatalogStore`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    records: Vec<ProductRecord>,
}

impl Catalog {
    /// Reads and cleans the catalog at `path`. A zero-data-row file with a
    /// valid header is a valid empty catalog, not an error.
    pub fn load(
        path: &Path,
        delimiter: u8,
        encoding: &'static Encoding,
    ) -> Result<Catalog, DataLoadError> {
        let file = File::open(path).map_err(|source| DataLoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = io_utils::open_csv_reader(BufReader::new(file), delimiter, true);
        let header_record = reader
            .byte_headers()
            .map_err(|source| DataLoadError::Header {
                path: path.to_path_buf(),
                source,
            })?
            .clone();
        let headers =
            io_utils::decode_record(&header_record, encoding).map_err(|_| DataLoadError::Decode {
                path: path.to_path_buf(),
                row: 1,
                encoding: encoding.name(),
            })?;
        let columns = ColumnMap::resolve(&headers).map_err(|column| DataLoadError::MissingColumn {
            path: path.to_path_buf(),
            column,
        })?;

        let mut records = Vec::new();
        let mut dropped = 0usize;
        for (idx, record) in reader.byte_records().enumerate() {
            let row = idx + 2;
            let record = record.map_err(|source| DataLoadError::Row {
                path: path.to_path_buf(),
                row,
                source,
            })?;
            let fields =
                io_utils::decode_record(&record, encoding).map_err(|_| DataLoadError::Decode {
                    path: path.to_path_buf(),
                    row,
                    encoding: encoding.name(),
                })?;
            match columns.record_from(&fields) {
                Some(product) => records.push(product),
                None => {
                    dropped += 1;
                    debug!("Dropping row {row}: unusable power or lumen value");
                }
            }
        }
        if dropped > 0 {
            info!("Dropped {dropped} row(s) with non-numeric power or lumen values");
        }
        debug!("Loaded {} product(s) from {path:?}", records.len());
        Ok(Catalog { records })
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
impl Catalog {
    pub fn from_records(records: Vec<ProductRecord>) -> Catalog {
        Catalog { records }
    }
}

/// Header aliases accepted for each semantic column, compared after
/// normalization (lowercased, non-alphanumeric characters stripped).
const COLUMN_ALIASES: [(&str, &[&str]); 8] = [
    ("Product Name", &["productname", "name"]),
    ("Space Type", &["spacetype"]),
    ("Lighting Type", &["lightingtype"]),
    ("ATEX Certified", &["atexcertified", "atex"]),
    ("Power (W)", &["powerw", "powerwatts", "power"]),
    ("Lumen Output", &["lumenoutput", "lumens"]),
    ("Image URL", &["imageurl"]),
    ("Product Link", &["productlink"]),
];

#[derive(Debug, Clone)]
struct ColumnMap {
    name: usize,
    space_type: usize,
    lighting_type: usize,
    atex: usize,
    power_watts: usize,
    lumen_output: usize,
    image_url: usize,
    product_link: usize,
}

impl ColumnMap {
    /// Maps each required column to its header position, or returns the
    /// canonical name of the first column that cannot be found.
    fn resolve(headers: &[String]) -> Result<ColumnMap, String> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let mut positions = [0usize; 8];
        for (slot, (canonical, aliases)) in COLUMN_ALIASES.iter().enumerate() {
            let found = normalized
                .iter()
                .position(|header| aliases.contains(&header.as_str()));
            match found {
                Some(idx) => positions[slot] = idx,
                None => return Err((*canonical).to_string()),
            }
        }
        Ok(ColumnMap {
            name: positions[0],
            space_type: positions[1],
            lighting_type: positions[2],
            atex: positions[3],
            power_watts: positions[4],
            lumen_output: positions[5],
            image_url: positions[6],
            product_link: positions[7],
        })
    }

    /// Builds a cleaned record, or `None` when either numeric field fails
    /// coercion (the row is then excluded entirely).
    fn record_from(&self, fields: &[String]) -> Option<ProductRecord> {
        let field = |idx: usize| fields.get(idx).map(|s| s.as_str()).unwrap_or("");
        let power_watts = coerce_number(field(self.power_watts))?;
        let lumen_output = coerce_number(field(self.lumen_output))?;
        Some(ProductRecord {
            name: field(self.name).to_string(),
            space_type: field(self.space_type).to_string(),
            lighting_type: field(self.lighting_type).to_string(),
            atex: field(self.atex).to_string(),
            power_watts,
            lumen_output,
            image_url: field(self.image_url).to_string(),
            product_link: field(self.product_link).to_string(),
        })
    }
}

fn normalize_header(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Numeric coercion for `Power (W)` and `Lumen Output`. Empty or non-numeric
/// text is unusable rather than an error; the caller drops the row. Tokens
/// that parse to non-finite values (`NaN`, `inf`) are unusable too, so the
/// cleaned table never carries a value that breaks min/max bounds or range
/// comparisons.
fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}
