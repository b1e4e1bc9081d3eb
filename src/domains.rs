//! Filter domain derivation.
//!
//! A collaborator layer populates its multi-select options and range controls
//! from [`FilterDomains`], which is a pure function of a cleaned catalog:
//! distinct non-empty categorical values in first-seen order, and integer
//! numeric bounds widened outward (floor for min, ceil for max) so the full
//! observed range stays representable by an integer-bounded control.
//!
//! An empty catalog yields empty option lists and `None` bounds; callers
//! either disable range filtering or fall back to a `(0, 0)` range.

use itertools::Itertools;

use crate::catalog::{Catalog, ProductRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericBounds {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDomains {
    pub space_types: Vec<String>,
    pub lighting_types: Vec<String>,
    pub power: Option<NumericBounds>,
    pub lumen: Option<NumericBounds>,
}

impl FilterDomains {
    pub fn derive(catalog: &Catalog) -> FilterDomains {
        let records = catalog.records();
        FilterDomains {
            space_types: distinct_values(records, |r| &r.space_type),
            lighting_types: distinct_values(records, |r| &r.lighting_type),
            power: bounds(records.iter().map(|r| r.power_watts)),
            lumen: bounds(records.iter().map(|r| r.lumen_output)),
        }
    }
}

fn distinct_values<F>(records: &[ProductRecord], field: F) -> Vec<String>
where
    F: Fn(&ProductRecord) -> &String,
{
    records
        .iter()
        .map(|record| field(record).as_str())
        .filter(|value| !value.is_empty())
        .unique()
        .map(str::to_string)
        .collect()
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<NumericBounds> {
    let (min, max) = values.fold(None, |acc: Option<(f64, f64)>, value| match acc {
        Some((min, max)) => Some((min.min(value), max.max(value))),
        None => Some((value, value)),
    })?;
    // The loader drops rows with non-finite numeric fields, so the casts
    // below cannot saturate on NaN or infinity.
    debug_assert!(min.is_finite() && max.is_finite());
    Some(NumericBounds {
        min: min.floor() as i64,
        max: max.ceil() as i64,
    })
}
