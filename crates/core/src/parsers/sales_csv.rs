use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::StoryConfig;
use crate::model::{Dataset, SalesRecord};

#[derive(Debug, Error)]
pub enum SalesCsvError {
    #[error("{0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("no rows with parameter {parameter:?} and unit {unit:?}")]
    Empty { parameter: String, unit: String },
}

/// Column positions of the fields we read; everything else is ignored.
struct Columns {
    region: usize,
    parameter: usize,
    unit: usize,
    year: usize,
    value: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, SalesCsvError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| header_is(h, name))
                .ok_or(SalesCsvError::MissingColumn(name))
        };
        Ok(Self {
            region: find("region")?,
            parameter: find("parameter")?,
            unit: find("unit")?,
            year: find("year")?,
            value: find("value")?,
        })
    }
}

fn header_is(header: &str, name: &str) -> bool {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .eq_ignore_ascii_case(name)
}

/// Parse the historical sales CSV (IEA Global EV Outlook layout).
///
/// Only rows whose `parameter` and `unit` match the configured literals are
/// kept. Rows with a missing field or an unparsable `year`/`value` are
/// skipped and counted, never passed on.
pub fn parse_sales_csv(data: &[u8], config: &StoryConfig) -> Result<Dataset, SalesCsvError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let columns = Columns::locate(rdr.headers()?)?;

    let mut records = Vec::new();
    let mut out_of_scope = 0usize;
    let mut malformed = 0usize;

    for row in rdr.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(_) => {
                malformed += 1;
                continue;
            }
        };

        let field = |idx: usize| row.get(idx);
        let (Some(region), Some(parameter), Some(unit), Some(year), Some(value)) = (
            field(columns.region),
            field(columns.parameter),
            field(columns.unit),
            field(columns.year),
            field(columns.value),
        ) else {
            malformed += 1;
            continue;
        };

        if parameter != config.parameter || unit != config.unit {
            out_of_scope += 1;
            continue;
        }

        let (Some(year), Some(value)) = (parse_year(year), parse_value(value)) else {
            malformed += 1;
            continue;
        };

        records.push(SalesRecord {
            region: region.to_string(),
            year,
            parameter: parameter.to_string(),
            unit: unit.to_string(),
            value,
        });
    }

    debug!(out_of_scope, malformed, "skipped sales rows");

    if records.is_empty() {
        return Err(SalesCsvError::Empty {
            parameter: config.parameter.clone(),
            unit: config.unit.clone(),
        });
    }

    info!(records = records.len(), "loaded sales dataset");
    Ok(Dataset::new(records))
}

/// Years are integers, but some exports write them as `2020.0`.
fn parse_year(s: &str) -> Option<i32> {
    if let Ok(year) = s.parse::<i32>() {
        return Some(year);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
        Some(f as i32)
    } else {
        None
    }
}

fn parse_value(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
