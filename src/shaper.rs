use std::collections::{BTreeMap, BTreeSet};
use chrono::NaiveDateTime;
use log::debug;
use serde_json::Value;
use crate::errors::ShapeError;
use crate::models::hourly_record::HourlyRecord;
use crate::models::open_meteo_forecast::ForecastResponse;

/// Hourly variable holding the forecast time stamps
const TIME_FIELD: &str = "time";
/// Hourly variable holding the forecasted temperature
const TEMPERATURE_FIELD: &str = "temperature_2m";

/// Source columns needed to build an HourlyRecord
const SOURCE_COLUMNS: [&str; 11] = [
    "time",
    "temperature_2m",
    "latitude",
    "longitude",
    "generationtime_ms",
    "utc_offset_seconds",
    "timezone",
    "timezone_abbreviation",
    "elevation",
    "time_unit",
    "temperature_2m_unit",
];

/// One row of the flattened forecast, column name to value
pub type FlatRow = BTreeMap<String, Value>;

/// Forecast document flattened to one row per forecast hour
#[derive(Debug, Default)]
pub struct FlatTable {
    pub columns: BTreeSet<String>,
    pub rows: Vec<FlatRow>,
}

/// Flattens the hourly part of a forecast document into one row per hour.
///
/// Each row carries the hourly values for that hour, every top-level metadata value
/// and a `<field>_unit` column for every entry in `hourly_units`. Columns added later
/// replace earlier ones with the same name (hourly, then metadata, then units).
///
/// # Arguments
///
/// * 'response' - the decoded forecast document
pub fn flatten_hourly(response: &ForecastResponse) -> Result<FlatTable, ShapeError> {
    let hourly = response.hourly.as_ref()
        .ok_or_else(|| ShapeError::MissingField("hourly".to_string()))?;
    let hourly_units = response.hourly_units.as_ref()
        .ok_or_else(|| ShapeError::MissingField("hourly_units".to_string()))?;

    let hours = hourly.get(TIME_FIELD)
        .ok_or_else(|| ShapeError::MissingField(format!("hourly.{}", TIME_FIELD)))?
        .len();

    for (field, values) in hourly {
        if values.len() != hours {
            return Err(ShapeError::LengthMismatch {
                field: field.clone(),
                expected: hours,
                actual: values.len(),
            });
        }
    }

    let units = hourly_units.iter()
        .map(|(field, unit)| (format!("{}_unit", field), Value::String(unit.clone())))
        .collect::<Vec<(String, Value)>>();

    let mut columns: BTreeSet<String> = hourly.keys().cloned().collect();
    columns.extend(response.metadata.keys().cloned());
    columns.extend(units.iter().map(|(name, _)| name.clone()));

    let rows = (0..hours)
        .map(|i| {
            let mut row: FlatRow = hourly.iter()
                .map(|(field, values)| (field.clone(), values[i].clone()))
                .collect();
            row.extend(response.metadata.iter().map(|(k, v)| (k.clone(), v.clone())));
            row.extend(units.iter().cloned());
            row
        })
        .collect::<Vec<FlatRow>>();

    Ok(FlatTable { columns, rows })
}

/// Shapes a forecast document into hourly records.
///
/// The `time` column is split into date and time of day, `temperature_2m` becomes
/// `temperature` and only the record columns are kept. Row order follows the
/// hourly sequences of the document.
///
/// # Arguments
///
/// * 'response' - the decoded forecast document
pub fn transform(response: &ForecastResponse) -> Result<Vec<HourlyRecord>, ShapeError> {
    let table = flatten_hourly(response)?;

    for column in SOURCE_COLUMNS {
        if !table.columns.contains(column) {
            return Err(ShapeError::MissingField(column.to_string()));
        }
    }

    let records = table.rows.iter()
        .map(to_record)
        .collect::<Result<Vec<HourlyRecord>, ShapeError>>()?;

    debug!("shaped {} hourly records, dropped {} extra columns",
           records.len(), table.columns.len() - SOURCE_COLUMNS.len());

    Ok(records)
}

/// Builds one record from a flattened row
///
/// # Arguments
///
/// * 'row' - the flattened row
fn to_record(row: &FlatRow) -> Result<HourlyRecord, ShapeError> {
    let date_time = parse_time(get_str(row, TIME_FIELD)?)?;

    let temperature = match get(row, TEMPERATURE_FIELD)? {
        Value::Null => None,
        v => Some(v.as_f64().ok_or_else(|| invalid(TEMPERATURE_FIELD, v))?),
    };

    Ok(HourlyRecord {
        time: date_time.date(),
        hour: date_time.time(),
        temperature,
        latitude: get_f64(row, "latitude")?,
        longitude: get_f64(row, "longitude")?,
        generationtime_ms: get_f64(row, "generationtime_ms")?,
        utc_offset_seconds: get_i64(row, "utc_offset_seconds")?,
        timezone: get_str(row, "timezone")?.to_string(),
        timezone_abbreviation: get_str(row, "timezone_abbreviation")?.to_string(),
        elevation: get_f64(row, "elevation")?,
        time_unit: get_str(row, "time_unit")?.to_string(),
        temperature_unit: get_str(row, "temperature_2m_unit")?.to_string(),
    })
}

/// Parses an ISO-8601 local date time as returned by Open-Meteo, seconds are optional
///
/// # Arguments
///
/// * 'value' - the time stamp, e.g. 2024-01-01T13:00
fn parse_time(value: &str) -> Result<NaiveDateTime, ShapeError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|e| ShapeError::TimeParse { value: value.to_string(), source: e })
}

fn get<'a>(row: &'a FlatRow, column: &str) -> Result<&'a Value, ShapeError> {
    row.get(column).ok_or_else(|| ShapeError::MissingField(column.to_string()))
}

fn get_f64(row: &FlatRow, column: &str) -> Result<f64, ShapeError> {
    let value = get(row, column)?;
    value.as_f64().ok_or_else(|| invalid(column, value))
}

fn get_i64(row: &FlatRow, column: &str) -> Result<i64, ShapeError> {
    let value = get(row, column)?;
    value.as_i64().ok_or_else(|| invalid(column, value))
}

fn get_str<'a>(row: &'a FlatRow, column: &str) -> Result<&'a str, ShapeError> {
    let value = get(row, column)?;
    value.as_str().ok_or_else(|| invalid(column, value))
}

fn invalid(column: &str, value: &Value) -> ShapeError {
    ShapeError::InvalidValue { column: column.to_string(), value: value.to_string() }
}
