use std::fmt;
use std::fmt::Formatter;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Column names of the shaped table, in output order
pub const COLUMNS: [&str; 12] = [
    "time",
    "hour",
    "temperature",
    "latitude",
    "longitude",
    "generationtime_ms",
    "utc_offset_seconds",
    "timezone",
    "timezone_abbreviation",
    "elevation",
    "time_unit",
    "temperature_unit",
];

/// One forecast hour with the location metadata and units repeated on every row
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HourlyRecord {
    pub time: NaiveDate,
    pub hour: NaiveTime,
    pub temperature: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    pub generationtime_ms: f64,
    pub utc_offset_seconds: i64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub elevation: f64,
    pub time_unit: String,
    pub temperature_unit: String,
}

impl HourlyRecord {
    /// Recombines the date and time of day into the local date time of the forecast hour
    pub fn date_time(&self) -> NaiveDateTime {
        self.time.and_time(self.hour)
    }

    /// Header line matching the Display output of a record
    pub fn header() -> String {
        format!("{:<10} {:<8} {:>11} {:>8} {:>9} {:>17} {:>18} {:<14} {:<21} {:>9} {:<9} {:<16}",
                COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3], COLUMNS[4], COLUMNS[5],
                COLUMNS[6], COLUMNS[7], COLUMNS[8], COLUMNS[9], COLUMNS[10], COLUMNS[11])
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for HourlyRecord {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let temperature = self.temperature
            .map_or("NaN".to_string(), |t| format!("{:.1}", t));

        write!(f, "{:<10} {:<8} {:>11} {:>8.4} {:>9.4} {:>17.4} {:>18} {:<14} {:<21} {:>9.1} {:<9} {:<16}",
               self.time.to_string(), self.hour.to_string(), temperature,
               self.latitude, self.longitude, self.generationtime_ms,
               self.utc_offset_seconds, self.timezone, self.timezone_abbreviation,
               self.elevation, self.time_unit, self.temperature_unit)
    }
}

/// Formats the first rows of a table together with a header line
///
/// # Arguments
///
/// * 'records' - the shaped table
/// * 'rows' - max number of rows to include
pub fn format_head(records: &[HourlyRecord], rows: usize) -> String {
    let mut output = HourlyRecord::header();
    for record in records.iter().take(rows) {
        output.push('\n');
        output.push_str(&record.to_string());
    }

    output
}
