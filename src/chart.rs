use std::ops::Range;
use std::path::Path;
use chrono::{NaiveDateTime, TimeDelta};
use log::{info, warn};
use plotters::coord::Shift;
use plotters::coord::types::RangedDateTime;
use plotters::prelude::*;
use crate::errors::ChartError;
use crate::models::hourly_record::HourlyRecord;

/// Line chart of forecasted temperatures
pub struct TemperatureChart {
    points: Vec<(NaiveDateTime, f64)>,
    unit: String,
}

impl TemperatureChart {
    /// Prepares a chart from the first hours of a shaped table.
    ///
    /// Hours without a temperature are skipped. The unit is taken from the first row.
    ///
    /// # Arguments
    ///
    /// * 'records' - the shaped table
    /// * 'hours' - max number of rows to plot, a table with fewer rows plots all of them
    pub fn new(records: &[HourlyRecord], hours: usize) -> Result<TemperatureChart, ChartError> {
        let first = records.first().ok_or(ChartError::EmptyData)?;

        let points = records.iter()
            .take(hours)
            .filter_map(|r| r.temperature.map(|t| (r.date_time(), t)))
            .collect::<Vec<(NaiveDateTime, f64)>>();

        if points.is_empty() {
            return Err(ChartError::EmptyData);
        }

        Ok(Self { points, unit: first.temperature_unit.clone() })
    }

    /// Label for the temperature axis
    pub fn y_desc(&self) -> String {
        format!("Temperature ({})", self.unit)
    }

    /// Axis ranges covering all points, widened when all points share the same value
    pub fn ranges(&self) -> (Range<NaiveDateTime>, Range<f64>) {
        let mut min_dt = self.points[0].0;
        let mut max_dt = self.points[0].0;
        let mut min_t = f64::INFINITY;
        let mut max_t = f64::NEG_INFINITY;
        for (dt, t) in &self.points {
            min_dt = min_dt.min(*dt);
            max_dt = max_dt.max(*dt);
            min_t = min_t.min(*t);
            max_t = max_t.max(*t);
        }

        if min_dt == max_dt {
            max_dt = max_dt + TimeDelta::hours(1);
        }

        let padding = if (max_t - min_t).abs() > 1e-6 { (max_t - min_t) * 0.1 } else { 1.0 };

        (min_dt..max_dt, (min_t - padding)..(max_t + padding))
    }

    /// Draws the chart on the given drawing area
    ///
    /// # Arguments
    ///
    /// * 'root' - the drawing area to draw on
    fn draw<DB: DrawingBackend>(&self, root: DrawingArea<DB, Shift>) -> Result<(), ChartError> {
        root.fill(&WHITE).map_err(drawing_error)?;

        let (x_range, y_range) = self.ranges();

        let mut chart = ChartBuilder::on(&root)
            .caption("Temperature by Hour", ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(70)
            .y_label_area_size(60)
            .build_cartesian_2d(RangedDateTime::from(x_range), y_range)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .x_desc("Datetime")
            .y_desc(self.y_desc())
            .x_label_formatter(&|dt: &NaiveDateTime| dt.format("%m-%d %H:%M").to_string())
            .x_labels(12)
            .light_line_style(BLACK.mix(0.15))
            .draw()
            .map_err(drawing_error)?;

        chart
            .draw_series(LineSeries::new(self.points.iter().copied(), BLUE.stroke_width(2)).point_size(3))
            .map_err(drawing_error)?
            .label("Temperature")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(drawing_error)?;

        root.present().map_err(drawing_error)?;

        Ok(())
    }

    /// Writes the chart to file, as svg if the path ends with .svg otherwise as a bitmap
    ///
    /// # Arguments
    ///
    /// * 'output' - path of the file to write
    /// * 'size' - width and height in pixels
    pub fn save(&self, output: &Path, size: (u32, u32)) -> Result<(), ChartError> {
        match output.extension().and_then(|e| e.to_str()) {
            Some("svg") => self.draw(SVGBackend::new(output, size).into_drawing_area()),
            _ => self.draw(BitMapBackend::new(output, size).into_drawing_area()),
        }
    }
}

fn drawing_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> ChartError {
    ChartError::Drawing(e.to_string())
}

/// Plots temperatures for the first hours of a shaped table and writes the chart to file
///
/// # Arguments
///
/// * 'records' - the shaped table
/// * 'hours' - number of hourly records to include in the plot
/// * 'output' - path of the chart file
/// * 'size' - width and height in pixels
/// * 'show' - open the written file in the system viewer
pub fn plot_temperature(records: &[HourlyRecord], hours: usize, output: &Path, size: (u32, u32), show: bool)
    -> Result<(), ChartError> {

    let chart = TemperatureChart::new(records, hours)?;
    chart.save(output, size)?;
    info!("temperature chart with {} points written to {}", chart.points.len(), output.display());

    if show {
        if let Err(e) = open::that(output) {
            warn!("{}", ChartError::from(e));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn records(hours: u32) -> Vec<HourlyRecord> {
        (0..hours).map(|h| HourlyRecord {
            time: NaiveDate::from_ymd_opt(2024, 1, 1 + h / 24).unwrap(),
            hour: NaiveTime::from_hms_opt(h % 24, 0, 0).unwrap(),
            temperature: Some(10.0 + h as f64),
            latitude: 4.0,
            longitude: -10.0,
            generationtime_ms: 0.5,
            utc_offset_seconds: 0,
            timezone: "UTC".to_string(),
            timezone_abbreviation: "UTC".to_string(),
            elevation: 0.0,
            time_unit: "iso8601".to_string(),
            temperature_unit: "°C".to_string(),
        }).collect()
    }

    #[test]
    fn empty_table_is_empty_data() {
        assert!(matches!(TemperatureChart::new(&[], 24), Err(ChartError::EmptyData)));
        assert!(matches!(plot_temperature(&[], 24, Path::new("never.png"), (1200, 500), false),
            Err(ChartError::EmptyData)));
    }

    #[test]
    fn only_first_hours_are_plotted() {
        let chart = TemperatureChart::new(&records(72), 24).unwrap();

        assert_eq!(chart.points.len(), 24);
        assert_eq!(chart.points[23].1, 33.0);
        assert_eq!(chart.points[23].0.to_string(), "2024-01-01 23:00:00");
    }

    #[test]
    fn short_table_plots_all_rows() {
        let chart = TemperatureChart::new(&records(5), 24).unwrap();

        assert_eq!(chart.points.len(), 5);
    }

    #[test]
    fn axis_label_uses_first_row_unit() {
        let mut table = records(3);
        table[0].temperature_unit = "°F".to_string();

        assert_eq!(TemperatureChart::new(&table, 24).unwrap().y_desc(), "Temperature (°F)");
    }

    #[test]
    fn missing_temperatures_are_skipped() {
        let mut table = records(4);
        table[1].temperature = None;
        let chart = TemperatureChart::new(&table, 24).unwrap();

        assert_eq!(chart.points.len(), 3);

        table.iter_mut().for_each(|r| r.temperature = None);
        assert!(matches!(TemperatureChart::new(&table, 24), Err(ChartError::EmptyData)));
    }

    #[test]
    fn temperatures_beyond_hour_limit_do_not_count() {
        let mut table = records(30);
        table.iter_mut().take(24).for_each(|r| r.temperature = None);

        assert!(matches!(TemperatureChart::new(&table, 24), Err(ChartError::EmptyData)));
        assert_eq!(TemperatureChart::new(&table, 30).unwrap().points.len(), 6);
    }

    #[test]
    fn ranges_cover_points_with_padding() {
        let chart = TemperatureChart::new(&records(11), 24).unwrap();
        let (x, y) = chart.ranges();

        assert_eq!(x.start.to_string(), "2024-01-01 00:00:00");
        assert_eq!(x.end.to_string(), "2024-01-01 10:00:00");
        assert!((y.start - 9.0).abs() < 1e-9);
        assert!((y.end - 21.0).abs() < 1e-9);
    }

    #[test]
    fn single_point_ranges_are_widened() {
        let chart = TemperatureChart::new(&records(1), 24).unwrap();
        let (x, y) = chart.ranges();

        assert_eq!(x.end - x.start, TimeDelta::hours(1));
        assert_eq!(y, 9.0..11.0);
    }
}
