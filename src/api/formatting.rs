//! Fix output formatting and serialization
//!
//! Text for people at the chart table, JSON for tooling and CSV for logging.

use super::types::Fix;
use serde::{Deserialize, Serialize};

/// How angles are written in text output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleStyle {
    /// Degrees, minutes and whole seconds: 12°30'00"
    #[default]
    Sexagesimal,
    /// Decimal degrees to four places: 12.5°
    Decimal,
}

/// Unsigned angle in degrees
pub fn format_angle(degrees: f64, style: AngleStyle) -> String {
    let magnitude = degrees.abs();
    match style {
        AngleStyle::Sexagesimal => {
            let total_seconds = (magnitude * 3600.0).round() as u64;
            let d = total_seconds / 3600;
            let m = (total_seconds / 60) % 60;
            let s = total_seconds % 60;
            format!("{}°{:02}'{:02}\"", d, m, s)
        }
        AngleStyle::Decimal => {
            let text = format!("{:.4}", magnitude);
            let text = text.trim_end_matches('0').trim_end_matches('.');
            format!("{}°", text)
        }
    }
}

pub fn format_latitude(degrees: f64, style: AngleStyle) -> String {
    let hemisphere = if degrees < 0.0 { 'S' } else { 'N' };
    format!("{} {}", format_angle(degrees, style), hemisphere)
}

pub fn format_longitude(degrees: f64, style: AngleStyle) -> String {
    let hemisphere = if degrees < 0.0 { 'W' } else { 'E' };
    format!("{} {}", format_angle(degrees, style), hemisphere)
}

/// Fix in presentation units: degrees and nautical miles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedFix {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    /// Sum of squared residuals (rad²)
    pub error: f64,
    pub residuals_nm: Vec<f64>,
    pub worst_residual_nm: f64,
    pub observation_count: usize,
    pub strategy: String,
    pub evaluations: usize,
    pub computation_time_us: u64,
}

impl From<&Fix> for FormattedFix {
    fn from(fix: &Fix) -> Self {
        Self {
            latitude_deg: fix.position.lat_degrees(),
            longitude_deg: fix.position.long_degrees(),
            error: fix.error,
            residuals_nm: fix.residuals_nm(),
            worst_residual_nm: fix.worst_residual_nm(),
            observation_count: fix.observation_count,
            strategy: fix.strategy.clone(),
            evaluations: fix.evaluations,
            computation_time_us: fix.computation_time_us,
        }
    }
}

/// Human-readable text formatter
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    pub angle_style: AngleStyle,
    /// Single line output
    pub compact: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decimal() -> Self {
        Self {
            angle_style: AngleStyle::Decimal,
            ..Self::default()
        }
    }

    pub fn format_text(&self, fix: &Fix) -> String {
        let formatted = FormattedFix::from(fix);
        let lat = format_latitude(formatted.latitude_deg, self.angle_style);
        let long = format_longitude(formatted.longitude_deg, self.angle_style);

        if self.compact {
            return format!(
                "Fix: {}, {} | Obs:{}, Worst:{:.2}nm",
                lat, long, formatted.observation_count, formatted.worst_residual_nm
            );
        }

        let mut output = String::new();
        output.push_str("Position:\n");
        output.push_str(&format!("  Latitude:  {}\n", lat));
        output.push_str(&format!("  Longitude: {}\n", long));

        output.push_str("\nFit:\n");
        output.push_str(&format!("  Observations: {}\n", formatted.observation_count));
        output.push_str(&format!("  Error:        {:.3e} rad²\n", formatted.error));
        for (i, residual) in formatted.residuals_nm.iter().enumerate() {
            output.push_str(&format!("  Residual #{}:  {:+.2} nm\n", i + 1, residual));
        }
        if fix.is_degenerate() {
            output.push_str("  Warning:      fewer than two circles, position is not constrained\n");
        }

        output.push_str("\nSearch:\n");
        output.push_str(&format!("  Strategy:    {}\n", formatted.strategy));
        output.push_str(&format!("  Evaluations: {}\n", formatted.evaluations));
        output.push_str(&format!("  Comp Time:   {} μs\n", formatted.computation_time_us));

        output
    }
}

/// JSON formatter for structured output
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json(&self, fix: &Fix) -> Result<String, serde_json::Error> {
        let formatted = FormattedFix::from(fix);
        if self.pretty {
            serde_json::to_string_pretty(&formatted)
        } else {
            serde_json::to_string(&formatted)
        }
    }
}

/// CSV formatter for data logging
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    pub include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self { include_header: true }
    }
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> String {
        "latitude,longitude,error,worst_residual_nm,observation_count,strategy,evaluations,computation_time_us"
            .to_string()
    }

    /// One row, preceded by the header when `include_header` is set
    pub fn format_csv(&self, fix: &Fix) -> String {
        let formatted = FormattedFix::from(fix);
        let row = format!(
            "{:.6},{:.6},{:.6e},{:.3},{},{},{},{}",
            formatted.latitude_deg,
            formatted.longitude_deg,
            formatted.error,
            formatted.worst_residual_nm,
            formatted.observation_count,
            formatted.strategy,
            formatted.evaluations,
            formatted.computation_time_us
        );
        if self.include_header {
            format!("{}\n{}", self.header(), row)
        } else {
            row
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coordinate;

    fn sample_fix() -> Fix {
        Fix {
            position: Coordinate::from_degrees(-33.5, 151.25),
            error: 1e-8,
            residuals: vec![0.5_f64.to_radians() / 60.0, -1.0_f64.to_radians() / 60.0],
            observation_count: 2,
            evaluations: 400,
            strategy: "grid_refinement".to_string(),
            computation_time_us: 12,
        }
    }

    #[test]
    fn test_sexagesimal_angle() {
        assert_eq!(format_angle(12.5, AngleStyle::Sexagesimal), "12°30'00\"");
        assert_eq!(format_angle(-0.5125, AngleStyle::Sexagesimal), "0°30'45\"");
        // 59.9999 seconds rounds up into the next minute
        assert_eq!(format_angle(1.0 - 1e-7, AngleStyle::Sexagesimal), "1°00'00\"");
    }

    #[test]
    fn test_decimal_angle_trims_zeros() {
        assert_eq!(format_angle(12.5, AngleStyle::Decimal), "12.5°");
        assert_eq!(format_angle(45.0, AngleStyle::Decimal), "45°");
        assert_eq!(format_angle(1.23456, AngleStyle::Decimal), "1.2346°");
    }

    #[test]
    fn test_hemispheres() {
        assert_eq!(format_latitude(-33.5, AngleStyle::Decimal), "33.5° S");
        assert_eq!(format_latitude(10.0, AngleStyle::Decimal), "10° N");
        assert_eq!(format_longitude(-70.25, AngleStyle::Decimal), "70.25° W");
        assert_eq!(format_longitude(151.25, AngleStyle::Sexagesimal), "151°15'00\" E");
    }

    #[test]
    fn test_text_output() {
        let fix = sample_fix();
        let text = TextFormatter::new().format_text(&fix);
        assert!(text.contains("Latitude:  33°30'00\" S"));
        assert!(text.contains("Longitude: 151°15'00\" E"));
        assert!(text.contains("Residual #2:  -1.00 nm"));
        assert!(!text.contains("Warning"));

        let compact = TextFormatter {
            compact: true,
            ..TextFormatter::decimal()
        }
        .format_text(&fix);
        assert_eq!(compact, "Fix: 33.5° S, 151.25° E | Obs:2, Worst:1.00nm");
    }

    #[test]
    fn test_json_output() {
        let json = JsonFormatter::new().format_json(&sample_fix()).unwrap();
        let parsed: FormattedFix = serde_json::from_str(&json).unwrap();
        assert!((parsed.latitude_deg + 33.5).abs() < 1e-9);
        assert!((parsed.worst_residual_nm - 1.0).abs() < 1e-9);
        assert_eq!(parsed.strategy, "grid_refinement");
    }

    #[test]
    fn test_csv_output() {
        let formatter = CsvFormatter::new();
        let csv = formatter.format_csv(&sample_fix());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], formatter.header());
        assert!(lines[1].starts_with("-33.500000,151.250000,"));
        assert_eq!(
            lines[1].split(',').count(),
            formatter.header().split(',').count()
        );
    }
}
