//! Public API for computing and reporting position fixes

pub mod fix;
pub mod formatting;
pub mod types;

pub use fix::{solve_position, solve_position_with, PositionSolver};
pub use formatting::{
    format_angle, format_latitude, format_longitude, AngleStyle, CsvFormatter, FormattedFix,
    JsonFormatter, TextFormatter,
};
pub use types::{ApiError, ApiResult, Fix};
