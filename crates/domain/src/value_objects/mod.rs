//! Value Objects - Immutable, identity-less domain primitives

mod date_range;
mod measurement_id;

pub use date_range::{
    DateRange, deserialize_calendar_date, has_four_digit_year, parse_calendar_date,
};
pub use measurement_id::MeasurementId;
