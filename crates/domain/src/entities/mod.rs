//! Domain entities - Objects with identity and lifecycle

mod measurement;

pub use measurement::{Measurement, NewMeasurement};
