//! Flattening of row tuples into a single JSON array.
//!
//! A sequence of N rows, each W columns wide, becomes one array of N×W
//! scalars in row-major order: `[(d1, t1), (d2, t2)]` → `[d1, t1, d2, t2]`.

use crate::types::{PrecipitationReading, TemperatureObservation, TemperatureStats};
use serde_json::Value;

/// A row that can be laid out as a fixed number of JSON scalars.
pub trait FlatRow {
    /// Append this row's columns to `out`, in column order.
    fn push_columns(&self, out: &mut Vec<Value>);
}

impl FlatRow for TemperatureObservation {
    fn push_columns(&self, out: &mut Vec<Value>) {
        out.push(Value::from(self.date.as_str()));
        out.push(Value::from(self.tobs));
    }
}

impl FlatRow for PrecipitationReading {
    fn push_columns(&self, out: &mut Vec<Value>) {
        out.push(Value::from(self.date.as_str()));
        out.push(Value::from(self.prcp));
    }
}

impl FlatRow for TemperatureStats {
    fn push_columns(&self, out: &mut Vec<Value>) {
        out.push(Value::from(self.min));
        out.push(Value::from(self.avg));
        out.push(Value::from(self.max));
    }
}

/// Flatten rows into one array.
pub fn flatten<'a, T, I>(rows: I) -> Vec<Value>
where
    T: FlatRow + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut out = Vec::new();
    for row in rows {
        row.push_columns(&mut out);
    }
    out
}
