//! Curve tables: keyed collections of piecewise numeric curves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A curve that can be sampled at any point.
pub trait Curve {
    fn eval(&self, x: f32) -> f32;
}

/// Read access to a table of named curves.
///
/// A row can exist without a usable curve (e.g. an unsupported curve type), so the
/// two lookups are separate.
pub trait CurveSource {
    fn has_row(&self, row_name: &str) -> bool;
    fn find_curve(&self, row_name: &str) -> Option<&dyn Curve>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Interpolation {
    #[default]
    Linear,
    Constant,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
    /// How to get from this key to the next one.
    #[serde(default)]
    pub interp: Interpolation,
}

/// A piecewise curve over keys sorted by time.
///
/// Outside the key range the curve holds the first/last value. An empty curve is 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichCurve {
    pub keys: Vec<CurveKey>,
}

impl RichCurve {
    pub fn new(mut keys: Vec<CurveKey>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// A linear curve through `(time, value)` points.
    pub fn linear(points: &[(f32, f32)]) -> Self {
        Self::new(
            points
                .iter()
                .map(|&(time, value)| CurveKey {
                    time,
                    value,
                    interp: Interpolation::Linear,
                })
                .collect(),
        )
    }
}

impl Curve for RichCurve {
    fn eval(&self, x: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };

        if x <= first.time {
            return first.value;
        }
        if x >= last.time {
            return last.value;
        }

        // first key with time > x; guaranteed to be in 1..len by the checks above
        let upper = self.keys.partition_point(|key| key.time <= x);
        let lo = &self.keys[upper - 1];
        let hi = &self.keys[upper];

        match lo.interp {
            Interpolation::Constant => lo.value,
            Interpolation::Linear => {
                let span = hi.time - lo.time;
                if span <= f32::EPSILON {
                    return hi.value;
                }
                let alpha = (x - lo.time) / span;
                lo.value + (hi.value - lo.value) * alpha
            }
        }
    }
}

/// A decoded curve table asset.
///
/// Rows mapped to `null` exist but could not be decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveTable {
    pub rows: BTreeMap<String, Option<RichCurve>>,
}

impl CurveSource for CurveTable {
    fn has_row(&self, row_name: &str) -> bool {
        self.rows.contains_key(row_name)
    }

    fn find_curve(&self, row_name: &str) -> Option<&dyn Curve> {
        self.rows
            .get(row_name)
            .and_then(Option::as_ref)
            .map(|curve| curve as &dyn Curve)
    }
}
