//! Physical quantities: a value paired with its unit of measure.

use std::fmt;

/// A physical quantity as reported by a simulator: a magnitude plus the
/// unit it was measured in.
///
/// Global simulation time is a `PhysicalQuantity` accumulated across
/// steps. The unit string is carried verbatim from the simulator that
/// produced it — no conversion is ever applied.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicalQuantity {
    /// The numeric magnitude.
    pub value: f64,
    /// The unit of measure, e.g. `"ms"` or `"s"`.
    pub unit: String,
}

impl PhysicalQuantity {
    /// Create a quantity from a value and unit.
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
