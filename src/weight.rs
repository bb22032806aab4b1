use std::fmt;
use std::str::FromStr;

use crate::layout::WeightedItem;

/// Compressive transform applied to a raw magnitude (market cap, volume, ...)
/// before it becomes a layout weight. The layout engine itself never
/// transforms weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightTransform {
    Linear,
    /// Square root keeps one dominant item from swallowing the map.
    #[default]
    Sqrt,
    /// `ln(1 + m)`
    Log,
}

impl WeightTransform {
    /// Transformed weight; negative or NaN magnitudes become 0.
    pub fn apply(self, magnitude: f64) -> f64 {
        if magnitude.is_nan() || magnitude <= 0.0 {
            return 0.0;
        }
        match self {
            WeightTransform::Linear => magnitude,
            WeightTransform::Sqrt => magnitude.sqrt(),
            WeightTransform::Log => magnitude.ln_1p(),
        }
    }
}

impl fmt::Display for WeightTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeightTransform::Linear => "linear",
            WeightTransform::Sqrt => "sqrt",
            WeightTransform::Log => "log",
        };
        f.write_str(name)
    }
}

impl FromStr for WeightTransform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(WeightTransform::Linear),
            "sqrt" => Ok(WeightTransform::Sqrt),
            "log" => Ok(WeightTransform::Log),
            other => anyhow::bail!("unknown weight transform '{}' (expected linear, sqrt or log)", other),
        }
    }
}

/// A domain record with a raw magnitude to size its tile by.
pub trait Weighted {
    fn magnitude(&self) -> f64;
}

/// Turn owned records into layout items.
pub fn weighted_items<R: Weighted>(
    records: impl IntoIterator<Item = R>,
    transform: WeightTransform,
) -> Vec<WeightedItem<R>> {
    records
        .into_iter()
        .map(|r| WeightedItem::new(transform.apply(r.magnitude()), r))
        .collect()
}

/// Layout items borrowing their records, for callers that keep the data.
pub fn weighted_refs<R: Weighted>(records: &[R], transform: WeightTransform) -> Vec<WeightedItem<&R>> {
    records
        .iter()
        .map(|r| WeightedItem::new(transform.apply(r.magnitude()), r))
        .collect()
}
