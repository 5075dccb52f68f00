//! A single statistical indicator as a year → value series.

use std::collections::BTreeMap;

use crate::error::{StatsError, StatsResult};

/// One indicator (e.g. population) with at most one value per year.
///
/// The code is always stored lowercase. Values iterate in ascending year order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measure {
    code: String,
    label: String,
    values: BTreeMap<u32, f64>,
}

impl Measure {
    /// Create an empty measure. `code` is lowercased.
    pub fn new(code: &str, label: impl Into<String>) -> Self {
        Self {
            code: code.to_lowercase(),
            label: label.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Value recorded for `year`.
    pub fn value(&self, year: u32) -> StatsResult<f64> {
        self.values
            .get(&year)
            .copied()
            .ok_or_else(|| StatsError::not_found(format!("no value found for year {year}")))
    }

    /// Record `value` for `year`, replacing any existing value for that year.
    pub fn set_value(&mut self, year: u32, value: f64) {
        self.values.insert(year, value);
    }

    /// All values, ordered by year.
    pub fn values(&self) -> &BTreeMap<u32, f64> {
        &self.values
    }

    /// Number of years with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean of all values, or `0.0` when there are none.
    pub fn average(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.values().sum::<f64>() / self.values.len() as f64
    }

    /// Last-year value minus first-year value, or `0.0` with fewer than two values.
    pub fn difference(&self) -> f64 {
        match self.first_and_last() {
            Some((first, last)) => last - first,
            None => 0.0,
        }
    }

    /// [`Self::difference`] relative to the first-year value, in percent.
    ///
    /// Returns `0.0` with fewer than two values or when the ratio is undefined.
    pub fn difference_as_percentage(&self) -> f64 {
        let Some((first, last)) = self.first_and_last() else {
            return 0.0;
        };
        let pct = (last - first) / first * 100.0;
        if pct.is_finite() { pct } else { 0.0 }
    }

    /// Fold `other` into this measure.
    ///
    /// Code and label are taken from `other`. Values are upserted per year, so years that only
    /// this measure has are kept and overlapping years take `other`'s value.
    pub fn combine(&mut self, other: Measure) {
        self.code = other.code;
        self.label = other.label;
        self.values.extend(other.values);
    }

    fn first_and_last(&self) -> Option<(f64, f64)> {
        if self.values.len() < 2 {
            return None;
        }
        let first = self.values.first_key_value()?.1;
        let last = self.values.last_key_value()?.1;
        Some((*first, *last))
    }
}
