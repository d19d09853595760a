use rust_decimal::Decimal;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::metric::Metric;

/// One reported figure: either the bare number or the number with its
/// explanation, depending on whether the caller asked for explanations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum KpiValue {
    Explained { value: Decimal, explanation: String },
    Bare(Decimal),
}

impl KpiValue {
    pub fn value(&self) -> Decimal {
        match self {
            Self::Explained { value, .. } => *value,
            Self::Bare(value) => *value,
        }
    }

    pub fn explanation(&self) -> Option<&str> {
        match self {
            Self::Explained { explanation, .. } => Some(explanation),
            Self::Bare(_) => None,
        }
    }
}

/// Metrics for a single period, in reporting order.
///
/// Serialises as a JSON object keyed by [`Metric::label`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KpiResult {
    entries: Vec<(Metric, KpiValue)>,
}

impl KpiResult {
    pub(crate) fn push(&mut self, metric: Metric, value: KpiValue) {
        self.entries.push((metric, value));
    }

    pub fn get(&self, metric: Metric) -> Option<&KpiValue> {
        self.entries
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, v)| v)
    }

    /// Shorthand for the numeric value of a metric.
    pub fn value(&self, metric: Metric) -> Option<Decimal> {
        self.get(metric).map(KpiValue::value)
    }

    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.entries.iter().map(|(m, _)| *m)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, &KpiValue)> {
        self.entries.iter().map(|(m, v)| (*m, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for KpiResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (metric, value) in &self.entries {
            map.serialize_entry(metric.label(), value)?;
        }
        map.end()
    }
}

/// Per-period results, in the caller's period order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodicKpiResult {
    periods: Vec<(String, KpiResult)>,
}

impl PeriodicKpiResult {
    pub(crate) fn push(&mut self, label: &str, result: KpiResult) {
        self.periods.push((label.to_string(), result));
    }

    pub fn get(&self, label: &str) -> Option<&KpiResult> {
        self.periods
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, r)| r)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.periods.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KpiResult)> {
        self.periods.iter().map(|(l, r)| (l.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

impl Serialize for PeriodicKpiResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.periods.len()))?;
        for (label, result) in &self.periods {
            map.serialize_entry(label, result)?;
        }
        map.end()
    }
}
