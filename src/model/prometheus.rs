//! Prometheus-shape input documents
//!
//! Decode-side model. Keyed lists keep their synthetic document keys so the
//! transformer can report which entry violated the schema contract, and so
//! output order follows input order.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use super::keyed;

/// A decoded Prometheus-shape metric set (the `metrics` container body).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricSet {
    /// Metrics keyed by their synthetic input key, in document order
    #[serde(default, deserialize_with = "keyed::entries")]
    pub metric: Vec<(String, Metric)>,
}

/// One input metric: a name, a label set and a points variant.
#[derive(Debug, Clone, Deserialize)]
pub struct Metric {
    pub name: String,
    #[serde(default)]
    pub labels: Labels,
    #[serde(rename = "metric-points")]
    pub metric_points: MetricPoints,
}

/// Label container; the inner list is keyed by label name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Labels {
    #[serde(default, deserialize_with = "keyed::entries")]
    pub label: Vec<(String, Label)>,
}

/// One label: a (name, value) string pair.
#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: String,
    pub value: String,
}

/// The `metric-points` container around the choice node.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricPoints {
    #[serde(rename = "metric-points-choice")]
    pub metric_points_choice: PointsChoice,
}

/// The two point encodings the schema allows, plus an explicit catch-all.
///
/// `List` carries two-or-more points keyed by timestamp (the minimum is a
/// schema validation concern, not enforced here); `Single` carries exactly
/// one point inline. Anything else decodes into `Unrecognized` and is
/// surfaced by the transformer as a contract violation rather than being
/// silently dropped.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PointsChoice {
    List {
        #[serde(rename = "metric-point", deserialize_with = "keyed::entries")]
        metric_point: Vec<(String, Point)>,
    },
    Single(Point),
    Unrecognized(Value),
}

/// One observation: decimal seconds since the Unix epoch and a decimal value.
#[derive(Debug, Clone, Deserialize)]
pub struct Point {
    pub timestamp: Decimal,
    pub value: Decimal,
}
