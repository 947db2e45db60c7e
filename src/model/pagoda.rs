//! PAGODA-shape output documents
//!
//! Encode-side model. The metric list is a sequence keyed by the derived
//! `label-set-id`; labels are an ordered sequence mirroring input order;
//! timestamps are ISO-8601 UTC strings. `Deserialize` is implemented as well
//! so round-trip tests can read encoded documents back.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The output document root: `{"metrics": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub metrics: MetricSet,
}

/// The `metrics` container: a sequence of transformed metric records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub metric: Vec<Metric>,
}

/// One transformed metric record, keyed by its derived label set identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    #[serde(rename = "label-set-id")]
    pub label_set_id: String,
    pub name: String,
    pub labels: Labels,
    #[serde(rename = "metric-points")]
    pub metric_points: MetricPoints,
}

/// Label container; the list preserves the input label order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Labels {
    pub label: Vec<Label>,
}

/// One label: a (name, value) string pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub value: String,
}

/// The `metric-points` container around the choice node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoints {
    #[serde(rename = "metric-points-choice")]
    pub metric_points_choice: PointsChoice,
}

/// Output points variant; always mirrors the input variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointsChoice {
    List {
        #[serde(rename = "metric-point")]
        metric_point: Vec<Point>,
    },
    Single(Point),
}

/// One converted observation.
///
/// The value carries exactly 2 fractional digits and serializes as a decimal
/// string; the timestamp is a `Z`-suffixed ISO-8601 UTC string and keys the
/// point within a list variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub value: Decimal,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn sample_point() -> Point {
        Point {
            value: Decimal::new(4250, 2),
            timestamp: "2022-02-01T12:30:45Z".to_string(),
        }
    }

    #[test]
    fn test_single_variant_encodes_inline() {
        let points = MetricPoints {
            metric_points_choice: PointsChoice::Single(sample_point()),
        };
        let encoded = serde_json::to_value(&points).unwrap();
        assert_eq!(
            encoded,
            json!({
                "metric-points-choice": {
                    "value": "42.50",
                    "timestamp": "2022-02-01T12:30:45Z"
                }
            })
        );
    }

    #[test]
    fn test_list_variant_encodes_as_array() {
        let points = MetricPoints {
            metric_points_choice: PointsChoice::List {
                metric_point: vec![sample_point()],
            },
        };
        let encoded = serde_json::to_value(&points).unwrap();
        assert_eq!(
            encoded,
            json!({
                "metric-points-choice": {
                    "metric-point": [
                        {"value": "42.50", "timestamp": "2022-02-01T12:30:45Z"}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_document_round_trip() {
        let document = Document {
            metrics: MetricSet {
                metric: vec![Metric {
                    label_set_id: "a1b2c3d4e5f60718".to_string(),
                    name: "cpu_usage".to_string(),
                    labels: Labels {
                        label: vec![Label {
                            name: "host".to_string(),
                            value: "a".to_string(),
                        }],
                    },
                    metric_points: MetricPoints {
                        metric_points_choice: PointsChoice::Single(sample_point()),
                    },
                }],
            },
        };

        let bytes = serde_json::to_vec(&document).unwrap();
        let decoded: Document = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, document);
    }
}
