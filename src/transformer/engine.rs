//! Transform engine - Prometheus to PAGODA metric set conversion
//!
//! Converts a decoded Prometheus-shape metric set into the PAGODA shape:
//! every timestamp becomes an ISO-8601 UTC string, every value is
//! normalized to 2 fractional digits, and every metric gains a derived
//! `label-set-id` that keys it in the output collection.
//!
//! The engine is pure: it owns no I/O and no state beyond its options, and
//! it never logs: contract violations come back in the result for the
//! caller to report.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{SchemaError, TransformError};
use crate::model::{pagoda, prometheus};

use super::{identity, timestamp};

/// Output values carry the `decimal64 fraction-digits 2` scale.
const FRACTION_DIGITS: u32 = 2;

/// What to do when one metric violates the schema contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Fail the whole batch on the first violating metric
    #[default]
    Abort,
    /// Omit the violating metric and report it alongside the output
    Skip,
}

/// Transform engine configuration and entry point.
#[derive(Debug, Clone, Default)]
pub struct TransformEngine {
    on_metric_error: ErrorPolicy,
}

/// The outcome of one transform call.
#[derive(Debug)]
pub struct TransformReport {
    /// The assembled output document
    pub document: pagoda::Document,
    /// Metrics omitted under [`ErrorPolicy::Skip`], with their input keys
    pub skipped: Vec<SkippedMetric>,
}

/// One metric omitted from the output, and why.
#[derive(Debug)]
pub struct SkippedMetric {
    pub key: String,
    pub error: SchemaError,
}

impl TransformEngine {
    /// Create an engine with the default (abort) error policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-metric error policy.
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.on_metric_error = policy;
        self
    }

    /// The configured per-metric error policy.
    pub fn error_policy(&self) -> ErrorPolicy {
        self.on_metric_error
    }

    /// Transform a decoded metric set.
    ///
    /// Metrics are processed in input iteration order. Two inputs mapping to
    /// the same `label-set-id` collapse to one output record: the later one
    /// wins, keeping the position of the first occurrence.
    pub fn transform(
        &self,
        input: &prometheus::MetricSet,
    ) -> Result<TransformReport, TransformError> {
        let mut metrics: Vec<pagoda::Metric> = Vec::with_capacity(input.metric.len());
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut skipped = Vec::new();

        for (key, metric) in &input.metric {
            match convert_metric(metric) {
                Ok(converted) => match positions.get(&converted.label_set_id) {
                    Some(&position) => metrics[position] = converted,
                    None => {
                        positions.insert(converted.label_set_id.clone(), metrics.len());
                        metrics.push(converted);
                    }
                },
                Err(error) => match self.on_metric_error {
                    ErrorPolicy::Abort => {
                        return Err(TransformError::Contract {
                            key: key.clone(),
                            source: error,
                        });
                    }
                    ErrorPolicy::Skip => skipped.push(SkippedMetric {
                        key: key.clone(),
                        error,
                    }),
                },
            }
        }

        Ok(TransformReport {
            document: pagoda::Document {
                metrics: pagoda::MetricSet { metric: metrics },
            },
            skipped,
        })
    }
}

/// Convert one input metric into its output record.
fn convert_metric(metric: &prometheus::Metric) -> Result<pagoda::Metric, SchemaError> {
    if metric.name.is_empty() {
        return Err(SchemaError::EmptyName);
    }

    let metric_points = convert_points(&metric.metric_points)?;

    let labels: Vec<pagoda::Label> = metric
        .labels
        .label
        .iter()
        .map(|(_, label)| pagoda::Label {
            name: label.name.clone(),
            value: label.value.clone(),
        })
        .collect();

    let label_set_id = identity::label_set_id(
        &metric.name,
        labels.iter().map(|l| (l.name.as_str(), l.value.as_str())),
    );

    Ok(pagoda::Metric {
        label_set_id,
        name: metric.name.clone(),
        labels: pagoda::Labels { label: labels },
        metric_points,
    })
}

/// Convert one points variant, preserving the variant.
fn convert_points(
    points: &prometheus::MetricPoints,
) -> Result<pagoda::MetricPoints, SchemaError> {
    let choice = match &points.metric_points_choice {
        prometheus::PointsChoice::Single(point) => {
            pagoda::PointsChoice::Single(convert_point(point)?)
        }
        prometheus::PointsChoice::List { metric_point } => {
            // The output list is keyed by the converted timestamp string;
            // duplicates after second-truncation collapse, later value wins.
            let mut converted: Vec<pagoda::Point> = Vec::with_capacity(metric_point.len());
            let mut positions: HashMap<String, usize> = HashMap::new();
            for (_, point) in metric_point {
                let point = convert_point(point)?;
                match positions.get(&point.timestamp) {
                    Some(&position) => converted[position] = point,
                    None => {
                        positions.insert(point.timestamp.clone(), converted.len());
                        converted.push(point);
                    }
                }
            }
            pagoda::PointsChoice::List {
                metric_point: converted,
            }
        }
        prometheus::PointsChoice::Unrecognized(_) => {
            return Err(SchemaError::UnrecognizedPointsVariant);
        }
    };

    Ok(pagoda::MetricPoints {
        metric_points_choice: choice,
    })
}

/// Convert one observation.
fn convert_point(point: &prometheus::Point) -> Result<pagoda::Point, SchemaError> {
    Ok(pagoda::Point {
        value: normalize_value(point.value),
        timestamp: timestamp::format_epoch_seconds(point.timestamp)?,
    })
}

/// Round half-up to 2 fractional digits and pin the scale so the zeros
/// survive serialization (`42.5` -> `42.50`).
fn normalize_value(value: Decimal) -> Decimal {
    let mut normalized =
        value.round_dp_with_strategy(FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero);
    normalized.rescale(FRACTION_DIGITS);
    normalized
}
