//! JSON binding codec
//!
//! Translates between raw bytes and the typed documents in [`crate::model`].
//! The schemas a codec instance binds to are explicit [`SchemaDescriptor`]
//! values supplied at construction; there is no process-global schema
//! registry. The core transformer never touches bytes; it consumes what
//! [`Codec::decode`] produces and its output is handed to [`Codec::encode`].

use serde_json::Value;

use crate::error::CodecError;
use crate::model::{pagoda, prometheus};

/// Identifies one schema a codec binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaDescriptor {
    /// Schema module name
    pub module: &'static str,
    /// Module revision date
    pub revision: &'static str,
    /// Top-level container holding the metric list
    pub container: &'static str,
}

impl SchemaDescriptor {
    /// Module-qualified container name, e.g. `prometheus:metrics`.
    fn qualified_container(&self) -> String {
        format!("{}:{}", self.module, self.container)
    }
}

impl std::fmt::Display for SchemaDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.module, self.revision)
    }
}

/// The Prometheus-shape input schema.
pub const PROMETHEUS: SchemaDescriptor = SchemaDescriptor {
    module: "prometheus",
    revision: "2021-11-18",
    container: "metrics",
};

/// The PAGODA-shape output schema.
pub const PROMETHEUS_PAGODA: SchemaDescriptor = SchemaDescriptor {
    module: "prometheus-pagoda",
    revision: "2022-08-05",
    container: "metrics",
};

/// Decoder/encoder pair for one transform pipeline.
#[derive(Debug, Clone)]
pub struct Codec {
    input: SchemaDescriptor,
    output: SchemaDescriptor,
    pretty: bool,
}

impl Codec {
    /// Create a codec bound to the Prometheus and PAGODA schemas.
    pub fn new() -> Self {
        Self {
            input: PROMETHEUS,
            output: PROMETHEUS_PAGODA,
            pretty: false,
        }
    }

    /// Set whether encoded documents are pretty-printed.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// The input schema this codec decodes.
    pub fn input_schema(&self) -> SchemaDescriptor {
        self.input
    }

    /// The output schema this codec encodes.
    pub fn output_schema(&self) -> SchemaDescriptor {
        self.output
    }

    /// Decode raw bytes into a Prometheus-shape metric set.
    ///
    /// The document root may be the container body itself, or wrap it under
    /// the container name, bare (`{"metrics": ...}`) or module-qualified
    /// (`{"prometheus:metrics": ...}`) as RFC 7951 emits it.
    pub fn decode(&self, raw: &[u8]) -> Result<prometheus::MetricSet, CodecError> {
        let root: Value = serde_json::from_slice(raw).map_err(|e| self.decode_error(e))?;
        let body = self.unwrap_container(root);
        serde_json::from_value(body).map_err(|e| self.decode_error(e))
    }

    /// Encode a PAGODA-shape document to bytes.
    pub fn encode(&self, document: &pagoda::Document) -> Result<Vec<u8>, CodecError> {
        let result = if self.pretty {
            serde_json::to_vec_pretty(document)
        } else {
            serde_json::to_vec(document)
        };
        result.map_err(|e| CodecError::Encode {
            schema: self.output.to_string(),
            source: e,
        })
    }

    /// Strip an explicit top-level container wrapper, if present.
    fn unwrap_container(&self, mut root: Value) -> Value {
        if let Some(object) = root.as_object_mut() {
            for name in [
                self.input.qualified_container(),
                self.input.container.to_string(),
            ] {
                if let Some(body) = object.remove(&name) {
                    if body.is_object() {
                        return body;
                    }
                    // Not a container body; put it back and decode as-is.
                    object.insert(name, body);
                    break;
                }
            }
        }
        root
    }

    fn decode_error(&self, source: serde_json::Error) -> CodecError {
        CodecError::Decode {
            schema: self.input.to_string(),
            source,
        }
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"metric": {"k1": {
        "name": "cpu_usage",
        "metric-points": {"metric-points-choice": {"value": 42.5, "timestamp": 1643723445}}
    }}}"#;

    #[test]
    fn test_decode_bare_container_body() {
        let set = Codec::new().decode(BODY.as_bytes()).unwrap();
        assert_eq!(set.metric.len(), 1);
        assert_eq!(set.metric[0].0, "k1");
    }

    #[test]
    fn test_decode_wrapped_container() {
        let wrapped = format!(r#"{{"metrics": {}}}"#, BODY);
        let set = Codec::new().decode(wrapped.as_bytes()).unwrap();
        assert_eq!(set.metric.len(), 1);
    }

    #[test]
    fn test_decode_module_qualified_container() {
        let wrapped = format!(r#"{{"prometheus:metrics": {}}}"#, BODY);
        let set = Codec::new().decode(wrapped.as_bytes()).unwrap();
        assert_eq!(set.metric.len(), 1);
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        let err = Codec::new().decode(b"{not json").unwrap_err();
        assert!(matches!(err, CodecError::Decode { .. }));
        assert!(err.to_string().contains("prometheus@2021-11-18"));
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let err = Codec::new().decode(br#"{"metric": [1, 2, 3]}"#).unwrap_err();
        assert!(matches!(err, CodecError::Decode { .. }));
    }

    #[test]
    fn test_encode_pretty_toggle() {
        let document = crate::model::pagoda::Document {
            metrics: crate::model::pagoda::MetricSet { metric: vec![] },
        };
        let compact = Codec::new().encode(&document).unwrap();
        let pretty = Codec::new().with_pretty(true).encode(&document).unwrap();
        assert!(!compact.contains(&b'\n'));
        assert!(pretty.contains(&b'\n'));
    }
}
