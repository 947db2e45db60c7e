//! Label set identity
//!
//! A metric's identity is its name plus its label set, independent of label
//! order. The id must be reproducible across runs, processes and
//! implementations, so it is a content hash over the sorted label
//! dictionary rather than any in-memory hash code.

use std::collections::BTreeMap;

/// Reserved dictionary key carrying the metric name.
const NAME_KEY: &str = "__name__";

/// Bytes of the digest kept in the identifier (16 hex characters).
const ID_BYTES: usize = 8;

// Separator framing keeps ("ab", "c") and ("a", "bc") distinct.
const KV_SEPARATOR: u8 = 0x1f; // Unit Separator (US)
const PAIR_SEPARATOR: u8 = 0x1e; // Record Separator (RS)

/// Compute the stable identifier for a metric's label set.
///
/// The dictionary is `{"__name__": name}` plus every label pair; a label
/// literally named `__name__` overwrites the reserved entry. Pairs are
/// hashed in lexicographic key order with BLAKE3 and the first 8 digest
/// bytes are hex-encoded.
pub fn label_set_id<'a, I>(name: &'a str, labels: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut dictionary = BTreeMap::new();
    dictionary.insert(NAME_KEY, name);
    for (key, value) in labels {
        dictionary.insert(key, value);
    }

    let mut hasher = blake3::Hasher::new();
    for (key, value) in &dictionary {
        hasher.update(key.as_bytes());
        hasher.update(&[KV_SEPARATOR]);
        hasher.update(value.as_bytes());
        hasher.update(&[PAIR_SEPARATOR]);
    }

    hex::encode(&hasher.finalize().as_bytes()[..ID_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_shape() {
        let id = label_set_id("cpu_usage", [("host", "a")]);
        assert_eq!(id.len(), ID_BYTES * 2);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_stable_under_label_reordering() {
        let forward = label_set_id("cpu_usage", [("host", "a"), ("region", "eu")]);
        let backward = label_set_id("cpu_usage", [("region", "eu"), ("host", "a")]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let first = label_set_id("cpu_usage", [("host", "a")]);
        let second = label_set_id("cpu_usage", [("host", "a")]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sensitive_to_name_and_labels() {
        let base = label_set_id("cpu_usage", [("host", "a")]);
        assert_ne!(base, label_set_id("mem_usage", [("host", "a")]));
        assert_ne!(base, label_set_id("cpu_usage", [("host", "b")]));
        assert_ne!(base, label_set_id("cpu_usage", [("node", "a")]));
        assert_ne!(base, label_set_id("cpu_usage", []));
    }

    #[test]
    fn test_separator_framing_prevents_concatenation_aliasing() {
        let split_one_way = label_set_id("m", [("ab", "c")]);
        let split_other_way = label_set_id("m", [("a", "bc")]);
        assert_ne!(split_one_way, split_other_way);
    }

    #[test]
    fn test_name_label_overwrites_reserved_entry() {
        // A label literally named __name__ replaces the metric name in the
        // dictionary, so the metric name no longer contributes.
        let first = label_set_id("cpu_usage", [("__name__", "override")]);
        let second = label_set_id("mem_usage", [("__name__", "override")]);
        assert_eq!(first, second);
    }
}
