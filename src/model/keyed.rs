//! Order-preserving decode of keyed lists
//!
//! The input schema models its lists as JSON objects whose member names are
//! the entry keys. Decoding into a plain `HashMap` would randomize iteration
//! order and decoding into a `BTreeMap` would sort it; the transformer's
//! output must follow document order, so keyed lists decode into
//! `(key, entry)` pairs in the order they appear.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

/// Deserialize a JSON object into `(key, entry)` pairs in document order.
///
/// Intended for `#[serde(deserialize_with = "keyed::entries")]` fields.
pub fn entries<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct EntriesVisitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for EntriesVisitor<T>
    where
        T: Deserialize<'de>,
    {
        type Value = Vec<(String, T)>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map of keyed list entries")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor(PhantomData))
}
