//! Cache keys derived from search queries.

use core::fmt::{self, Write as _};

use serde_json::Value;
use trek_types::{SearchQuery, TrekError};

/// Canonical, field-order-insensitive serialization of a [`SearchQuery`].
///
/// Object keys are sorted and unset fields are dropped, so two queries with the
/// same field values always produce the same fingerprint. The only-cached flag
/// says how to answer, not what to search for, and is left out. Stability
/// across process restarts or type-layout changes is not promised.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint a query.
    ///
    /// # Errors
    /// Returns `Data` if the query cannot be serialized.
    pub fn of(query: &SearchQuery) -> Result<Self, TrekError> {
        let mut value = serde_json::to_value(query)
            .map_err(|e| TrekError::Data(format!("cannot fingerprint query: {e}")))?;
        if let Some(root) = value.as_object_mut() {
            let drop_filters = root
                .get_mut("filters")
                .and_then(Value::as_object_mut)
                .is_some_and(|f| {
                    f.remove("only_cached");
                    f.is_empty()
                });
            if drop_filters {
                root.remove("filters");
            }
        }
        let mut out = String::new();
        write_canonical(&mut out, &value);
        Ok(Self(out))
    }

    /// The canonical text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn write_canonical(out: &mut String, value: &Value) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> =
                map.iter().filter(|(_, v)| !v.is_null()).collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (k, v)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                let _ = write!(out, "{}:", Value::String(k.clone()));
                write_canonical(out, v);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, v) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(out, v);
            }
            out.push(']');
        }
        other => {
            let _ = write!(out, "{other}");
        }
    }
}
