use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw submitted form fields, keyed by field name.
///
/// A field that was absent from the submission reads as the empty string, so
/// missing inputs fail schema validation the same way blank ones do; there is
/// no separate extraction error channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFields(BTreeMap<String, String>);

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `name`, or `""` if the field was not submitted.
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// The submitted values, echoed verbatim for form re-population.
    pub fn echo(&self) -> BTreeMap<String, String> {
        self.0.clone()
    }
}

impl From<BTreeMap<String, String>> for RawFields {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for RawFields {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut fields = Self::new();
        for (name, value) in pairs {
            fields.insert(name, value);
        }
        fields
    }
}
