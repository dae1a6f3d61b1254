use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::FieldErrors;

/// The transient result of one form submission attempt.
///
/// Carries per-field errors, an echo of the raw submitted values (so the form
/// can be re-populated), and an optional top-level message. Created fresh per
/// attempt, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormState {
    /// State for a failed validation: field errors, echoed values, message.
    pub fn validation(
        errors: FieldErrors,
        values: BTreeMap<String, String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            errors: errors.into_map(),
            values,
            message: Some(message.into()),
        }
    }

    /// State for a failed persistence attempt: echoed values and a generic
    /// message only (the store detail stays server-side).
    pub fn database(values: BTreeMap<String, String>, message: impl Into<String>) -> Self {
        Self {
            errors: BTreeMap::new(),
            values,
            message: Some(message.into()),
        }
    }

    /// State carrying a top-level message only (sign-in failures).
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: BTreeMap::new(),
            values: BTreeMap::new(),
            message: Some(message.into()),
        }
    }
}
