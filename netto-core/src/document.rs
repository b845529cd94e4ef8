//! Persisted JSON document for saved and exported inputs.
//!
//! ```json
//! {
//!   "meta": { "app": "nettoit", "version": "v1", "savedAt": "2026-03-01T09:30:00Z" },
//!   "data": { "grossMonthly": 3700.0, "taxClass": "I", ... }
//! }
//! ```
//!
//! Exports carry `exportedAt` instead of `savedAt`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::EstimateInput;

pub const APP_ID: &str = "nettoit";
pub const APP_VERSION: &str = "v1";
/// Fixed key the autosaved document lives under.
pub const STORAGE_KEY: &str = "toolstack.nettoit.v1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Import failed: invalid JSON ({0})")]
    InvalidJson(String),

    #[error("failed to serialize document: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub app: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
}

impl DocumentMeta {
    fn current() -> Self {
        Self {
            app: APP_ID.to_string(),
            version: APP_VERSION.to_string(),
            saved_at: None,
            exported_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedDocument {
    pub meta: DocumentMeta,
    pub data: EstimateInput,
}

impl PersistedDocument {
    /// Document written to the store after every change.
    pub fn for_autosave(
        input: EstimateInput,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            meta: DocumentMeta {
                saved_at: Some(now),
                ..DocumentMeta::current()
            },
            data: input,
        }
    }

    /// Document written to an export file.
    pub fn for_export(
        input: EstimateInput,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            meta: DocumentMeta {
                exported_at: Some(now),
                ..DocumentMeta::current()
            },
            data: input,
        }
    }

    /// Two-space indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::Serialize(e.to_string()))
    }
}

/// Parses a saved or exported document into an input record.
///
/// The record is taken from `data` when present, otherwise from the
/// document root, and reconciled field by field. The `meta` block is not
/// checked; documents from other versions load as far as their fields match.
///
/// # Errors
///
/// [`DocumentError::InvalidJson`] when `text` is not JSON at all.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use netto_core::document::parse_input;
/// use netto_core::TaxClass;
///
/// let input = parse_input(r#"{"data":{"grossMonthly":4200,"taxClass":"III"}}"#).unwrap();
/// assert_eq!(input.gross_monthly, dec!(4200));
/// assert_eq!(input.tax_class, TaxClass::Three);
///
/// assert!(parse_input("not json").is_err());
/// ```
pub fn parse_input(text: &str) -> Result<EstimateInput, DocumentError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| DocumentError::InvalidJson(e.to_string()))?;

    let (record, source) = match value.get("data") {
        Some(data) if !data.is_null() => (data, "data"),
        _ => (&value, "root"),
    };
    debug!(source, "reconciling document");

    Ok(EstimateInput::reconcile(record))
}

/// `toolstack-nettoit-v1-YYYY-MM-DD.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!(
        "toolstack-{APP_ID}-{APP_VERSION}-{}.json",
        date.format("%Y-%m-%d")
    )
}
