//! Shared boundary types for the embed preview pipeline.
//!
//! This module defines the data contracts that cross component boundaries:
//! - Form → Coercion (in-memory): `FormInput`, the string-typed form snapshot
//! - Resolver → Surface (serialized): `ViewerConfig`, the typed option record
//! - Document collaborator → Dialog (read-only): `EmbedTarget`

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Option values
// ---------------------------------------------------------------------------

/// A single viewer option value. The viewer accepts booleans, mode names and
/// literal zoom percentages, so every option slot carries one of the three.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Number(u32),
    Text(String),
}

impl OptionValue {
    pub fn text(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Flag(b) => write!(f, "{b}"),
            OptionValue::Number(n) => write!(f, "{n}"),
            OptionValue::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolver → Surface boundary (serialized into the viewer's load call)
// ---------------------------------------------------------------------------

/// The fully resolved viewer configuration. One field per recognized viewer
/// option; there is no slot for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfig {
    pub container: OptionValue,
    pub zoom: OptionValue,
    pub show_sidebar: OptionValue,
    pub show_text: OptionValue,
    pub show_search: OptionValue,
    pub show_header: OptionValue,
    pub enable_url_changes: OptionValue,
}

// ---------------------------------------------------------------------------
// Form → Coercion boundary (in-memory only)
// ---------------------------------------------------------------------------

/// A serialized form snapshot: field name to raw string value. Unchecked
/// checkboxes are simply missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormInput {
    fields: BTreeMap<String, String>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FormInput {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Document collaborator → Dialog boundary
// ---------------------------------------------------------------------------

/// The document being previewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedTarget {
    pub title: String,
    /// Base URL of the document's viewer script, e.g. `.../doc.js`.
    pub document_viewer_js: String,
}

impl EmbedTarget {
    /// URL of the document data the viewer loads: the script URL plus `suffix`.
    pub fn data_url(&self, suffix: &str) -> String {
        format!("{}{}", self.document_viewer_js, suffix)
    }
}
