//! Shared wire and domain types for Credscope.
//!
//! The backend is a Spring-Data style JSON API, so paged responses use
//! camelCase field names and nest the page metadata under `pageable`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Operator-assigned risk classification for a record.
///
/// The variants carry the exact labels the backend stores. An unset
/// severity travels as an empty string on the wire and is modelled as
/// `None` on the record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "MENOS GRAVE")]
    MenosGrave,
    #[serde(rename = "GRAVE")]
    Grave,
    #[serde(rename = "MUITO GRAVE")]
    MuitoGrave,
}

impl Severity {
    /// Every assignable severity, in ascending order of gravity.
    pub const ALL: [Severity; 3] = [Severity::MenosGrave, Severity::Grave, Severity::MuitoGrave];

    /// The wire label for this severity.
    pub fn label(self) -> &'static str {
        match self {
            Severity::MenosGrave => "MENOS GRAVE",
            Severity::Grave => "GRAVE",
            Severity::MuitoGrave => "MUITO GRAVE",
        }
    }

    /// Parse a wire label. Unknown labels are rejected, not coerced.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "MENOS GRAVE" => Some(Severity::MenosGrave),
            "GRAVE" => Some(Severity::Grave),
            "MUITO GRAVE" => Some(Severity::MuitoGrave),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One harvested credential entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Backend-assigned identity; row key and mutation target.
    pub id: i64,
    /// Arbitrary text, not guaranteed to be a well-formed URL.
    pub url: String,
    /// Login identifier; free text despite the name.
    pub email: String,
    pub password: String,
    /// Operator judgment of whether this is a confirmed credential.
    pub valid: bool,
    /// Closed-set classification, unset serialized as `""`.
    #[serde(default, with = "severity_field")]
    pub severity: Option<Severity>,
}

/// Page metadata echoed by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    pub page_number: u32,
    pub page_size: u32,
}

/// A server-delivered slice of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Records in server-determined order.
    pub content: Vec<Record>,
    pub pageable: Pageable,
    /// Total record count matching the current filter, across all pages.
    pub total_elements: u64,
}

/// serde adapter mapping the backend's `""` severity to `None`.
mod severity_field {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Severity>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(severity) => serializer.serialize_str(severity.label()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Severity>, D::Error> {
        let label = String::deserialize(deserializer)?;
        if label.is_empty() {
            return Ok(None);
        }
        Severity::parse(&label)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown severity label: {label}")))
    }
}
