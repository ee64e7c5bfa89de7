// 📇 Entity Record - The one record shape every business module stores
//
// Identity: `id` is generated at creation and never changes.
// Values: title, category, display fields and numeric attributes change
// through panel edits; `score` is always derived from the attributes.
// History: append-only, timestamped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Numeric attribute set, keyed by attribute name
pub type Attributes = BTreeMap<String, f64>;

// ============================================================================
// ATTRIBUTE SPEC
// ============================================================================

/// Declares one numeric attribute a module understands, with its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    /// Increment used by the UI's +/- controls
    pub step: f64,
}

impl AttributeSpec {
    pub const fn new(key: &'static str, label: &'static str, min: f64, max: f64, step: f64) -> Self {
        AttributeSpec {
            key,
            label,
            min,
            max,
            step,
        }
    }

    /// 0..=100 with unit steps, the common case
    pub const fn percent(key: &'static str, label: &'static str) -> Self {
        AttributeSpec::new(key, label, 0.0, 100.0, 1.0)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

// ============================================================================
// HISTORY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub at: DateTime<Utc>,
    pub message: String,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.at.format("%Y-%m-%d %H:%M:%S"), self.message)
    }
}

// ============================================================================
// ENTITY RECORD
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Stable identity, unique within its store
    pub id: String,

    pub title: String,

    /// One of the owning module's categories
    pub category: String,

    /// Display attributes (account, requester, tags, ...)
    pub fields: BTreeMap<String, String>,

    /// Numeric attributes, each within its AttributeSpec bounds
    pub attributes: Attributes,

    /// Derived by the module's scoring function
    pub score: f64,

    pub created_at: DateTime<Utc>,

    /// Append-only log of what happened to this record
    pub history: Vec<HistoryEntry>,
}

impl EntityRecord {
    pub fn new(id: String, title: impl Into<String>, category: impl Into<String>) -> Self {
        EntityRecord {
            id,
            title: title.into(),
            category: category.into(),
            fields: BTreeMap::new(),
            attributes: Attributes::new(),
            score: 0.0,
            created_at: Utc::now(),
            history: Vec::new(),
        }
    }

    /// Record without an identity yet; the owning controller assigns one
    pub fn draft(title: impl Into<String>, category: impl Into<String>) -> Self {
        EntityRecord::new(String::new(), title, category)
    }

    pub fn with_field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn with_attribute(mut self, key: &str, value: f64) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    /// Attribute value, 0.0 when absent
    pub fn attribute(&self, key: &str) -> f64 {
        self.attributes.get(key).copied().unwrap_or(0.0)
    }

    /// Display field, empty when absent
    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set_field(&mut self, key: &str, value: impl Into<String>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Append a history entry stamped with the current time
    pub fn log(&mut self, message: impl Into<String>) {
        self.history.push(HistoryEntry {
            at: Utc::now(),
            message: message.into(),
        });
    }

    /// Case-insensitive substring match against id and title.
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.id.to_lowercase().contains(needle)
            || self.title.to_lowercase().contains(needle)
    }
}

/// Generate a record id such as `RES-3F9A0C12`
pub fn generate_id(prefix: &str) -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, raw[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = EntityRecord::new(generate_id("TST"), "Silk Road", "exhibition")
            .with_field("owner", "curation")
            .with_attribute("depth", 80.0);

        assert!(record.id.starts_with("TST-"));
        assert_eq!(record.id.len(), "TST-".len() + 8);
        assert_eq!(record.field("owner"), "curation");
        assert_eq!(record.field("missing"), "");
        assert_eq!(record.attribute("depth"), 80.0);
        assert_eq!(record.attribute("missing"), 0.0);
        assert!(record.history.is_empty());
    }

    #[test]
    fn test_draft_has_no_identity() {
        let record = EntityRecord::draft("Untitled", "misc");
        assert!(record.id.is_empty());
        assert_eq!(record.category, "misc");
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(generate_id("X"), generate_id("X"));
    }

    #[test]
    fn test_matches_text_is_case_insensitive_on_id_and_title() {
        let record = EntityRecord::new("PLN-ABC12345".to_string(), "Dunhuang Murals", "heritage");

        assert!(record.matches_text(""));
        assert!(record.matches_text("dunhuang"));
        assert!(record.matches_text("pln-abc"));
        assert!(!record.matches_text("heritage")); // category is not searched
    }

    #[test]
    fn test_history_is_append_only_and_ordered() {
        let mut record = EntityRecord::new("R-1".to_string(), "t", "c");
        record.log("first");
        record.log("second");

        assert_eq!(record.history.len(), 2);
        assert_eq!(record.history[0].message, "first");
        assert!(record.history[0].at <= record.history[1].at);
        assert!(record.history[1].to_string().ends_with("second"));
    }

    #[test]
    fn test_attribute_spec_clamp() {
        let spec = AttributeSpec::new("months", "Months", 0.0, 120.0, 1.0);
        assert_eq!(spec.clamp(-5.0), 0.0);
        assert_eq!(spec.clamp(500.0), 120.0);
        assert_eq!(spec.clamp(42.0), 42.0);
    }
}
