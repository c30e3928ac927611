//! Wire types for the API surface and the store tables.
//!
//! Response and store-row types use snake_case, matching both the JSON
//! surface and the table columns. The one exception is bulk-update records,
//! which arrive camelCase from heterogeneous frontend sources.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

// ==================== Read-only Catalog Types ====================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Language {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
}

// ==================== Translation Types ====================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslationValue {
    pub value: String,
    pub updated_at: String,
    pub updated_by: String,
}

/// A translation key with its values nested per language code. A key with no
/// stored values carries an empty `translations` map, never a missing one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslationKey {
    pub id: String,
    pub key: String,
    pub category: String,
    pub description: Option<String>,
    pub translations: BTreeMap<String, TranslationValue>,
}

// ==================== Store Row Types ====================

/// Row shape of the `translation_keys` table, optionally carrying the
/// embedded `translation_values` join.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationKeyRow {
    pub id: String,
    pub key: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub translation_values: Vec<TranslationValueRow>,
}

/// Row shape of the `translation_values` table.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationValueRow {
    pub translation_key_id: String,
    pub language_code: String,
    pub value: String,
    pub updated_at: String,
    pub updated_by: String,
}

/// Insert/upsert shape for `translation_values`. `updated_at` is set by the
/// store, never by this service.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewTranslationValue {
    pub translation_key_id: String,
    pub language_code: String,
    pub value: String,
    pub updated_by: String,
}

// ==================== Request Types ====================

/// Per-language payload supplied by clients on create/update. `updated_at`
/// is accepted for symmetry with the response shape but ignored: the store
/// stamps it on write.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TranslationValueInput {
    pub value: String,
    pub updated_by: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTranslationKey {
    pub project_id: String,
    pub key: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub translations: BTreeMap<String, TranslationValueInput>,
}

/// Partial update: only fields present in the request body are written.
/// `description` is tri-state - absent (no write), explicit null (clear) and
/// explicit value (set, including the empty string) are all distinct.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTranslationKey {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub translations: Option<BTreeMap<String, TranslationValueInput>>,
}

/// One record of a bulk value update. These come from heterogeneous frontend
/// sources and use camelCase; all fields are required, so malformed records
/// are rejected at the boundary before any store call.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateRecord {
    pub key_id: String,
    pub language_code: String,
    pub value: String,
    pub updated_by: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkUpdateRequest {
    pub updates: Vec<BulkUpdateRecord>,
}

/// Distinguishes a field that was absent from one explicitly set to null.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
