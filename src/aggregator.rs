//! Translation aggregation: reshaping row-oriented key/value/language data
//! into the nested key -> language -> value structure and back.
//!
//! Two view shapes coexist deliberately:
//!
//! - the nested view always includes every key, with an empty `translations`
//!   map when no values exist;
//! - the locale-scoped view omits keys that have no value in the requested
//!   locale, so partial localization renders as "missing" rather than as an
//!   empty string.
//!
//! This asymmetry is inherited behavior that clients rely on; do not unify
//! the two without a product decision.

use std::collections::BTreeMap;

use tracing::info;

use crate::error::ApiError;
use crate::models::{
    BulkUpdateRecord, CreateTranslationKey, NewTranslationValue, TranslationKey,
    TranslationKeyRow, TranslationValue, TranslationValueInput, TranslationValueRow,
    UpdateTranslationKey,
};
use crate::store::{any_of, columns, eq, Store};

const KEYS_TABLE: &str = "translation_keys";
const VALUES_TABLE: &str = "translation_values";
const VALUES_CONFLICT_KEY: &str = "translation_key_id,language_code";

/// Embedded-join selection: key columns plus all associated value rows.
const KEY_WITH_VALUES: &str = "*,translation_values(*)";

// ==================== Pure Reshaping ====================

/// Group flat value rows into a per-language map. Unknown language codes
/// pass through unvalidated.
pub fn nest_translations(rows: Vec<TranslationValueRow>) -> BTreeMap<String, TranslationValue> {
    rows.into_iter()
        .map(|row| {
            (
                row.language_code,
                TranslationValue {
                    value: row.value,
                    updated_at: row.updated_at,
                    updated_by: row.updated_by,
                },
            )
        })
        .collect()
}

/// Merge a key row with its embedded value rows into the nested response
/// shape. A key with zero values keeps an empty map.
pub fn key_with_translations(row: TranslationKeyRow) -> TranslationKey {
    TranslationKey {
        id: row.id,
        key: row.key,
        category: row.category,
        description: row.description,
        translations: nest_translations(row.translation_values),
    }
}

/// Split a per-language map into flat rows for insert/upsert. An empty map
/// produces zero rows; callers must then skip the write entirely.
pub fn flatten_translations(
    key_id: &str,
    translations: &BTreeMap<String, TranslationValueInput>,
) -> Vec<NewTranslationValue> {
    translations
        .iter()
        .map(|(language_code, input)| NewTranslationValue {
            translation_key_id: key_id.to_string(),
            language_code: language_code.clone(),
            value: input.value.clone(),
            updated_by: input.updated_by.clone(),
        })
        .collect()
}

// ==================== Store-backed Operations ====================

/// List keys with nested translations, optionally scoped to one project.
pub async fn list_translation_keys(
    store: &Store,
    project_id: Option<&str>,
) -> Result<Vec<TranslationKey>, ApiError> {
    let mut params = vec![columns(KEY_WITH_VALUES)];
    if let Some(project_id) = project_id {
        params.push(eq("project_id", project_id));
    }

    let rows: Vec<TranslationKeyRow> = store.select(KEYS_TABLE, &params).await?;
    Ok(rows.into_iter().map(key_with_translations).collect())
}

/// Fetch one key with all its language values. Absent id is NotFound.
pub async fn get_translation_key(store: &Store, key_id: &str) -> Result<TranslationKey, ApiError> {
    let rows: Vec<TranslationKeyRow> = store
        .select(KEYS_TABLE, &[columns(KEY_WITH_VALUES), eq("id", key_id)])
        .await?;

    rows.into_iter()
        .next()
        .map(key_with_translations)
        .ok_or_else(|| ApiError::NotFound("Translation key not found".to_string()))
}

/// Flat key -> value map for one project and locale. Keys with no value in
/// the locale are omitted; a project with zero keys yields an empty map.
pub async fn locale_view(
    store: &Store,
    project_id: &str,
    locale: &str,
) -> Result<BTreeMap<String, String>, ApiError> {
    let keys: Vec<TranslationKeyRow> = store
        .select(
            KEYS_TABLE,
            &[columns("id,key,category"), eq("project_id", project_id)],
        )
        .await?;

    if keys.is_empty() {
        return Ok(BTreeMap::new());
    }

    // One filtered query for all keys instead of a round trip per key.
    let key_ids: Vec<String> = keys.iter().map(|k| k.id.clone()).collect();
    let values: Vec<TranslationValueRow> = store
        .select(
            VALUES_TABLE,
            &[
                columns("translation_key_id,language_code,value,updated_at,updated_by"),
                eq("language_code", locale),
                any_of("translation_key_id", &key_ids),
            ],
        )
        .await?;

    let names_by_id: BTreeMap<&str, &str> = keys
        .iter()
        .map(|k| (k.id.as_str(), k.key.as_str()))
        .collect();

    Ok(values
        .into_iter()
        .filter_map(|row| {
            names_by_id
                .get(row.translation_key_id.as_str())
                .map(|name| ((*name).to_string(), row.value))
        })
        .collect())
}

/// Create a key and seed its translations, then return the stored nested
/// view. An insert that affects no rows is a BadWrite.
pub async fn create_translation_key(
    store: &Store,
    request: CreateTranslationKey,
) -> Result<TranslationKey, ApiError> {
    let key_row = serde_json::json!({
        "project_id": request.project_id,
        "key": request.key,
        "category": request.category,
        "description": request.description,
    });

    let created: Vec<TranslationKeyRow> = store.insert(KEYS_TABLE, &key_row).await?;
    let key_id = created
        .into_iter()
        .next()
        .map(|row| row.id)
        .ok_or_else(|| ApiError::BadWrite("Failed to create translation key".to_string()))?;

    let value_rows = flatten_translations(&key_id, &request.translations);
    if !value_rows.is_empty() {
        let _: Vec<TranslationValueRow> = store.insert(VALUES_TABLE, &value_rows).await?;
    }

    info!("Created translation key {} ({})", request.key, key_id);
    get_translation_key(store, &key_id).await
}

/// Partial update: only fields present in the request write. Each present
/// language entry is upserted individually; languages not mentioned keep
/// their existing values.
pub async fn update_translation_key(
    store: &Store,
    key_id: &str,
    updates: UpdateTranslationKey,
) -> Result<(), ApiError> {
    let mut patch = serde_json::Map::new();
    if let Some(key) = &updates.key {
        patch.insert("key".to_string(), serde_json::json!(key));
    }
    if let Some(category) = &updates.category {
        patch.insert("category".to_string(), serde_json::json!(category));
    }
    if let Some(description) = &updates.description {
        // Explicit null clears the column; empty string is a stored value.
        patch.insert("description".to_string(), serde_json::json!(description));
    }

    if !patch.is_empty() {
        store.update(KEYS_TABLE, &patch, &[eq("id", key_id)]).await?;
    }

    if let Some(translations) = &updates.translations {
        for row in flatten_translations(key_id, translations) {
            store
                .upsert(VALUES_TABLE, &[row], VALUES_CONFLICT_KEY)
                .await?;
        }
    }

    info!("Updated translation key {}", key_id);
    Ok(())
}

/// Delete a key row. Cleanup of its value rows is the store's cascade, not
/// this service's job.
pub async fn delete_translation_key(store: &Store, key_id: &str) -> Result<(), ApiError> {
    store.delete(KEYS_TABLE, &[eq("id", key_id)]).await?;
    info!("Deleted translation key {}", key_id);
    Ok(())
}

/// Batch upsert of value records from heterogeneous sources. All-or-nothing
/// at the store level; returns the number of records submitted.
pub async fn bulk_update(
    store: &Store,
    records: Vec<BulkUpdateRecord>,
) -> Result<usize, ApiError> {
    let rows: Vec<NewTranslationValue> = records
        .into_iter()
        .map(|record| NewTranslationValue {
            translation_key_id: record.key_id,
            language_code: record.language_code,
            value: record.value,
            updated_by: record.updated_by,
        })
        .collect();

    let count = rows.len();
    if count > 0 {
        store.upsert(VALUES_TABLE, &rows, VALUES_CONFLICT_KEY).await?;
    }

    info!("Bulk-updated {} translation values", count);
    Ok(count)
}
