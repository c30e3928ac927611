//! Per-language completion analytics.
//!
//! Completion is a low-frequency admin read, so the computation stays simple:
//! one keys query to establish scope, then one values query per language,
//! counted client-side against the scoped key-id set. No caching, no
//! incremental maintenance.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::store::{columns, eq, Store};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageCompletion {
    pub translated: usize,
    pub total: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionReport {
    pub total_keys: usize,
    pub completion_by_language: BTreeMap<String, LanguageCompletion>,
}

#[derive(Debug, Deserialize)]
struct LanguageCodeRow {
    code: String,
}

#[derive(Debug, Deserialize)]
struct KeyIdRow {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ValueKeyRow {
    translation_key_id: String,
}

/// Fraction of keys translated, as a percentage rounded to 2 decimal places.
/// Defined as 0 when there are no keys.
pub fn completion_percentage(translated: usize, total_keys: usize) -> f64 {
    if total_keys == 0 {
        return 0.0;
    }
    let raw = (translated as f64 / total_keys as f64) * 100.0;
    (raw * 100.0).round() / 100.0
}

/// Compute completion per known language, optionally scoped to one project.
/// Zero keys in scope short-circuits to an empty report without touching the
/// values table.
pub async fn completion_report(
    store: &Store,
    project_id: Option<&str>,
) -> Result<CompletionReport, ApiError> {
    let languages: Vec<LanguageCodeRow> =
        store.select("languages", &[columns("code")]).await?;

    let mut keys_params = vec![columns("id")];
    if let Some(project_id) = project_id {
        keys_params.push(eq("project_id", project_id));
    }
    let keys: Vec<KeyIdRow> = store.select("translation_keys", &keys_params).await?;
    let total_keys = keys.len();

    if total_keys == 0 {
        return Ok(CompletionReport {
            total_keys: 0,
            completion_by_language: BTreeMap::new(),
        });
    }

    let scoped_ids: HashSet<String> = keys.into_iter().map(|row| row.id).collect();

    let mut completion_by_language = BTreeMap::new();
    for language in languages {
        let values: Vec<ValueKeyRow> = store
            .select(
                "translation_values",
                &[
                    columns("translation_key_id"),
                    eq("language_code", &language.code),
                ],
            )
            .await?;

        let translated = if project_id.is_some() {
            values
                .iter()
                .filter(|row| scoped_ids.contains(&row.translation_key_id))
                .count()
        } else {
            values.len()
        };

        completion_by_language.insert(
            language.code,
            LanguageCompletion {
                translated,
                total: total_keys,
                percentage: completion_percentage(translated, total_keys),
            },
        );
    }

    Ok(CompletionReport {
        total_keys,
        completion_by_language,
    })
}
