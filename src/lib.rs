//! Localization content management backend.
//!
//! Stores translation keys and their per-language values in a hosted
//! relational store (Supabase/PostgREST) and exposes CRUD plus completion
//! analytics over HTTP.
//!
//! # Architecture
//!
//! - `store`: thin PostgREST client, one HTTP round trip per operation
//! - `aggregator`: reshapes flat value rows into nested key -> language maps
//!   and back, plus the store-backed key operations
//! - `analytics`: per-language completion percentages
//! - `handlers`: axum routes over the above

pub mod aggregator;
pub mod analytics;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod store;
