use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Hosted store (Supabase/PostgREST)
    pub supabase_url: String,
    pub supabase_service_key: String,

    // HTTP server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Store - URL and service-role credential. The credential is
            // required at startup: without it every store call would fail
            // with an auth error, so fail fast instead.
            supabase_url: std::env::var("SUPABASE_URL")
                .context("SUPABASE_URL not set")?,
            supabase_service_key: std::env::var("SUPABASE_SERVICE_KEY")
                .context("SUPABASE_SERVICE_KEY not set")?,

            // HTTP server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
        })
    }
}
