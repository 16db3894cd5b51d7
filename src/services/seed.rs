use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;

use crate::config::settings::AppConfig;
use crate::database;
use crate::rating::TierTable;

#[derive(Debug, Deserialize)]
pub struct SeedPlayer {
    pub handle: String,
    #[serde(default)]
    pub rating: Option<i32>,
}

/// Imports players from a JSON file of `{"handle": ..., "rating": ...}`
/// entries; rating is optional and defaults to the configured start value.
pub struct SeedService {
    config: AppConfig,
    path: PathBuf,
}

impl SeedService {
    pub fn new(config: AppConfig, path: &Path) -> Self {
        Self {
            config,
            path: path.to_path_buf(),
        }
    }

    pub fn run(&self) -> Result<()> {
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read seed file {}", self.path.display()))?;
        let entries = parse_seed(&raw)?;
        info!("Loaded {} seed entries from {}", entries.len(), self.path.display());

        let db_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "arena_rating.db".to_string());
        let pool = database::create_pool(&db_path)?;
        let conn = database::get_connection(&pool)?;

        let tiers = TierTable::default();
        let mut created = 0;

        for entry in &entries {
            if database::players::find_by_handle(&conn, &entry.handle)?.is_some() {
                warn!("Skipping '{}': handle already exists", entry.handle);
                continue;
            }

            let rating = entry.rating.unwrap_or(self.config.rating.default_rating);
            let tier = tiers.classify(rating);
            database::players::create_player(&conn, &entry.handle, rating, tier.as_str())?;
            created += 1;
        }

        info!("Seeded {created} new players ({} skipped)", entries.len() - created);
        Ok(())
    }
}

pub fn parse_seed(raw: &str) -> Result<Vec<SeedPlayer>> {
    serde_json::from_str(raw).context("Failed to parse seed file as a JSON player list")
}
