//! Seed loading — JSON files in, store rows out.
//! Data files are human-readable and git-friendly, same shape as the API types.

use std::path::Path;

use schemebot_core::error::{Result, SchemebotError};
use schemebot_core::types::{Intent, Scheme};
use tracing::{info, warn};

use crate::sqlite::SqliteSchemeStore;

/// Load scheme records from a JSON file (an array of `Scheme` objects).
pub fn load_schemes(path: &Path) -> Result<Vec<Scheme>> {
    let json = std::fs::read_to_string(path)?;
    serde_json::from_str(&json)
        .map_err(|e| SchemebotError::Other(format!("Failed to parse {}: {e}", path.display())))
}

/// Load intent records from a JSON file (an array of `Intent` objects).
pub fn load_intents(path: &Path) -> Result<Vec<Intent>> {
    let json = std::fs::read_to_string(path)?;
    serde_json::from_str(&json)
        .map_err(|e| SchemebotError::Other(format!("Failed to parse {}: {e}", path.display())))
}

/// Seed the store from the given data files. Returns (schemes, intents) counts.
pub fn seed_from_files(
    store: &SqliteSchemeStore,
    schemes_file: &Path,
    intents_file: &Path,
) -> Result<(usize, usize)> {
    let schemes = load_schemes(schemes_file)?;
    for scheme in &schemes {
        store.insert_scheme(scheme)?;
    }
    let intents = load_intents(intents_file)?;
    for intent in &intents {
        store.insert_intent(intent)?;
    }
    info!("Seeded {} schemes and {} intents", schemes.len(), intents.len());
    Ok((schemes.len(), intents.len()))
}

/// Warn when the store has no data to answer from. The pipeline still runs,
/// it just falls through to the fixed no-match response.
pub fn warn_if_empty(store: &SqliteSchemeStore) {
    use crate::store::SchemeStore;
    if store.count_schemes().unwrap_or(0) == 0 {
        warn!("Schemes table is empty. Run `schemebot seed` to load data.");
    }
    if store.count_intents().unwrap_or(0) == 0 {
        warn!("Intents table is empty. Run `schemebot seed` to load data.");
    }
}
