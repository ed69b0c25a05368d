//! Setting value persistence: JSON save/load across restarts.
//!
//! The file maps setting names to the canonical text of their external
//! value, e.g. `{ "volume": "530", "gamma": "2.2" }`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::app::AppState;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedValues {
    pub values: BTreeMap<String, String>,
}

/// Load persisted values from disk. Returns an empty map if the file is missing or corrupt.
pub fn load(path: &Path) -> PersistedValues {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring corrupt values file");
            PersistedValues::default()
        }),
        Err(_) => PersistedValues::default(),
    }
}

/// Save persisted values to disk. Creates parent directories if needed.
pub fn save(path: &Path, values: &PersistedValues) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(values)?;
    std::fs::write(path, json)?;
    debug!(path = %path.display(), count = values.values.len(), "saved setting values");
    Ok(())
}

/// Extract the external value of every setting.
pub fn extract(app: &AppState) -> PersistedValues {
    PersistedValues {
        values: app
            .settings
            .iter()
            .map(|s| (s.name().to_string(), s.external_text()))
            .collect(),
    }
}

/// Write stored values into the matching settings as external changes.
/// Returns how many were applied. Unknown names and bad numbers are skipped.
pub fn apply(app: &mut AppState, values: &PersistedValues) -> usize {
    let mut applied = 0;
    for setting in app.settings.iter_mut() {
        let Some(text) = values.values.get(setting.name()) else {
            continue;
        };
        if setting.set_external_text(text) {
            applied += 1;
        } else {
            warn!(setting = setting.name(), text = %text, "skipping unparsable stored value");
        }
    }
    applied
}
