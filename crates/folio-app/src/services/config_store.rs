// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Persisted formatter configuration (`config.json` in the data directory).

use std::path::Path;

use folio_core::FolioConfig;
use folio_core::error::Result;
use tracing::{debug, info, warn};

pub const CONFIG_FILE: &str = "config.json";

/// Load the configuration from `data_dir`.
///
/// A missing, unreadable, corrupt, or invalid file yields the defaults; only
/// the last three are worth a warning.
pub fn load_config(data_dir: &Path) -> FolioConfig {
    let path = data_dir.join(CONFIG_FILE);
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            return FolioConfig::default();
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "config unreadable, using defaults");
            return FolioConfig::default();
        }
    };

    match serde_json::from_str::<FolioConfig>(&data) {
        Ok(config) => match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!(error = %err, "config rejected, using defaults");
                FolioConfig::default()
            }
        },
        Err(err) => {
            warn!(path = %path.display(), error = %err, "config corrupt, using defaults");
            FolioConfig::default()
        }
    }
}

/// Validate and write `config` as pretty JSON.
pub fn persist_config(data_dir: &Path, config: &FolioConfig) -> Result<()> {
    config.validate()?;
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    info!(path = %path.display(), "config saved");
    Ok(())
}
