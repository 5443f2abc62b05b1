// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Data directory resolution.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Return the Folio data directory, creating it if needed.
///
/// `$XDG_DATA_HOME/folio`, then `$HOME/.local/share/folio`, then `/tmp/folio`.
pub fn data_dir() -> PathBuf {
    let dir = base_dir(
        std::env::var_os("XDG_DATA_HOME").as_deref(),
        std::env::var_os("HOME").as_deref(),
    )
    .join("folio");
    if let Err(err) = std::fs::create_dir_all(&dir) {
        warn!(path = %dir.display(), error = %err, "could not create data directory");
    }
    dir
}

fn base_dir(xdg_data_home: Option<&std::ffi::OsStr>, home: Option<&std::ffi::OsStr>) -> PathBuf {
    // Empty values are treated as unset, as XDG requires.
    if let Some(xdg) = xdg_data_home.filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg);
    }
    if let Some(home) = home.filter(|v| !v.is_empty()) {
        return Path::new(home).join(".local").join("share");
    }
    PathBuf::from("/tmp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn prefers_xdg_data_home() {
        assert_eq!(
            base_dir(Some(OsStr::new("/data")), Some(OsStr::new("/home/ana"))),
            PathBuf::from("/data")
        );
    }

    #[test]
    fn falls_back_to_home_then_tmp() {
        assert_eq!(
            base_dir(Some(OsStr::new("")), Some(OsStr::new("/home/ana"))),
            PathBuf::from("/home/ana/.local/share")
        );
        assert_eq!(base_dir(None, None), PathBuf::from("/tmp"));
    }
}
