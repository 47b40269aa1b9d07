// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Data directory resolution for the settings file.

use std::path::{Path, PathBuf};

/// Return the application data directory, creating it if needed.
pub fn data_dir() -> PathBuf {
    let dir = base_dir(
        std::env::var_os("XDG_DATA_HOME").as_deref().map(Path::new),
        std::env::var_os("HOME").as_deref().map(Path::new),
    )
    .join("pagemill");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(path = %dir.display(), error = %e, "could not create data directory");
    }
    dir
}

/// XDG data dir, then `~/.local/share`, then `/tmp` as a last resort.
fn base_dir(xdg_data_home: Option<&Path>, home: Option<&Path>) -> PathBuf {
    if let Some(xdg) = xdg_data_home.filter(|p| !p.as_os_str().is_empty()) {
        return xdg.to_path_buf();
    }
    if let Some(home) = home.filter(|p| !p.as_os_str().is_empty()) {
        return home.join(".local").join("share");
    }
    PathBuf::from("/tmp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_xdg() {
        let dir = base_dir(Some(Path::new("/xdg")), Some(Path::new("/home/u")));
        assert_eq!(dir, PathBuf::from("/xdg"));
    }

    #[test]
    fn falls_back_to_home_then_tmp() {
        assert_eq!(
            base_dir(None, Some(Path::new("/home/u"))),
            PathBuf::from("/home/u/.local/share")
        );
        assert_eq!(base_dir(Some(Path::new("")), None), PathBuf::from("/tmp"));
    }
}
