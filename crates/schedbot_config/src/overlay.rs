//! Local env-file overlay.
//!
//! Before variables are read, a `.env` file in the working directory is loaded
//! into the process environment; if there is none, `config.env` is tried
//! instead. Loading is best effort: a missing or malformed file is skipped and
//! variables already set in the environment are never overridden.

use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const PRIMARY_ENV_FILE: &str = ".env";
pub const FALLBACK_ENV_FILE: &str = "config.env";

static INIT_OVERLAY: OnceCell<Option<PathBuf>> = OnceCell::new();

/// Pick the overlay file for `dir`: `.env` if present, else `config.env` if
/// present, else nothing.
pub fn choose_overlay(dir: &Path) -> Option<PathBuf> {
    [PRIMARY_ENV_FILE, FALLBACK_ENV_FILE]
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load the overlay file from `dir`, returning the file that was applied.
pub fn load_overlay_from(dir: &Path) -> Option<PathBuf> {
    let path = choose_overlay(dir)?;
    match dotenv::from_path(&path) {
        Ok(()) => {
            debug!("Loaded environment overlay from {}", path.display());
            Some(path)
        }
        Err(err) => {
            warn!("Ignoring environment overlay {}: {}", path.display(), err);
            None
        }
    }
}

/// Ensures the overlay from the working directory is applied exactly once per
/// process.
pub fn ensure_overlay_loaded() -> Option<&'static Path> {
    INIT_OVERLAY
        .get_or_init(|| load_overlay_from(Path::new(".")))
        .as_deref()
}
