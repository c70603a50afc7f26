//! Data and cache directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.local/share/statekit/`, `~/.cache/statekit/`
//! - macOS: `~/Library/Application Support/statekit/`, `~/Library/Caches/statekit/`
//! - Windows: `%APPDATA%\statekit\`, `%LOCALAPPDATA%\statekit\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "statekit";

/// Get the application data directory, creating it if needed
pub fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Could not determine data directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory {:?}", dir))?;
    Ok(dir)
}

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create cache directory {:?}", dir))?;
    Ok(dir)
}

/// Default directory for persisted slice data
pub fn default_storage_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("storage"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_dir_exists() {
        let dir = cache_dir().unwrap();
        assert!(dir.exists());
        assert!(dir.ends_with(APP_NAME));
    }

    #[test]
    fn test_default_storage_dir_is_under_data_dir() {
        let dir = default_storage_dir().unwrap();
        assert!(dir.ends_with("statekit/storage"));
    }
}
