use std::{env, path::PathBuf};

const CONFIG_FILE: &str = ".statekit.toml";

/// Load config file content from CWD first, then home directory
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    if let Ok(content) = std::fs::read_to_string(CONFIG_FILE) {
        log::debug!("Loaded config from {}", CONFIG_FILE);
        return Some(content);
    }

    let home_config = home_config_path()?;
    match std::fs::read_to_string(&home_config) {
        Ok(content) => {
            log::debug!("Loaded config from {}", home_config.display());
            Some(content)
        }
        Err(_) => None,
    }
}

/// `~/.statekit.toml`, if HOME is set
fn home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}
