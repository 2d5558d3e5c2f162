//! Filesystem locations used by the client.

use std::path::PathBuf;

/// Directory name under the platform data directory.
pub const APP_DIR: &str = "jobboard";

pub const CONFIG_FILE: &str = "config.toml";

/// Returns the default data directory: `$XDG_DATA_HOME/jobboard` on Linux,
/// the platform equivalent elsewhere, or `./.jobboard` when the platform
/// reports none.
///
/// The session file and trace files live here.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".jobboard"), |dir| dir.join(APP_DIR))
}

/// Returns `$XDG_CONFIG_HOME/jobboard/config.toml` or the platform
/// equivalent, if the platform has a config directory.
#[must_use]
pub fn get_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and every path when no home directory is
/// known, are returned unchanged.
///
/// ```
/// use jobboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (rest, Some(home)) if rest.starts_with("~/") => home.join(&rest[2..]),
        (other, _) => PathBuf::from(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_app_name() {
        let dir = get_data_dir();
        assert!(dir.ends_with(APP_DIR) || dir.ends_with(".jobboard"));
    }

    #[test]
    fn config_file_is_toml() {
        if let Some(path) = get_config_file() {
            assert!(path.ends_with("jobboard/config.toml"));
        }
    }

    #[test]
    fn tilde_expands_under_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/data"), home.join("data"));
            assert_eq!(expand_tilde("~"), home);
        }
        assert_eq!(expand_tilde("relative/dir"), PathBuf::from("relative/dir"));
    }
}
