//! Sandbox path resolution.

use std::path::PathBuf;

/// Directory holding the plugin's trace file.
///
/// Resolves to `/host/.local/share/zellij/notehub`, which is
/// `~/.local/share/zellij/notehub` when Zellij was started from the home
/// directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("notehub")
}

/// Rewrites a `~`-prefixed path to its `/host` sandbox equivalent.
///
/// ```
/// use notehub::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path == "~" {
        "/host".to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("/host/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_lives_under_host() {
        assert_eq!(
            get_data_dir(),
            PathBuf::from("/host/.local/share/zellij/notehub")
        );
    }

    #[test]
    fn bare_tilde_is_host_root() {
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("~user/x"), "~user/x");
    }
}
