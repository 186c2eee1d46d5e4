//! Sandbox path helpers.
//!
//! Inside Zellij the host filesystem is visible under `/host`, which usually
//! maps to the directory Zellij was started from (often `$HOME`).

use std::path::PathBuf;

/// Sandbox mount point of the host filesystem.
pub const HOST_ROOT: &str = "/host";

/// Directory holding the trace file: `/host/.local/share/zellij/userdeck`.
///
/// # Examples
///
/// ```
/// use userdeck::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/userdeck")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/userdeck")
}

/// Rewrites a leading `~` to the sandbox host root so user-supplied paths such
/// as `theme_file = "~/themes/nord.toml"` resolve inside the sandbox.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some("") => PathBuf::from(HOST_ROOT),
        Some(rest) if rest.starts_with('/') => PathBuf::from(format!("{HOST_ROOT}{rest}")),
        _ => PathBuf::from(path),
    }
}
