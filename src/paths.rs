use std::path::PathBuf;

/// Returns the root newsdesk directory path.
///
/// Resolution order:
/// 1. `NEWSDESK_ROOT` environment variable (if set)
/// 2. Current working directory + `.newsdesk`
pub fn newsdesk_root() -> PathBuf {
    if let Ok(root) = std::env::var("NEWSDESK_ROOT") {
        PathBuf::from(root)
    } else {
        PathBuf::from(".newsdesk")
    }
}

/// Returns the path to the configuration file.
pub fn config_path() -> PathBuf {
    newsdesk_root().join("config.yaml")
}
