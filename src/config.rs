use std::path::PathBuf;

/// File extensions recognized as tool descriptors
pub const DESCRIPTOR_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Environment variable overriding the descriptor directory
pub const CONFIG_DIR_ENV: &str = "HARMONY_CONFIG_DIR";

/// Environment variable holding the tracing filter directive
pub const LOG_FILTER_ENV: &str = "HARMONY_LOG";

/// User agent sent when fetching remote manifests
pub const USER_AGENT: &str = concat!("harmony/", env!("CARGO_PKG_VERSION"));

/// Returns the directory holding tool descriptor files.
/// Uses $HARMONY_CONFIG_DIR if set, otherwise <config dir>/harmony/tools
/// (e.g. ~/.config/harmony/tools), or ./harmony/tools if no config dir is known.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var(CONFIG_DIR_ENV).ok(), dirs::config_dir())
}

/// Returns the path of the JSON log file: <data dir>/harmony/harmony.log
/// (e.g. ~/.local/share/harmony/harmony.log), or ./harmony/harmony.log.
pub fn log_path() -> PathBuf {
    log_path_in(dirs::data_dir())
}

fn config_dir_with_env(override_dir: Option<String>, config_home: Option<PathBuf>) -> PathBuf {
    override_dir.map(PathBuf::from).unwrap_or_else(|| {
        config_home
            .unwrap_or_else(|| PathBuf::from("."))
            .join("harmony")
            .join("tools")
    })
}

fn log_path_in(data_home: Option<PathBuf>) -> PathBuf {
    data_home
        .unwrap_or_else(|| PathBuf::from("."))
        .join("harmony")
        .join("harmony.log")
}
