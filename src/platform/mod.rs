// Platform abstraction
// Per-OS locations for the settings file and the local storage database,
// selected at compile time with `cfg(target_os)`.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Directory name used under every platform root.
pub const APP_DIR_NAME: &str = "recent-sidebar";

/// File name of the local storage database inside the data directory.
pub const STORAGE_DB_FILE: &str = "storage.db";

/// Returns the configuration directory.
///
/// - **Linux**: `$XDG_CONFIG_HOME/recent-sidebar` or `~/.config/recent-sidebar`
/// - **macOS**: `~/Library/Preferences/recent-sidebar`
/// - **Windows**: `%APPDATA%/recent-sidebar`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the data directory holding the local storage database.
///
/// - **Linux**: `$XDG_DATA_HOME/recent-sidebar` or `~/.local/share/recent-sidebar`
/// - **macOS**: `~/Library/Application Support/recent-sidebar`
/// - **Windows**: `%LOCALAPPDATA%/recent-sidebar`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Default path of the local storage database.
pub fn default_storage_path() -> PathBuf {
    get_data_dir().join(STORAGE_DB_FILE)
}
