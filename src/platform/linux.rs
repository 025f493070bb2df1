// Linux paths follow the XDG base directory layout.

use std::env;
use std::path::PathBuf;

use super::APP_DIR_NAME;

fn resolve(xdg: Option<String>, home: Option<String>, fallback: &[&str]) -> PathBuf {
    match xdg.filter(|v| !v.is_empty()) {
        Some(base) => PathBuf::from(base).join(APP_DIR_NAME),
        None => {
            let mut path = PathBuf::from(home.unwrap_or_else(|| String::from("/tmp")));
            path.extend(fallback);
            path.join(APP_DIR_NAME)
        }
    }
}

pub fn get_config_dir() -> PathBuf {
    resolve(
        env::var("XDG_CONFIG_HOME").ok(),
        env::var("HOME").ok(),
        &[".config"],
    )
}

pub fn get_data_dir() -> PathBuf {
    resolve(
        env::var("XDG_DATA_HOME").ok(),
        env::var("HOME").ok(),
        &[".local", "share"],
    )
}
