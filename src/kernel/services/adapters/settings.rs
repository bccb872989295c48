use crate::kernel::services::ports::settings::Settings;
use std::path::PathBuf;

const APP_DIR: &str = ".asmpad";
const SETTINGS_FILE: &str = "setting.json";
const DATABASE_FILE: &str = "settings-db.json";
const LOG_DIR: &str = "logs";

pub fn get_app_dir() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(APP_DIR))
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_app_dir().map(|dir| dir.join(SETTINGS_FILE))
}

pub fn default_database_path() -> Option<PathBuf> {
    get_app_dir().map(|dir| dir.join(DATABASE_FILE))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_app_dir()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Cannot determine application directory",
            )
        })?
        .join(LOG_DIR);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content =
            serde_json::to_string_pretty(&Settings::default()).unwrap_or_else(|_| "{}".to_string());
        std::fs::write(&path, content)?;
    }
    Ok(path)
}

/// Reads the settings file; a missing or malformed file yields defaults.
pub fn load_settings() -> Settings {
    let Some(path) = get_settings_path() else {
        return Settings::default();
    };
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(_) => return Settings::default(),
    };
    match serde_json::from_str(&data) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "malformed settings, using defaults");
            Settings::default()
        }
    }
}

pub fn database_path(settings: &Settings) -> Option<PathBuf> {
    settings
        .database_file
        .clone()
        .or_else(default_database_path)
}

fn get_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
