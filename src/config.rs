use std::path::PathBuf;

pub const KEYS_PATH_ENV: &str = "PEDALIER_KEYS_PATH";
pub const FACTORY_PEDALBOARDS_ENV: &str = "PEDALIER_FACTORY_PEDALBOARDS";
pub const USER_PEDALBOARDS_ENV: &str = "PEDALIER_USER_PEDALBOARDS";
pub const HOME_ENV: &str = "PEDALIER_HOME";
pub const ALLOW_REGULAR_CV_ENV: &str = "PEDALIER_ALLOW_REGULAR_CV";

pub const DEFAULT_FACTORY_PEDALBOARDS: &str = "/usr/share/pedalier/pedalboards";

pub fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| {
            let s = v.trim().to_ascii_lowercase();
            s == "1" || s == "true" || s == "yes" || s == "on"
        })
        .unwrap_or(false)
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Keys directory for paid-license checks. Unset means licensing checks are
/// limited to the non-commercial/trial distinction.
pub fn keys_path() -> Option<PathBuf> {
    env_path(KEYS_PATH_ENV)
}

pub fn factory_pedalboards_dir() -> PathBuf {
    env_path(FACTORY_PEDALBOARDS_ENV).unwrap_or_else(|| PathBuf::from(DEFAULT_FACTORY_PEDALBOARDS))
}

pub fn user_pedalboards_dir() -> PathBuf {
    env_path(USER_PEDALBOARDS_ENV).unwrap_or_else(|| {
        home_dir()
            .unwrap_or_else(|| PathBuf::from("/"))
            .join(".pedalboards")
    })
}

pub fn home_dir() -> Option<PathBuf> {
    env_path(HOME_ENV).or_else(dirs::home_dir)
}

pub fn allow_regular_cv() -> bool {
    env_flag(ALLOW_REGULAR_CV_ENV)
}
