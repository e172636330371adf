use quillpost_core::Language;
use quillpost_platform::AppPaths;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_REPO_OWNER: &str = "quillpost";
pub const DEFAULT_REPO_NAME: &str = "quillpost";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_repo_owner")]
    pub repo_owner: String,

    #[serde(default = "default_repo_name")]
    pub repo_name: String,

    #[serde(default)]
    pub language: Language,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    #[serde(default = "default_auto_check_interval")]
    pub auto_check_interval_hours: u64,

    #[serde(default)]
    pub strict_version_check: bool,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,
}

fn default_repo_owner() -> String {
    DEFAULT_REPO_OWNER.to_string()
}

fn default_repo_name() -> String {
    DEFAULT_REPO_NAME.to_string()
}

fn default_api_base_url() -> String {
    quillpost_core::release::DEFAULT_API_BASE.to_string()
}

fn default_http_timeout() -> u64 {
    10
}

fn default_auto_check_interval() -> u64 {
    24
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            repo_owner: default_repo_owner(),
            repo_name: default_repo_name(),
            language: Language::default(),
            api_base_url: default_api_base_url(),
            http_timeout_secs: default_http_timeout(),
            auto_check_interval_hours: default_auto_check_interval(),
            strict_version_check: false,
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
        }
    }
}

impl AppSettings {
    /// A missing file yields the defaults. Unreadable or corrupt files are an
    /// error so the caller can report them once logging is up.
    pub fn load(paths: &AppPaths) -> Result<Self, AppError> {
        let settings_path = paths.settings_file();

        match std::fs::read_to_string(&settings_path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|error| AppError::settings_access_failed("parse", error)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(AppError::settings_access_failed("read", error)),
        }
    }

    pub fn save(&self, paths: &AppPaths) -> Result<(), AppError> {
        paths
            .ensure_dirs()
            .map_err(|error| AppError::settings_access_failed("save", error))?;

        let content = serde_json::to_string_pretty(self)
            .map_err(|error| AppError::settings_access_failed("encode", error))?;
        std::fs::write(paths.settings_file(), content)
            .map_err(|error| AppError::settings_access_failed("save", error))
    }

    pub fn auto_check_interval(&self) -> chrono::TimeDelta {
        i64::try_from(self.auto_check_interval_hours)
            .ok()
            .and_then(chrono::TimeDelta::try_hours)
            .unwrap_or(chrono::TimeDelta::MAX)
    }
}
