#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppErrorDetail {
    Message(String),
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl std::fmt::Display for AppErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message(message) => write!(f, "{message}"),
            Self::Io { kind, message } => write!(f, "{kind}: {message}"),
        }
    }
}

impl From<String> for AppErrorDetail {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl From<std::io::Error> for AppErrorDetail {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl From<quillpost_core::StoreError> for AppErrorDetail {
    fn from(value: quillpost_core::StoreError) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<serde_json::Error> for AppErrorDetail {
    fn from(value: serde_json::Error) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<quillpost_core::LinkError> for AppErrorDetail {
    fn from(value: quillpost_core::LinkError) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<quillpost_platform::AppPathsError> for AppErrorDetail {
    fn from(value: quillpost_platform::AppPathsError) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<reqwest::Error> for AppErrorDetail {
    fn from(value: reqwest::Error) -> Self {
        Self::Message(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    PathsUnavailable {
        details: AppErrorDetail,
    },
    HttpClientFailed {
        details: AppErrorDetail,
    },
    SettingsAccessFailed {
        action: &'static str,
        details: AppErrorDetail,
    },
    StateAccessFailed {
        action: &'static str,
        details: AppErrorDetail,
    },
    ReleaseFetchFailed {
        details: AppErrorDetail,
    },
    LinkOpenFailed {
        target: &'static str,
        details: AppErrorDetail,
    },
    OperationCancelled {
        operation: &'static str,
    },
}

impl AppError {
    pub fn paths_unavailable(details: impl Into<AppErrorDetail>) -> Self {
        Self::PathsUnavailable {
            details: details.into(),
        }
    }

    pub fn http_client_failed(details: impl Into<AppErrorDetail>) -> Self {
        Self::HttpClientFailed {
            details: details.into(),
        }
    }

    pub fn settings_access_failed(
        action: &'static str,
        details: impl Into<AppErrorDetail>,
    ) -> Self {
        Self::SettingsAccessFailed {
            action,
            details: details.into(),
        }
    }

    pub fn state_access_failed(action: &'static str, details: impl Into<AppErrorDetail>) -> Self {
        Self::StateAccessFailed {
            action,
            details: details.into(),
        }
    }

    pub fn release_fetch_failed(details: impl Into<AppErrorDetail>) -> Self {
        Self::ReleaseFetchFailed {
            details: details.into(),
        }
    }

    pub fn link_open_failed(target: &'static str, details: impl Into<AppErrorDetail>) -> Self {
        Self::LinkOpenFailed {
            target,
            details: details.into(),
        }
    }

    pub fn operation_cancelled(operation: &'static str) -> Self {
        Self::OperationCancelled { operation }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PathsUnavailable { details } => {
                write!(f, "Cannot locate application directories: {details}")
            }
            Self::HttpClientFailed { details } => {
                write!(f, "Failed to set up the HTTP client: {details}")
            }
            Self::SettingsAccessFailed { action, details } => {
                write!(f, "Failed to {action} settings: {details}")
            }
            Self::StateAccessFailed { action, details } => {
                write!(f, "Failed to {action} update state: {details}")
            }
            Self::ReleaseFetchFailed { details } => {
                write!(f, "Failed to fetch the latest release: {details}")
            }
            Self::LinkOpenFailed { target, details } => {
                write!(f, "Failed to open the {target}: {details}")
            }
            Self::OperationCancelled { operation } => write!(f, "{operation} cancelled"),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::{AppError, AppErrorDetail};

    #[test]
    fn settings_io_failure_keeps_error_kind() {
        let error = AppError::settings_access_failed(
            "save",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );

        assert!(matches!(
            error,
            AppError::SettingsAccessFailed {
                action: "save",
                details: AppErrorDetail::Io {
                    kind: std::io::ErrorKind::PermissionDenied,
                    ..
                },
            }
        ));
        assert_eq!(
            error.to_string(),
            "Failed to save settings: permission denied: denied"
        );
    }

    #[test]
    fn state_and_link_constructors_include_context() {
        let state = AppError::state_access_failed("save", "disk full".to_string());
        let link = AppError::link_open_failed("release page", "no browser".to_string());
        let cancelled = AppError::operation_cancelled("Release fetch");

        assert_eq!(
            state,
            AppError::StateAccessFailed {
                action: "save",
                details: AppErrorDetail::Message("disk full".to_string())
            }
        );
        assert_eq!(state.to_string(), "Failed to save update state: disk full");
        assert_eq!(
            link.to_string(),
            "Failed to open the release page: no browser"
        );
        assert_eq!(cancelled.to_string(), "Release fetch cancelled");
    }

    #[test]
    fn store_error_becomes_message_detail() {
        let detail = AppErrorDetail::from(quillpost_core::StoreError::Unavailable(
            "locked".to_string(),
        ));

        assert_eq!(
            detail,
            AppErrorDetail::Message("storage is unavailable: locked".to_string())
        );
    }

}
