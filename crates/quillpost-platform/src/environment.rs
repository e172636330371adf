use std::ffi::OsStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("{action} is not available in a {host} session")]
    Unsupported {
        action: &'static str,
        host: HostEnvironment,
    },
    #[error("failed to open {url}: {source}")]
    Launch {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// What the host running quillpost lets us do outside of our own process.
///
/// Business logic asks these questions instead of branching on the concrete
/// host, so the choice of host is made exactly once at startup.
pub trait HostCapabilities: Send + Sync {
    fn can_open_external_url(&self) -> bool;

    fn can_invoke_shell_command(&self) -> bool;

    /// Hand `url` to the user's default handler.
    ///
    /// # Errors
    /// Returns [`HostError::Unsupported`] when the host has no handler to hand
    /// the URL to, or [`HostError::Launch`] when spawning the handler fails.
    fn open_external_url(&self, url: &str) -> Result<(), HostError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostEnvironment {
    Desktop,
    Headless,
}

impl HostEnvironment {
    #[must_use]
    pub fn detect() -> Self {
        #[cfg(any(target_os = "windows", target_os = "macos"))]
        {
            Self::Desktop
        }

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            let display = std::env::var_os("DISPLAY");
            let wayland = std::env::var_os("WAYLAND_DISPLAY");
            if has_graphical_session(display.as_deref(), wayland.as_deref()) {
                Self::Desktop
            } else {
                Self::Headless
            }
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Headless => "headless",
        }
    }
}

impl std::fmt::Display for HostEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl HostCapabilities for HostEnvironment {
    fn can_open_external_url(&self) -> bool {
        matches!(self, Self::Desktop)
    }

    fn can_invoke_shell_command(&self) -> bool {
        true
    }

    fn open_external_url(&self, url: &str) -> Result<(), HostError> {
        if !self.can_open_external_url() {
            return Err(HostError::Unsupported {
                action: "Opening links",
                host: *self,
            });
        }

        log::debug!("Opening {url} in the default handler");
        open::that(url).map_err(|source| HostError::Launch {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg_attr(any(target_os = "windows", target_os = "macos"), allow(dead_code))]
fn has_graphical_session(display: Option<&OsStr>, wayland: Option<&OsStr>) -> bool {
    [display, wayland]
        .into_iter()
        .flatten()
        .any(|value| !value.is_empty())
}
