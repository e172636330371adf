use std::fmt::Write as _;

use chrono::{DateTime, TimeDelta, Utc};
use log::debug;
use quillpost_core::{Language, ReleaseInfo, UpdateCheckResult, format_checked_at};
use tokio_util::sync::CancellationToken;

use crate::cli::CheckArgs;
use crate::error::AppError;

use super::{App, CURRENT_VERSION};

#[derive(Debug)]
pub(super) enum CheckOutcome {
    AutoCheckDisabled,
    NotDue { last_checked_at: DateTime<Utc> },
    Checked(UpdateCheckResult),
}

impl CheckOutcome {
    pub(super) fn succeeded(&self) -> bool {
        !matches!(
            self,
            Self::Checked(UpdateCheckResult::CheckFailed { .. })
        )
    }

    /// Extra lines printed after the notification, if any.
    pub(super) fn render(&self, language: Language) -> Option<String> {
        let texts = language.texts();
        match self {
            Self::AutoCheckDisabled => Some(texts.auto_check_disabled_skip.to_string()),
            Self::NotDue { last_checked_at } => Some(
                texts
                    .auto_check_not_due
                    .replace("{time}", &format_checked_at(last_checked_at, language)),
            ),
            Self::Checked(result) => {
                let mut lines = Vec::new();
                if let UpdateCheckResult::UpdateAvailable { release, .. } = result {
                    lines.push(release_details(release, language));
                }
                if let Some(error) = result.storage_error() {
                    lines.push(texts.check_time_not_saved.replace("{error}", error));
                }
                (!lines.is_empty()).then(|| lines.join("\n\n"))
            }
        }
    }
}

/// A stored timestamp in the future means the clock moved backwards; check
/// again rather than waiting it out.
pub(super) fn auto_check_due(
    last_checked_at: DateTime<Utc>,
    interval: TimeDelta,
    now: DateTime<Utc>,
) -> bool {
    let elapsed = now.signed_duration_since(last_checked_at);
    elapsed < TimeDelta::zero() || elapsed >= interval
}

pub(super) async fn handle_check(
    app: &App,
    args: &CheckArgs,
    cancel: &CancellationToken,
) -> Result<CheckOutcome, AppError> {
    if args.auto {
        let store = app.coordinator.store();
        let enabled = store
            .auto_check_enabled()
            .map_err(|error| AppError::state_access_failed("read", error))?;
        if !enabled {
            debug!("Skipping automatic update check: disabled");
            return Ok(CheckOutcome::AutoCheckDisabled);
        }

        let last_checked_at = store
            .last_checked_at()
            .map_err(|error| AppError::state_access_failed("read", error))?;
        if let Some(last_checked_at) = last_checked_at
            && !auto_check_due(last_checked_at, app.settings.auto_check_interval(), Utc::now())
        {
            debug!("Skipping automatic update check: last run at {last_checked_at}");
            return Ok(CheckOutcome::NotDue { last_checked_at });
        }
    }

    let current_version = args.current.as_deref().unwrap_or(CURRENT_VERSION);
    let (owner, repo) = app.repository(&args.repo);
    let result = app
        .coordinator
        .check(current_version, owner, repo, cancel)
        .await;
    Ok(CheckOutcome::Checked(result))
}

fn release_details(release: &ReleaseInfo, language: Language) -> String {
    let texts = language.texts();
    let mut details = texts
        .release_heading
        .replace("{name}", &release.name)
        .replace("{tag}", &release.tag)
        .replace("{date}", &release.published_on(language));
    let _ = write!(details, "\n{}", release.html_url);

    let notes = release.notes.trim();
    if !notes.is_empty() {
        let _ = write!(details, "\n\n{notes}");
    }

    if !release.assets.is_empty() {
        let _ = write!(details, "\n\n{}", texts.downloads);
        for asset in &release.assets {
            let _ = write!(details, "\n  {}  {}", asset.name, asset.display_size());
        }
    }
    details
}
