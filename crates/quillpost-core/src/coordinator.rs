use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::i18n::{Language, Texts};
use crate::notify::{Notification, NotificationKind, NotificationSink};
use crate::release::{ReleaseError, ReleaseInfo, ReleaseSource};
use crate::store::{StoreError, UpdateCheckStore};
use crate::version::{InvalidVersionError, compare_strict, is_newer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckErrorKind {
    Network,
    Fetch,
    MalformedResponse,
    InvalidVersion,
    Cancelled,
}

/// `storage_error` on the success variants is set when the release was
/// fetched but the check time could not be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateCheckResult {
    UpdateAvailable {
        release: ReleaseInfo,
        storage_error: Option<String>,
    },
    UpToDate {
        release: ReleaseInfo,
        storage_error: Option<String>,
    },
    /// `message` is localized and safe to show as-is.
    CheckFailed {
        kind: CheckErrorKind,
        message: String,
    },
}

impl UpdateCheckResult {
    #[must_use]
    pub fn release(&self) -> Option<&ReleaseInfo> {
        match self {
            Self::UpdateAvailable { release, .. } | Self::UpToDate { release, .. } => {
                Some(release)
            }
            Self::CheckFailed { .. } => None,
        }
    }

    #[must_use]
    pub fn storage_error(&self) -> Option<&str> {
        match self {
            Self::UpdateAvailable { storage_error, .. } | Self::UpToDate { storage_error, .. } => {
                storage_error.as_deref()
            }
            Self::CheckFailed { .. } => None,
        }
    }

    #[must_use]
    pub fn is_update_available(&self) -> bool {
        matches!(self, Self::UpdateAvailable { .. })
    }
}

/// Runs one update check end to end: fetch, compare, record, notify.
///
/// There is no internal locking. Overlapping calls may both hit the network
/// and the last one to finish wins the stored timestamp.
pub struct UpdateCoordinator {
    source: Arc<dyn ReleaseSource>,
    store: UpdateCheckStore,
    notifier: Arc<dyn NotificationSink>,
    language: Language,
    strict_versions: bool,
}

impl UpdateCoordinator {
    #[must_use]
    pub fn new(
        source: Arc<dyn ReleaseSource>,
        store: UpdateCheckStore,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            source,
            store,
            notifier,
            language: Language::default(),
            strict_versions: false,
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Report unparseable versions as [`CheckErrorKind::InvalidVersion`]
    /// instead of treating them as "not newer".
    #[must_use]
    pub fn with_strict_versions(mut self, strict: bool) -> Self {
        self.strict_versions = strict;
        self
    }

    #[must_use]
    pub fn store(&self) -> &UpdateCheckStore {
        &self.store
    }

    pub async fn check(
        &self,
        current_version: &str,
        owner: &str,
        repo: &str,
        cancel: &CancellationToken,
    ) -> UpdateCheckResult {
        log::info!("Checking {owner}/{repo} for releases newer than {current_version}");

        let fetched = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            result = self.source.fetch_latest(owner, repo) => Some(result),
        };

        let result = match fetched {
            None => {
                log::info!("Update check for {owner}/{repo} cancelled");
                self.cancelled()
            }
            Some(Err(error)) => {
                log::warn!("Update check for {owner}/{repo} failed: {error}");
                let kind = error_kind(&error);
                failed(kind, release_error_message(self.language, &error))
            }
            Some(Ok(release)) => self.evaluate(current_version, release, cancel).await,
        };

        self.notifier
            .notify(&self.notification_for(&result, current_version));
        result
    }

    /// Persist the auto-check preference.
    ///
    /// # Errors
    /// Returns an error when the preference cannot be written.
    pub fn set_auto_check_preference(&self, enabled: bool) -> Result<(), StoreError> {
        log::debug!("Setting auto-check preference to {enabled}");
        self.store.set_auto_check_enabled(enabled)
    }

    async fn evaluate(
        &self,
        current_version: &str,
        release: ReleaseInfo,
        cancel: &CancellationToken,
    ) -> UpdateCheckResult {
        let newer = if self.strict_versions {
            match compare_strict(current_version, &release.tag) {
                Ok(newer) => newer,
                Err(error) => {
                    log::warn!("Cannot compare {current_version} with {}: {error}", release.tag);
                    return failed(
                        CheckErrorKind::InvalidVersion,
                        invalid_version_message(self.texts(), &error),
                    );
                }
            }
        } else {
            is_newer(current_version, &release.tag)
        };

        let storage_error = match self.record_check_time(cancel).await {
            None => {
                log::info!("Update check cancelled before the check time was recorded");
                return self.cancelled();
            }
            Some(Ok(())) => None,
            Some(Err(error)) => {
                log::warn!("Failed to record update check time: {error}");
                Some(error.to_string())
            }
        };

        if newer {
            log::info!("Update available: {} -> {}", current_version, release.tag);
            UpdateCheckResult::UpdateAvailable {
                release,
                storage_error,
            }
        } else {
            log::info!("{current_version} is up to date (latest {})", release.tag);
            UpdateCheckResult::UpToDate {
                release,
                storage_error,
            }
        }
    }

    /// Writes the check time on the blocking pool. Returns `None` when
    /// cancellation wins before the write starts; a started write always runs
    /// to completion and its outcome is returned.
    async fn record_check_time(
        &self,
        cancel: &CancellationToken,
    ) -> Option<Result<(), StoreError>> {
        if cancel.is_cancelled() {
            return None;
        }

        let claimed = Arc::new(AtomicBool::new(false));
        let writer_claim = Arc::clone(&claimed);
        let store = self.store.clone();
        let checked_at = Utc::now();
        let mut write = tokio::task::spawn_blocking(move || {
            if writer_claim.swap(true, Ordering::SeqCst) {
                return None;
            }
            Some(store.set_last_checked_at(checked_at))
        });

        let joined = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                if !claimed.swap(true, Ordering::SeqCst) {
                    return None;
                }
                (&mut write).await
            }
            joined = &mut write => joined,
        };

        match joined {
            Ok(outcome) => outcome,
            Err(error) => Some(Err(StoreError::Unavailable(format!(
                "check time writer stopped: {error}"
            )))),
        }
    }

    fn cancelled(&self) -> UpdateCheckResult {
        failed(
            CheckErrorKind::Cancelled,
            self.texts().check_cancelled_description.to_string(),
        )
    }

    fn texts(&self) -> &'static Texts {
        self.language.texts()
    }

    fn notification_for(&self, result: &UpdateCheckResult, current_version: &str) -> Notification {
        let texts = self.texts();
        match result {
            UpdateCheckResult::UpdateAvailable { release, .. } => Notification::new(
                NotificationKind::Info,
                texts.new_version_found,
                texts
                    .new_version_description
                    .replace("{version}", &release.tag),
            ),
            UpdateCheckResult::UpToDate { .. } => Notification::new(
                NotificationKind::Success,
                texts.already_latest,
                texts
                    .already_latest_description
                    .replace("{version}", current_version),
            ),
            UpdateCheckResult::CheckFailed {
                kind: CheckErrorKind::Cancelled,
                message,
            } => Notification::new(NotificationKind::Info, texts.check_cancelled, message),
            UpdateCheckResult::CheckFailed { message, .. } => {
                Notification::new(NotificationKind::Error, texts.check_update_failed, message)
            }
        }
    }
}

fn error_kind(error: &ReleaseError) -> CheckErrorKind {
    match error {
        ReleaseError::Network(_) => CheckErrorKind::Network,
        ReleaseError::Fetch { .. } => CheckErrorKind::Fetch,
        ReleaseError::MalformedResponse(_) => CheckErrorKind::MalformedResponse,
    }
}

/// Localized, user-safe description of a failed release fetch.
#[must_use]
pub fn release_error_message(language: Language, error: &ReleaseError) -> String {
    let texts = language.texts();
    match error {
        ReleaseError::Network(_) => texts.network_unreachable.to_string(),
        ReleaseError::Fetch { status, reason } => texts
            .registry_status
            .replace("{status}", &format!("HTTP {} ({reason})", status.as_u16())),
        ReleaseError::MalformedResponse(_) => texts.malformed_response.to_string(),
    }
}

fn invalid_version_message(texts: &Texts, error: &InvalidVersionError) -> String {
    texts.invalid_version.replace("{version}", &error.input)
}

fn failed(kind: CheckErrorKind, message: String) -> UpdateCheckResult {
    UpdateCheckResult::CheckFailed { kind, message }
}
