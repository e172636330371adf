use chrono::{DateTime, Utc};
use quillpost_core::{Language, format_checked_at};

use crate::error::AppError;

use super::{App, CURRENT_VERSION};

#[derive(Debug)]
pub(super) struct StatusReport {
    pub current_version: &'static str,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub auto_check_enabled: bool,
    pub can_open_links: bool,
}

impl StatusReport {
    pub(super) fn render(&self, language: Language) -> String {
        let texts = language.texts();
        let last_checked = self.last_checked_at.map_or_else(
            || texts.never.to_string(),
            |at| format_checked_at(&at, language),
        );
        let auto_check = if self.auto_check_enabled {
            texts.on
        } else {
            texts.off
        };
        let open_links = if self.can_open_links {
            texts.yes
        } else {
            texts.no_headless
        };
        [
            (texts.status_version, self.current_version.to_string()),
            (texts.status_last_checked, last_checked),
            (texts.status_auto_check, auto_check.to_string()),
            (texts.status_open_links, open_links.to_string()),
        ]
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

pub(super) fn handle_status(app: &App) -> Result<StatusReport, AppError> {
    let store = app.coordinator.store();
    Ok(StatusReport {
        current_version: CURRENT_VERSION,
        last_checked_at: store
            .last_checked_at()
            .map_err(|error| AppError::state_access_failed("read", error))?,
        auto_check_enabled: store
            .auto_check_enabled()
            .map_err(|error| AppError::state_access_failed("read", error))?,
        can_open_links: app.host.can_open_external_url(),
    })
}

pub(super) fn handle_auto_check(app: &App, enabled: bool) -> Result<(), AppError> {
    app.coordinator
        .set_auto_check_preference(enabled)
        .map_err(|error| AppError::state_access_failed("save", error))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use quillpost_core::Language;
    use quillpost_platform::HostEnvironment;

    use super::{StatusReport, handle_auto_check, handle_status};
    use crate::app::test_support::{FixedSource, harness, release};

    #[test]
    fn fresh_state_reports_never_checked_and_auto_check_on() {
        let harness = harness(
            FixedSource::returning(release("v1.0.0")),
            HostEnvironment::Headless,
        );

        let report = handle_status(&harness.app).expect("status should load");

        assert!(report.last_checked_at.is_none());
        assert!(report.auto_check_enabled);
        assert!(!report.can_open_links);
        assert!(report.render(Language::En).contains("Last checked: never"));
    }

    #[test]
    fn auto_check_toggle_is_persisted() {
        let harness = harness(
            FixedSource::returning(release("v1.0.0")),
            HostEnvironment::Desktop,
        );

        handle_auto_check(&harness.app, false).expect("preference should save");
        assert!(!harness.store.auto_check_enabled().expect("readable"));

        handle_auto_check(&harness.app, true).expect("preference should save");
        assert!(handle_status(&harness.app).expect("status").auto_check_enabled);
    }

    #[test]
    fn render_shows_checked_time() {
        let report = StatusReport {
            current_version: "2.0.0",
            last_checked_at: Utc.with_ymd_and_hms(2026, 10, 18, 8, 30, 0).single(),
            auto_check_enabled: false,
            can_open_links: true,
        };

        let rendered = report.render(Language::En);

        assert_eq!(
            rendered,
            "Version: 2.0.0\nLast checked: October 18, 2026 08:30 UTC\nAuto-check: off\nOpen links: yes"
        );
    }

    #[test]
    fn render_follows_the_configured_language() {
        let report = StatusReport {
            current_version: "2.0.0",
            last_checked_at: None,
            auto_check_enabled: true,
            can_open_links: false,
        };

        assert_eq!(
            report.render(Language::Zh),
            "版本: 2.0.0\n上次检查: 从未\n自动检查: 开启\n打开链接: 否（无图形会话）"
        );
    }
}
