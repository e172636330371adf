mod preferences;
mod release_links;
mod update_checks;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use quillpost_core::{
    JsonFileStore, NotificationSink, ReleaseClient, ReleaseSource, UpdateCheckStore,
    UpdateCoordinator,
};
use quillpost_platform::{AppPaths, HostCapabilities, HostEnvironment};
use tokio_util::sync::CancellationToken;

use crate::cli::{CliCommand, RepoArgs};
use crate::error::AppError;
use crate::notifier::ConsoleNotifier;
use crate::settings::AppSettings;

pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct App {
    settings: AppSettings,
    coordinator: UpdateCoordinator,
    releases: Arc<dyn ReleaseSource>,
    host: Arc<dyn HostCapabilities>,
}

impl App {
    pub fn new(settings: AppSettings, paths: &AppPaths) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .user_agent(format!("quillpost/{CURRENT_VERSION}"))
            .build()
            .map_err(AppError::http_client_failed)?;
        let releases: Arc<dyn ReleaseSource> = Arc::new(ReleaseClient::with_api_base(
            http_client,
            settings.api_base_url.as_str(),
        ));

        let state = JsonFileStore::open(paths.update_state_file())
            .map_err(|error| AppError::state_access_failed("open", error))?;
        let host = HostEnvironment::detect();
        log::debug!("Running in a {host} session");

        Ok(Self::from_parts(
            settings,
            releases,
            UpdateCheckStore::new(Arc::new(state)),
            Arc::new(ConsoleNotifier::stdio()),
            Arc::new(host),
        ))
    }

    fn from_parts(
        settings: AppSettings,
        releases: Arc<dyn ReleaseSource>,
        store: UpdateCheckStore,
        notifier: Arc<dyn NotificationSink>,
        host: Arc<dyn HostCapabilities>,
    ) -> Self {
        let coordinator = UpdateCoordinator::new(Arc::clone(&releases), store, notifier)
            .with_language(settings.language)
            .with_strict_versions(settings.strict_version_check);
        Self {
            settings,
            coordinator,
            releases,
            host,
        }
    }

    fn repository<'a>(&'a self, overrides: &'a RepoArgs) -> (&'a str, &'a str) {
        (
            overrides
                .owner
                .as_deref()
                .unwrap_or(&self.settings.repo_owner),
            overrides.repo.as_deref().unwrap_or(&self.settings.repo_name),
        )
    }

    pub async fn run(
        &self,
        command: CliCommand,
        cancel: &CancellationToken,
    ) -> Result<ExitCode, AppError> {
        match command {
            CliCommand::Check(args) => {
                let outcome = update_checks::handle_check(self, &args, cancel).await?;
                if let Some(details) = outcome.render(self.settings.language) {
                    println!("{details}");
                }
                Ok(if outcome.succeeded() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                })
            }
            CliCommand::Status => {
                let report = preferences::handle_status(self)?;
                println!("{}", report.render(self.settings.language));
                Ok(ExitCode::SUCCESS)
            }
            CliCommand::AutoCheck(args) => {
                let enabled = args.state.enabled();
                preferences::handle_auto_check(self, enabled)?;
                let texts = self.settings.language.texts();
                println!(
                    "{}",
                    texts
                        .auto_check_now
                        .replace("{state}", if enabled { texts.on } else { texts.off })
                );
                Ok(ExitCode::SUCCESS)
            }
            CliCommand::Open(args) => {
                let opened = release_links::handle_open(self, &args, cancel).await?;
                println!(
                    "{}",
                    self.settings.language.texts().opened.replace("{target}", &opened)
                );
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use quillpost_platform::HostEnvironment;

    use super::test_support::{FixedSource, harness, release};
    use crate::cli::RepoArgs;

    #[test]
    fn repository_prefers_overrides_over_settings() {
        let harness = harness(
            FixedSource::returning(release("v1.0.0")),
            HostEnvironment::Desktop,
        );
        let overrides = RepoArgs {
            owner: Some("someone".to_string()),
            repo: None,
        };

        assert_eq!(
            harness.app.repository(&overrides),
            ("someone", "quillpost")
        );
        assert_eq!(
            harness.app.repository(&RepoArgs::default()),
            ("quillpost", "quillpost")
        );
    }
}
