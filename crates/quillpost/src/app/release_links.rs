use quillpost_core::{open_asset_download, open_release_page, release_error_message};
use tokio_util::sync::CancellationToken;

use crate::cli::OpenArgs;
use crate::error::AppError;

use super::App;

/// Returns a short description of what was opened.
pub(super) async fn handle_open(
    app: &App,
    args: &OpenArgs,
    cancel: &CancellationToken,
) -> Result<String, AppError> {
    let (owner, repo) = app.repository(&args.repo);

    let fetched = tokio::select! {
        biased;
        () = cancel.cancelled() => None,
        result = app.releases.fetch_latest(owner, repo) => Some(result),
    };
    let release = fetched
        .ok_or_else(|| AppError::operation_cancelled("Release fetch"))?
        .map_err(|error| {
            log::warn!("Fetching the latest release of {owner}/{repo} failed: {error}");
            AppError::release_fetch_failed(release_error_message(app.settings.language, &error))
        })?;

    match args.asset.as_deref() {
        Some(asset_name) => {
            open_asset_download(app.host.as_ref(), &release, asset_name)
                .map_err(|error| AppError::link_open_failed("download", error))?;
            Ok(format!("{asset_name} ({})", release.tag))
        }
        None => {
            open_release_page(app.host.as_ref(), &release)
                .map_err(|error| AppError::link_open_failed("release page", error))?;
            Ok(release.html_url)
        }
    }
}
