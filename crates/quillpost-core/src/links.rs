use quillpost_platform::{HostCapabilities, HostError};
use thiserror::Error;

use crate::release::ReleaseInfo;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("release {tag} has no asset named {name}")]
    AssetNotFound { tag: String, name: String },
    #[error("release {tag} has no web page")]
    MissingReleasePage { tag: String },
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Open the release's web page in the user's default handler.
///
/// # Errors
/// Returns an error when the release has no page URL or the host cannot open
/// links.
pub fn open_release_page(host: &dyn HostCapabilities, release: &ReleaseInfo) -> Result<(), LinkError> {
    if release.html_url.is_empty() {
        return Err(LinkError::MissingReleasePage {
            tag: release.tag.clone(),
        });
    }
    host.open_external_url(&release.html_url)?;
    Ok(())
}

/// Open the download URL of the asset called `asset_name`.
///
/// # Errors
/// Returns an error when no asset has that name or the host cannot open links.
pub fn open_asset_download(
    host: &dyn HostCapabilities,
    release: &ReleaseInfo,
    asset_name: &str,
) -> Result<(), LinkError> {
    let asset = release
        .asset(asset_name)
        .ok_or_else(|| LinkError::AssetNotFound {
            tag: release.tag.clone(),
            name: asset_name.to_string(),
        })?;
    host.open_external_url(&asset.download_url)?;
    Ok(())
}
