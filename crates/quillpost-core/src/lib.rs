//! Update detection for Quillpost.
//!
//! This crate holds the logic behind "is there a newer Quillpost?", kept
//! independent of any front end:
//! - Dotted version parsing and comparison.
//! - Latest-release fetching from a GitHub-style registry.
//! - Persisted check history and the auto-check preference.
//! - The coordinator that ties a check together and reports the outcome.

pub mod coordinator;
mod format;
mod i18n;
mod links;
mod notify;
pub mod release;
pub mod store;
mod version;

/// Check orchestration and its result type.
pub use coordinator::{
    CheckErrorKind, UpdateCheckResult, UpdateCoordinator, release_error_message,
};
/// Presentation helpers layered over release data.
pub use format::{format_checked_at, format_file_size, format_publish_date};
/// Notification language and its strings.
pub use i18n::{Language, Texts};
/// Opening release pages and downloads through the host.
pub use links::{LinkError, open_asset_download, open_release_page};
/// User-facing notifications and the sink they are delivered to.
pub use notify::{Notification, NotificationKind, NotificationSink, RecordingSink};
/// Release registry model and client.
pub use release::{ReleaseAsset, ReleaseClient, ReleaseError, ReleaseInfo, ReleaseSource};
/// Persistence port and its implementations.
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError, UpdateCheckStore};
/// Dotted version comparison.
pub use version::{DottedVersion, InvalidVersionError, compare_strict, is_newer};
