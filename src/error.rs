use core::error::Error;
use pisserror::Error;

use crate::config::Config;
use crate::store::StoreError;

/// Stick this at the end of bug warnings/errors.
///
/// It helps users find out where to report bugs when looking at logs.
pub async fn bug_msg() -> String {
    format!(
        "this is a bug, so please report it! you can do so by heading to this git repo: {}",
        Config::read().await.bug_report_info.repo
    )
}

/// Everything that can go wrong in this crate, in one place.
#[derive(Debug, Error)]
pub enum LookbookError {
    #[error("The tag catalog hit an error. See: `{_0}`")]
    Catalog(#[from] CatalogError),

    #[error("The remote tag store hit an error. See: `{_0}`")]
    Store(#[from] StoreError),

    #[error("Something's off with the app config. See: `{_0}`")]
    Config(#[from] ConfigError),

    #[error("The vision service hit an error. See: `{_0}`")]
    Vision(#[from] VisionError),
}

/// Failures a [`crate::catalog::TagCatalog`] reports to its screen.
///
/// All three are returned as values - none of them should ever take down a
/// compose flow. The screen shows "nothing changed, here's why" and offers
/// a retry.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A read from the remote store didn't make it. Show an empty list and
    /// a retry affordance.
    #[error("Couldn't read tags from the remote store. See: `{_0}`")]
    RemoteUnavailable(StoreError),

    /// A write (insert/delete) didn't make it. Local state is untouched.
    #[error("Couldn't write the tag change to the remote store. See: `{_0}`")]
    PersistFailed(StoreError),

    /// The caller broke a precondition (deleting a shared tag, mutating an
    /// unloaded catalog, ...). Screens should make these unreachable, but
    /// the catalog rejects them anyway rather than corrupt its state.
    #[error("Invalid catalog operation: {_0}")]
    InvalidOperation(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// during fs read from disk
    #[error("Failed to read config file. See: `{_0}`")]
    ReadFailed(#[from] std::io::Error),

    /// parsing
    #[error("Failed to parse config file. See: `{_0}`")]
    ParseFailed(#[from] toml::de::Error),

    /// when we read from disk, the paths should be equal
    #[error("The config file had data paths that didn't match the newest ones.")]
    PathMismatch,
}

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("The analysis request couldn't be sent. See: `{_0}`")]
    Network(String),

    #[error("The analysis service replied with an error. Status: `{_0}`.")]
    Api(u16),

    #[error("The analysis response couldn't be parsed. See: `{_0}`")]
    Parse(String),
}
