use std::{path::PathBuf, sync::OnceLock};

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{bug_msg, ConfigError};

pub type SharedConfig = RwLock<Config>;

// this will be initialized by the app itself
pub static CONFIG: OnceLock<SharedConfig> = OnceLock::new();

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Where the hosted backend lives, and how to talk to it.
    pub store: StoreConfig,

    /// The vision-language analysis service.
    pub vision: VisionConfig,

    /// Path to the app's data directory.
    pub data_dir: PathBuf,

    /// Information for automatically reporting bugs.
    pub bug_report_info: BugReportInfo,
}

/// Connection info for the hosted backend's row API.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StoreConfig {
    /// Project base URL, without the `/rest/v1` suffix.
    pub base_url: String,

    /// The project's public api key. Row-level security does the real
    /// gatekeeping server-side.
    pub api_key: String,

    /// How long one request may take before we give up on it.
    pub request_timeout_secs: u64,
}

/// Connection info for the analysis service.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisionConfig {
    pub base_url: String,

    /// Flip this off to ship posts without outfit labels entirely.
    pub enabled: bool,
}

impl Config {
    pub fn new(
        store: StoreConfig,
        vision: VisionConfig,
        data_dir: PathBuf,
        bug_report_info: BugReportInfo,
    ) -> Self {
        Self {
            store,
            vision,
            data_dir,
            bug_report_info,
        }
    }

    /// Attempts to read a previous `Config` from disk.
    ///
    /// Note that this may fail across versions, requiring new configs.
    pub async fn from_disk(data_dir: PathBuf) -> Result<Self, ConfigError> {
        // read the config from disk
        let s = tokio::fs::read_to_string(data_dir.join("shared_prefs/config.toml"))
            .await
            .map_err(ConfigError::ReadFailed)?;

        // parse with `toml` crate
        let s: Self = toml::from_str(s.as_str()).map_err(ConfigError::ParseFailed)?;

        // ensure paths are equal
        if s.data_dir != data_dir {
            tracing::error!("loaded config from disk, but it recorded another data dir. stale install data?");
            return Err(ConfigError::PathMismatch);
        }

        Ok(s)
    }

    /// Use this EXACTLY ONCE to initialize the config.
    ///
    /// The app should be the only one calling this.
    pub async fn init_config(
        store: StoreConfig,
        vision: VisionConfig,
        data_dir: PathBuf,
        bug_report_info: BugReportInfo,
    ) {
        if CONFIG.get().is_none() {
            let conf = RwLock::new(Config {
                store,
                vision,
                data_dir,
                bug_report_info,
            });

            CONFIG
                .set(conf)
                .expect("the config should not be configured yet");
        } else {
            tracing::error!(
                "attempted to init the config, but the config is already running. {}",
                bug_msg().await
            )
        }
    }

    /// Grabs the config for reading.
    ///
    /// Note that while you're reading the config, others cannot write to it.
    /// DO NOT HOLD ONTO IT FOR A LONG TIME.
    pub async fn read() -> RwLockReadGuard<'static, Config> {
        CONFIG
            .get()
            .expect("should have initialized already")
            .read()
            .await
    }

    pub async fn write() -> RwLockWriteGuard<'static, Config> {
        CONFIG
            .get()
            .expect("should have initialized already")
            .write()
            .await
    }
}

/// Some info to help with bug reporting.
///
/// Ends up in logs so users know where to send them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BugReportInfo {
    pub app_name: String,
    pub app_version: String,

    pub target_triple: String,
    pub build_time: String,

    /// the phone's device string (e.g. `Google Pixel 8 (shiba)`)
    pub device: String,
    /// Android's `Build.DISPLAY` string, when we're on Android
    pub display: String,

    pub commit: String,
    pub repo: String,
}
